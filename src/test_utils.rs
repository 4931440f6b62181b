use std::sync::LazyLock;

use icu::{
    collator::{options::CollatorOptions, Collator, CollatorBorrowed},
    locale::locale,
};

use crate::{entry::Entry, store::MemoryStore};

pub(crate) static JA_COLLATOR: LazyLock<CollatorBorrowed<'static>> = LazyLock::new(|| {
    Collator::try_new(locale!("ja").into(), CollatorOptions::default()).unwrap()
});

/// A handful of 字通 characters around カン / アン, plus one glyph-only entry.
pub(crate) fn kanji_store() -> MemoryStore {
    MemoryStore::new([
        Entry::character(10, "漢")
            .with_on_reading("カン")
            .with_kun_reading("から")
            .with_form_class("形声"),
        Entry::character(11, "案")
            .with_on_reading("アン・カン")
            .with_kun_reading("つくえ")
            .with_form_class("形声"),
        Entry::character(12, "円")
            .with_on_reading("エン（ヱン）・カン（クヮン）")
            .with_form_class("形声"),
        Entry::character(13, "ア")
            .with_glyph_image("/image/dictionary/jitsu/gaiji/02a61.gif")
            .with_on_reading("アン"),
        Entry::character(14, "峠")
            .with_kun_reading("とうげ")
            .with_form_class("国字"),
        Entry::character(15, "畑")
            .with_kun_reading("はた・はたけ")
            .with_form_class("略体"),
        Entry::character(16, "安")
            .with_on_reading("アン")
            .with_kun_reading("やすい・やすらか")
            .with_form_class("会意"),
    ])
    .unwrap()
}

/// Entries for multi-ideograph lookups.
pub(crate) fn sample_store() -> MemoryStore {
    MemoryStore::new([
        Entry::character(1, "由")
            .with_on_reading("ユウ・ユ・ユイ")
            .with_kun_reading("よる・よし")
            .with_form_class("象形"),
        Entry::character(2, "莉")
            .with_on_reading("リ・レイ")
            .with_form_class("形声"),
        Entry::word(3, "由莉").with_on_reading("ユリ"),
        Entry::word(4, "由来").with_on_reading("ユライ"),
        Entry::word(5, "茉莉").with_on_reading("マツリ"),
        Entry::word(6, "自由").with_on_reading("ジユウ"),
    ])
    .unwrap()
}
