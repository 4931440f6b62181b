use std::cmp::Ordering;

use icu::collator::CollatorBorrowed;
use segment_reader::{match_index, MatchIndex};

use crate::entry::{Entry, MatchField};
use crate::query::VariantSet;

/// The reading field whose match position decides the order inside a group.
///
/// Headword matches are ordered by their on-reading, like the on group.
pub fn primary_field(group: MatchField) -> MatchField {
    match group {
        MatchField::KunReading => MatchField::KunReading,
        MatchField::OnReading | MatchField::Headword => MatchField::OnReading,
    }
}

/// The other reading field, used as the second key.
pub fn secondary_field(group: MatchField) -> MatchField {
    match primary_field(group) {
        MatchField::KunReading => MatchField::OnReading,
        _ => MatchField::KunReading,
    }
}

/// Match positions of one entry, computed once per sort.
#[derive(Clone, Copy, Debug)]
pub struct RankKey<'e> {
    pub primary: MatchIndex,
    pub secondary: MatchIndex,
    pub entry: &'e Entry,
}

/// Orders entries inside one group.
///
/// Keys, in order: primary match index, secondary match index, on-reading
/// text, kun-reading text, id. Reading text is compared with the collator and
/// an empty reading sorts last.
pub struct Ranker<'c> {
    collator: &'c CollatorBorrowed<'static>,
}

impl<'c> Ranker<'c> {
    pub fn new(collator: &'c CollatorBorrowed<'static>) -> Self {
        Self { collator }
    }

    pub fn key<'e>(&self, group: MatchField, entry: &'e Entry, variants: &VariantSet) -> RankKey<'e> {
        RankKey {
            primary: match_index(primary_field(group).text(entry), variants.iter()),
            secondary: match_index(secondary_field(group).text(entry), variants.iter()),
            entry,
        }
    }

    pub fn compare_keys(&self, a: &RankKey, b: &RankKey) -> Ordering {
        a.primary
            .cmp(&b.primary)
            .then_with(|| a.secondary.cmp(&b.secondary))
            .then_with(|| self.compare_reading(a.entry.on_reading(), b.entry.on_reading()))
            .then_with(|| self.compare_reading(a.entry.kun_reading(), b.entry.kun_reading()))
            .then_with(|| a.entry.id().cmp(&b.entry.id()))
    }

    pub fn compare(&self, group: MatchField, a: &Entry, b: &Entry, variants: &VariantSet) -> Ordering {
        self.compare_keys(&self.key(group, a, variants), &self.key(group, b, variants))
    }

    fn compare_reading(&self, a: &str, b: &str) -> Ordering {
        match (a.is_empty(), b.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.collator.compare(a, b),
        }
    }

    /// Sorts one group in place.
    pub fn sort<'e>(&self, group: MatchField, entries: &mut Vec<&'e Entry>, variants: &VariantSet) {
        let mut keyed: Vec<RankKey<'e>> = entries
            .iter()
            .map(|&e| self.key(group, e, variants))
            .collect();
        keyed.sort_by(|a, b| self.compare_keys(a, b));
        *entries = keyed.into_iter().map(|k| k.entry).collect();
    }
}
