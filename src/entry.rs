use getset::{CopyGetters, Getters};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

use crate::language::cjk_utils::contains_ideograph;

/// Whether an entry describes a single character or a compound word.
///
/// Serialized the way the crawler stores the `type` column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EntryKind {
    #[default]
    #[serde(rename = "kanji", alias = "character")]
    Character,
    #[serde(rename = "word")]
    Word,
}

/// A single 字通 dictionary entry.
///
/// Entries belong to the store; searching only ever borrows them.
/// Field aliases accept the crawler's column names
/// (`keyword`, `type`, `gaiji_img_src`, `jion`, `jikun`, `jikei`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Getters, CopyGetters)]
pub struct Entry {
    #[getset(get_copy = "pub")]
    id: i64,
    #[getset(get = "pub")]
    #[serde(alias = "keyword")]
    headword: String,
    #[getset(get = "pub")]
    #[serde(default, deserialize_with = "null_as_empty")]
    href: String,
    #[getset(get_copy = "pub")]
    #[serde(alias = "type", default)]
    kind: EntryKind,
    /// Set when the character has no text form and is shown as an image.
    #[getset(get = "pub")]
    #[serde(alias = "gaiji_img_src", default, deserialize_with = "empty_as_none")]
    glyph_image: Option<String>,
    #[getset(get = "pub")]
    #[serde(alias = "jion", default, deserialize_with = "null_as_empty")]
    on_reading: String,
    #[getset(get = "pub")]
    #[serde(alias = "jikun", default, deserialize_with = "null_as_empty")]
    kun_reading: String,
    #[getset(get = "pub")]
    #[serde(alias = "jikei", default, deserialize_with = "null_as_empty")]
    form_class: String,
}

impl Entry {
    pub fn new(id: i64, headword: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            id,
            headword: headword.into(),
            href: String::new(),
            kind,
            glyph_image: None,
            on_reading: String::new(),
            kun_reading: String::new(),
            form_class: String::new(),
        }
    }

    pub fn character(id: i64, headword: impl Into<String>) -> Self {
        Self::new(id, headword, EntryKind::Character)
    }

    pub fn word(id: i64, headword: impl Into<String>) -> Self {
        Self::new(id, headword, EntryKind::Word)
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = href.into();
        self
    }

    pub fn with_glyph_image(mut self, src: impl Into<String>) -> Self {
        let src = src.into();
        self.glyph_image = (!src.is_empty()).then_some(src);
        self
    }

    pub fn with_on_reading(mut self, reading: impl Into<String>) -> Self {
        self.on_reading = reading.into();
        self
    }

    pub fn with_kun_reading(mut self, reading: impl Into<String>) -> Self {
        self.kun_reading = reading.into();
        self
    }

    pub fn with_form_class(mut self, form_class: impl Into<String>) -> Self {
        self.form_class = form_class.into();
        self
    }

    pub fn has_glyph_image(&self) -> bool {
        self.glyph_image.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// True for glyph-only characters whose headword is really a reading
    /// standing in for the image.
    pub fn is_glyph_stand_in(&self) -> bool {
        self.has_glyph_image() && !contains_ideograph(&self.headword)
    }

    /// Cleans up text exactly as the crawler does before storing a row:
    /// whitespace runs collapse to one space, and image urls are reduced to
    /// `path?query`.
    pub fn normalized(mut self) -> Self {
        self.headword = collapse_whitespace(&self.headword);
        self.on_reading = collapse_whitespace(&self.on_reading);
        self.kun_reading = collapse_whitespace(&self.kun_reading);
        self.form_class = collapse_whitespace(&self.form_class);
        self.glyph_image = self
            .glyph_image
            .as_deref()
            .map(normalize_image_src)
            .filter(|s| !s.is_empty());
        self
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strips scheme and host from an image reference, keeping `path?query`.
///
/// Relative references are returned unchanged.
pub fn normalize_image_src(src: &str) -> String {
    let src = src.trim();
    let rest = if let Some(rest) = src.strip_prefix("//") {
        rest
    } else if let Some(rest) = src
        .strip_prefix("https://")
        .or_else(|| src.strip_prefix("http://"))
    {
        rest
    } else {
        return src.to_string();
    };
    let rest = rest.split('#').next().unwrap_or_default();
    match rest.find(['/', '?']) {
        Some(i) => rest[i..].to_string(),
        None => String::new(),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.trim().is_empty()))
}

/// One lookup: the raw query and the selected form-class labels.
///
/// Labels are a set; their order never affects the result.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub filter_labels: BTreeSet<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            filter_labels: BTreeSet::new(),
        }
    }

    pub fn with_labels<I, L>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        self.filter_labels.extend(labels.into_iter().map(Into::into));
        self
    }
}

/// The field an entry matched on, which is also the group it is shown in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MatchField {
    Headword,
    OnReading,
    KunReading,
}

impl MatchField {
    /// Fixed processing order. Earlier fields claim an entry first.
    pub const ALL: [MatchField; 3] = [
        MatchField::Headword,
        MatchField::OnReading,
        MatchField::KunReading,
    ];

    pub fn index(self) -> usize {
        match self {
            MatchField::Headword => 0,
            MatchField::OnReading => 1,
            MatchField::KunReading => 2,
        }
    }

    /// The raw text this field matches against.
    pub fn text(self, entry: &Entry) -> &str {
        match self {
            MatchField::Headword => entry.headword(),
            MatchField::OnReading => entry.on_reading(),
            MatchField::KunReading => entry.kun_reading(),
        }
    }
}

/// Grouped, ordered lookup results.
///
/// An entry id shows up at most once across all three groups.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub headword: Vec<Entry>,
    pub on_reading: Vec<Entry>,
    pub kun_reading: Vec<Entry>,
}

impl SearchResult {
    pub fn group(&self, field: MatchField) -> &[Entry] {
        match field {
            MatchField::Headword => &self.headword,
            MatchField::OnReading => &self.on_reading,
            MatchField::KunReading => &self.kun_reading,
        }
    }

    pub(crate) fn group_mut(&mut self, field: MatchField) -> &mut Vec<Entry> {
        match field {
            MatchField::Headword => &mut self.headword,
            MatchField::OnReading => &mut self.on_reading,
            MatchField::KunReading => &mut self.kun_reading,
        }
    }

    /// Ids of one group in display order.
    pub fn ids(&self, field: MatchField) -> Vec<i64> {
        self.group(field).iter().map(Entry::id).collect()
    }

    pub fn len(&self) -> usize {
        self.headword.len() + self.on_reading.len() + self.kun_reading.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every entry with the group it landed in, headword group first.
    pub fn iter(&self) -> impl Iterator<Item = (MatchField, &Entry)> {
        MatchField::ALL
            .into_iter()
            .flat_map(move |field| self.group(field).iter().map(move |e| (field, e)))
    }
}
