use derive_more::derive::Deref;
use indexmap::IndexSet;
use std::collections::BTreeSet;

use crate::form_class::FormClassNormalizer;
use crate::language::cjk_utils::ideographs;
use crate::language::ja::japanese::{convert_hiragana_to_katakana, convert_katakana_to_hiragana};
use crate::settings::SearchOptions;

/// The script variants of one query token: the text as typed, its katakana
/// form and its hiragana form, deduplicated in that order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deref)]
pub struct VariantSet(IndexSet<String>);

impl VariantSet {
    pub fn new(text: &str) -> Self {
        let set = [
            text.to_string(),
            convert_hiragana_to_katakana(text),
            convert_katakana_to_hiragana(text),
        ]
        .into_iter()
        .filter(|v| !v.is_empty())
        .collect();
        Self(set)
    }

    /// Used by filter-only searches, where nothing can match a reading.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// One unit of matching: the full query, or one of its ideographs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryToken {
    pub text: String,
    pub variants: VariantSet,
}

impl QueryToken {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let variants = VariantSet::new(&text);
        Self { text, variants }
    }
}

/// Builds the ordered token list for a query.
///
/// An empty (after trimming) query has no tokens. A query with two or more
/// ideographs is followed by each distinct ideograph in order of first
/// appearance, when `expand_ideographs` is set.
pub fn expand_tokens(query: &str, expand_ideographs: bool) -> Vec<QueryToken> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let mut texts: IndexSet<String> = IndexSet::from([query.to_string()]);
    if expand_ideographs && ideographs(query).nth(1).is_some() {
        texts.extend(ideographs(query).map(String::from));
    }
    texts.into_iter().map(QueryToken::new).collect()
}

/// The normalized, alias-expanded labels a search filters by.
///
/// The filter is active whenever the caller passed any label at all, even one
/// that normalizes to nothing. An active filter with no labels left lets
/// nothing through. An empty label is never part of the set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSet {
    labels: BTreeSet<String>,
    active: bool,
}

impl FilterSet {
    pub fn new<'a, I>(labels: I, opts: &SearchOptions, normalizer: &FormClassNormalizer) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut active = false;
        let labels = labels
            .into_iter()
            .inspect(|_| active = true)
            .flat_map(|label| std::iter::once(label).chain(opts.aliases_of(label)))
            .map(|label| normalizer.normalize(label).into_owned())
            .filter(|label| !label.is_empty())
            .collect();
        Self { labels, active }
    }

    /// Whether the caller asked for any filtering.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether an already-normalized form class passes this filter.
    /// An inactive filter lets everything through.
    pub fn allows(&self, form_class: &str) -> bool {
        !self.active || (!form_class.is_empty() && self.labels.contains(form_class))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}
