use segment_reader::SEGMENT_DELIMITER;

use crate::entry::{Entry, MatchField};
use crate::form_class::FormClassNormalizer;
use crate::query::{FilterSet, VariantSet};
use crate::store::EntryStore;

/// Cheap test for "some segment of `field` starts with `variant`".
///
/// Only looks at segment boundaries in the raw text; annotations are not
/// stripped here. [`segment_reader::match_index`] gives the exact position.
pub fn reading_has_prefix(field: &str, variant: &str) -> bool {
    if variant.is_empty() {
        return false;
    }
    field.starts_with(variant)
        || field
            .match_indices(SEGMENT_DELIMITER)
            .any(|(i, d)| field[i + d.len()..].starts_with(variant))
}

/// Whether `entry` is a candidate for `field` under any of `variants`.
pub fn field_matches(entry: &Entry, field: MatchField, variants: &VariantSet) -> bool {
    let text = field.text(entry);
    match field {
        MatchField::Headword => variants.iter().any(|v| text.contains(v.as_str())),
        MatchField::OnReading | MatchField::KunReading => {
            variants.iter().any(|v| reading_has_prefix(text, v))
        }
    }
}

/// Selects candidate entries for one field at a time.
pub struct Matcher<'a> {
    filter: &'a FilterSet,
    normalizer: &'a FormClassNormalizer,
    cap: usize,
}

impl<'a> Matcher<'a> {
    pub fn new(filter: &'a FilterSet, normalizer: &'a FormClassNormalizer, cap: usize) -> Self {
        Self {
            filter,
            normalizer,
            cap,
        }
    }

    pub fn passes_filter(&self, entry: &Entry) -> bool {
        !self.filter.is_active()
            || self
                .filter
                .allows(&self.normalizer.normalize(entry.form_class()))
    }

    /// Entries matching `field`, in store order, at most `cap` of them.
    pub fn candidates<'s, S>(
        &self,
        store: &'s S,
        field: MatchField,
        variants: &VariantSet,
    ) -> Vec<&'s Entry>
    where
        S: EntryStore + ?Sized,
    {
        if variants.is_empty() {
            return Vec::new();
        }
        store
            .entries()
            .filter(|e| field_matches(e, field, variants) && self.passes_filter(e))
            .take(self.cap)
            .collect()
    }

    /// Entries passing the filter alone. Used when the query is empty.
    pub fn filter_only<'s, S>(&self, store: &'s S) -> Vec<&'s Entry>
    where
        S: EntryStore + ?Sized,
    {
        if !self.filter.is_active() {
            return Vec::new();
        }
        store
            .entries()
            .filter(|e| self.passes_filter(e))
            .take(self.cap)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SearchOptions;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn ids(entries: &[&Entry]) -> Vec<i64> {
        entries.iter().map(|e| e.id()).collect()
    }

    fn filter(labels: &[&str]) -> FilterSet {
        let opts = SearchOptions::default();
        let labels: BTreeSet<String> = labels.iter().map(|l| l.to_string()).collect();
        FilterSet::new(&labels, &opts, &opts.form_class_normalizer())
    }

    #[test]
    fn prefix_at_segment_boundary() {
        assert!(reading_has_prefix("カン・ガン", "カン"));
        assert!(reading_has_prefix("アン・カン", "カン"));
        assert!(reading_has_prefix("エン（ヱン）・カン（クヮン）", "カン"));
        assert!(!reading_has_prefix("アカン", "カン"));
        assert!(!reading_has_prefix("カン", ""));
        assert!(!reading_has_prefix("", "カン"));
    }

    #[test]
    fn headword_is_substring_match() {
        let entry = Entry::word(1, "由莉子");
        assert!(field_matches(&entry, MatchField::Headword, &VariantSet::new("莉")));
        assert!(!field_matches(&entry, MatchField::Headword, &VariantSet::new("梨")));
    }

    #[test]
    fn readings_match_either_script() {
        let entry = Entry::character(1, "漢")
            .with_on_reading("カン")
            .with_kun_reading("から");
        let hira = VariantSet::new("かん");
        assert!(field_matches(&entry, MatchField::OnReading, &hira));
        assert!(!field_matches(&entry, MatchField::KunReading, &hira));
        assert!(field_matches(&entry, MatchField::KunReading, &VariantSet::new("カラ")));
    }

    #[test]
    fn candidates_are_capped_in_store_order() {
        let store: Vec<Entry> = (1..=5)
            .map(|id| Entry::character(id, "漢").with_on_reading("カン"))
            .collect();
        let no_filter = FilterSet::default();
        let normalizer = FormClassNormalizer::default();
        let matcher = Matcher::new(&no_filter, &normalizer, 3);
        let found = matcher.candidates(&store, MatchField::OnReading, &VariantSet::new("かん"));
        assert_eq!(ids(&found), vec![1, 2, 3]);
    }

    #[test]
    fn filter_excludes_empty_form_class() {
        let store = vec![
            Entry::character(1, "峠").with_on_reading("カン").with_form_class("国字"),
            Entry::character(2, "漢").with_on_reading("カン"),
            Entry::character(3, "閑").with_on_reading("カン").with_form_class("形声。"),
            Entry::character(4, "燗").with_on_reading("カン").with_form_class("略体"),
        ];
        let filter = filter(&["国字", "形声"]);
        let normalizer = FormClassNormalizer::default();
        let matcher = Matcher::new(&filter, &normalizer, 200);
        let found = matcher.candidates(&store, MatchField::OnReading, &VariantSet::new("カン"));
        assert_eq!(ids(&found), vec![1, 3, 4]);
    }

    #[test]
    fn filter_only_scan() {
        let store = vec![
            Entry::character(1, "峠").with_form_class("国字"),
            Entry::character(2, "漢"),
            Entry::character(3, "畑").with_form_class("略体"),
        ];
        let filter = filter(&["国字"]);
        let normalizer = FormClassNormalizer::default();
        let matcher = Matcher::new(&filter, &normalizer, 200);
        assert_eq!(ids(&matcher.filter_only(&store)), vec![1, 3]);

        let none = FilterSet::default();
        let matcher = Matcher::new(&none, &normalizer, 200);
        assert!(matcher.filter_only(&store).is_empty());
    }

    #[test]
    fn no_variants_no_candidates() {
        let store = vec![Entry::character(1, "漢").with_on_reading("カン")];
        let none = FilterSet::default();
        let normalizer = FormClassNormalizer::default();
        let matcher = Matcher::new(&none, &normalizer, 200);
        assert!(matcher
            .candidates(&store, MatchField::Headword, &VariantSet::empty())
            .is_empty());
    }

    #[test]
    fn blank_filter_rejects_everything() {
        let store = vec![
            Entry::character(1, "漢").with_on_reading("カン"),
            Entry::character(2, "閑").with_on_reading("カン").with_form_class("形声"),
        ];
        let blank = filter(&["", " "]);
        let normalizer = FormClassNormalizer::default();
        let matcher = Matcher::new(&blank, &normalizer, 200);
        assert!(matcher
            .candidates(&store, MatchField::OnReading, &VariantSet::new("かん"))
            .is_empty());
        assert!(matcher.filter_only(&store).is_empty());
    }
}
