use std::collections::HashSet;

use segment_reader::match_index;

use crate::entry::{Entry, MatchField};
use crate::query::VariantSet;

/// Picks the display group for an entry that matched on `field`.
///
/// Only headword matches of glyph stand-ins move: their headword is a
/// reading, so they are shown under the reading they actually match.
pub fn reclassify(entry: &Entry, field: MatchField, variants: &VariantSet) -> MatchField {
    if field != MatchField::Headword || !entry.is_glyph_stand_in() {
        return field;
    }
    if match_index(entry.on_reading(), variants.iter()).is_match() {
        MatchField::OnReading
    } else if match_index(entry.kun_reading(), variants.iter()).is_match() {
        MatchField::KunReading
    } else {
        MatchField::Headword
    }
}

/// Collects entries into the three groups, each id at most once.
///
/// The seen set lives as long as one search, so across fields and tokens
/// the first claim wins. Groups are handed out per token by [`take_groups`].
///
/// [`take_groups`]: Deduplicator::take_groups
#[derive(Debug, Default)]
pub struct Deduplicator<'e> {
    seen: HashSet<i64>,
    groups: [Vec<&'e Entry>; 3],
}

impl<'e> Deduplicator<'e> {
    /// Returns `false` if the id was already claimed.
    pub fn claim(&mut self, entry: &'e Entry, group: MatchField) -> bool {
        if !self.seen.insert(entry.id()) {
            return false;
        }
        self.groups[group.index()].push(entry);
        true
    }

    /// Drains the groups collected since the last call. The seen set is kept.
    pub fn take_groups(&mut self) -> [Vec<&'e Entry>; 3] {
        std::mem::take(&mut self.groups)
    }

    #[cfg(test)]
    pub(crate) fn seen_len(&self) -> usize {
        self.seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn glyph_stand_in_moves_to_on_reading() {
        let entry = Entry::character(1, "ア")
            .with_glyph_image("/img/a.gif")
            .with_on_reading("アン");
        let group = reclassify(&entry, MatchField::Headword, &VariantSet::new("あん"));
        assert_eq!(group, MatchField::OnReading);
    }

    #[test]
    fn glyph_stand_in_moves_to_kun_reading() {
        let entry = Entry::character(1, "あ")
            .with_glyph_image("/img/a.gif")
            .with_on_reading("ア")
            .with_kun_reading("あな");
        let group = reclassify(&entry, MatchField::Headword, &VariantSet::new("あな"));
        assert_eq!(group, MatchField::KunReading);
    }

    #[test]
    fn glyph_stand_in_without_reading_match_stays() {
        let entry = Entry::character(1, "アン")
            .with_glyph_image("/img/a.gif")
            .with_on_reading("カ（アン）");
        let group = reclassify(&entry, MatchField::Headword, &VariantSet::new("アン"));
        assert_eq!(group, MatchField::Headword);
    }

    #[test]
    fn ideograph_headword_stays() {
        let entry = Entry::character(1, "安")
            .with_glyph_image("/img/a.gif")
            .with_on_reading("アン");
        let group = reclassify(&entry, MatchField::Headword, &VariantSet::new("安"));
        assert_eq!(group, MatchField::Headword);
    }

    #[test]
    fn no_image_stays() {
        let entry = Entry::character(1, "ア").with_on_reading("アン");
        let group = reclassify(&entry, MatchField::Headword, &VariantSet::new("あ"));
        assert_eq!(group, MatchField::Headword);
    }

    #[test]
    fn reading_fields_are_never_moved() {
        let entry = Entry::character(1, "ア")
            .with_glyph_image("/img/a.gif")
            .with_on_reading("アン")
            .with_kun_reading("あん");
        let group = reclassify(&entry, MatchField::KunReading, &VariantSet::new("あん"));
        assert_eq!(group, MatchField::KunReading);
    }

    #[test]
    fn first_claim_wins() {
        let a = Entry::character(1, "安");
        let b = Entry::character(2, "案");
        let mut dedup = Deduplicator::default();
        assert!(dedup.claim(&a, MatchField::Headword));
        assert!(dedup.claim(&b, MatchField::KunReading));
        assert!(!dedup.claim(&a, MatchField::OnReading));

        let [head, on, kun] = dedup.take_groups();
        assert_eq!(head.iter().map(|e| e.id()).collect::<Vec<_>>(), vec![1]);
        assert!(on.is_empty());
        assert_eq!(kun.iter().map(|e| e.id()).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn seen_set_outlives_take_groups() {
        let a = Entry::character(1, "安");
        let mut dedup = Deduplicator::default();
        dedup.claim(&a, MatchField::Headword);
        let _ = dedup.take_groups();
        assert!(!dedup.claim(&a, MatchField::Headword));
        assert!(dedup.take_groups().iter().all(Vec::is_empty));
        assert_eq!(dedup.seen_len(), 1);
    }
}
