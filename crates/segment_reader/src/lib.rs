use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Separates individual readings inside an 音 or 訓 field.
pub const SEGMENT_DELIMITER: char = '・';

/// Matches one parenthetical annotation that contains no other parenthesis,
/// either full-width `（…）` or ascii `(…)`.
static ANNOTATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"（[^（）()]*）|\([^（）()]*\)").expect("Failed to compile annotation regex")
});

/// Position of the first reading segment that matched a query variant.
///
/// `NoMatch` orders after every `At(_)`, so sorting ascending puts
/// the closest matches first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchIndex {
    At(usize),
    NoMatch,
}

impl MatchIndex {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchIndex::At(_))
    }

    pub fn position(&self) -> Option<usize> {
        match self {
            MatchIndex::At(i) => Some(*i),
            MatchIndex::NoMatch => None,
        }
    }
}

/// Removes historical/alternate annotations from a single reading.
///
/// `カン（クヮン）` becomes `カン`. Nested annotations are removed from the
/// inside out. Unbalanced parentheses are left as they are.
pub fn normalize_segment(text: &str) -> Cow<'_, str> {
    if !text.contains(['(', '（']) {
        return Cow::Borrowed(text.trim());
    }
    let mut current = text.to_string();
    loop {
        let stripped = ANNOTATION_REGEX.replace_all(&current, "");
        if stripped.len() == current.len() {
            break;
        }
        current = stripped.into_owned();
    }
    Cow::Owned(current.trim().to_string())
}

/// Splits a raw reading field on [`SEGMENT_DELIMITER`], normalizing each
/// piece and skipping the ones left empty.
pub fn split_segments(field: &str) -> Vec<Cow<'_, str>> {
    field
        .split(SEGMENT_DELIMITER)
        .map(normalize_segment)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Finds the first segment of `field` that starts with any non-empty variant.
pub fn match_index<I, V>(field: &str, variants: I) -> MatchIndex
where
    I: IntoIterator<Item = V>,
    V: AsRef<str>,
{
    let variants: Vec<V> = variants
        .into_iter()
        .filter(|v| !v.as_ref().is_empty())
        .collect();
    if field.is_empty() || variants.is_empty() {
        return MatchIndex::NoMatch;
    }
    split_segments(field)
        .iter()
        .position(|segment| variants.iter().any(|v| segment.starts_with(v.as_ref())))
        .map_or(MatchIndex::NoMatch, MatchIndex::At)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_fullwidth_annotation() {
        assert_eq!(normalize_segment("カン（クヮン）"), "カン");
        assert_eq!(normalize_segment(" エン（ヱン） "), "エン");
    }

    #[test]
    fn strips_ascii_annotation() {
        assert_eq!(normalize_segment("かみ(かむ)"), "かみ");
    }

    #[test]
    fn strips_nested_annotation() {
        assert_eq!(normalize_segment("ケイ（キャウ(古)）"), "ケイ");
    }

    #[test]
    fn leaves_unbalanced_text() {
        assert_eq!(normalize_segment("カン（クヮン"), "カン（クヮン");
        assert_eq!(normalize_segment("カン)"), "カン)");
        // mismatched pair is not a well-formed run
        assert_eq!(normalize_segment("カン（クヮン)"), "カン（クヮン)");
    }

    #[test]
    fn annotation_only_segment_is_dropped() {
        let segments = split_segments("（ヱン）・カン");
        assert_eq!(segments, vec!["カン"]);
    }

    #[test]
    fn split_keeps_order() {
        let segments = split_segments("エン（ヱン）・カン（クヮン）・ ・ガン");
        assert_eq!(segments, vec!["エン", "カン", "ガン"]);
    }

    #[test]
    fn split_empty_field() {
        assert!(split_segments("").is_empty());
        assert!(split_segments("・・").is_empty());
    }

    #[test]
    fn match_index_first_segment() {
        assert_eq!(match_index("カン・ガン", ["カン"]), MatchIndex::At(0));
        assert_eq!(match_index("アン・カン", ["かん", "カン"]), MatchIndex::At(1));
    }

    #[test]
    fn match_index_ignores_annotation() {
        assert_eq!(match_index("エン（ヱン）・カン（クヮン）", ["カン"]), MatchIndex::At(1));
        assert_eq!(match_index("エン（カン）", ["カン"]), MatchIndex::NoMatch);
    }

    #[test]
    fn match_index_is_prefix_only() {
        assert_eq!(match_index("アカン", ["カン"]), MatchIndex::NoMatch);
        assert_eq!(match_index("カンカ", ["カン"]), MatchIndex::At(0));
    }

    #[test]
    fn match_index_without_variants() {
        assert_eq!(match_index("カン", Vec::<String>::new()), MatchIndex::NoMatch);
        assert_eq!(match_index("カン", [""]), MatchIndex::NoMatch);
        assert_eq!(match_index("", ["カン"]), MatchIndex::NoMatch);
    }

    #[test]
    fn no_match_orders_last() {
        assert!(MatchIndex::At(usize::MAX) < MatchIndex::NoMatch);
        assert!(MatchIndex::At(0) < MatchIndex::At(1));
        assert_eq!(MatchIndex::At(3).position(), Some(3));
        assert!(!MatchIndex::NoMatch.is_match());
    }
}
