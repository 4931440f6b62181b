use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Width used while upstream 字形 values still carry trailing garbage
/// after the first two characters.
pub const DEFAULT_FORM_CLASS_WIDTH: usize = 2;

/// Maps a raw `form_class` value to the label it is listed and filtered by.
///
/// The same normalizer must sit in front of both
/// [`distinct_filter_labels`](crate::store::distinct_filter_labels) and the
/// matcher's filter, otherwise a listed label could never match.
/// A `width` of `None` turns truncation off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormClassNormalizer {
    width: Option<usize>,
}

impl Default for FormClassNormalizer {
    fn default() -> Self {
        Self::truncating(DEFAULT_FORM_CLASS_WIDTH)
    }
}

impl FormClassNormalizer {
    pub fn new(width: Option<usize>) -> Self {
        Self { width }
    }

    pub fn truncating(width: usize) -> Self {
        Self { width: Some(width) }
    }

    /// Trims only.
    pub fn disabled() -> Self {
        Self { width: None }
    }

    pub fn width(&self) -> Option<usize> {
        self.width
    }

    /// Trims surrounding whitespace, then keeps the first `width` characters.
    /// An empty result means "no form class".
    pub fn normalize<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        let trimmed = raw.trim();
        match self.width {
            Some(width) => match trimmed.char_indices().nth(width) {
                Some((end, _)) => Cow::Borrowed(&trimmed[..end]),
                None => Cow::Borrowed(trimmed),
            },
            None => Cow::Borrowed(trimmed),
        }
    }
}
