use crate::language::cjk_utils::{is_code_point_in_range, CodepointRange};

pub const HIRAGANA_CONVERSION_RANGE: CodepointRange = (0x3041, 0x3096);
pub const KATAKANA_CONVERSION_RANGE: CodepointRange = (0x30a1, 0x30f6);

/// Distance between a hiragana code point and its katakana counterpart.
const KANA_OFFSET: u32 = KATAKANA_CONVERSION_RANGE.0 - HIRAGANA_CONVERSION_RANGE.0;

/// Shifts every hiragana code point to katakana.
/// Everything outside [`HIRAGANA_CONVERSION_RANGE`] is copied through.
pub fn convert_hiragana_to_katakana<T: AsRef<str>>(text: T) -> String {
    text.as_ref()
        .chars()
        .map(|c| {
            let code_point = c as u32;
            if is_code_point_in_range(code_point, HIRAGANA_CONVERSION_RANGE) {
                char::from_u32(code_point + KANA_OFFSET).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Shifts every katakana code point to hiragana, including `ヵ` and `ヶ`.
/// The prolonged sound mark `ー` sits outside the range and is kept.
pub fn convert_katakana_to_hiragana<T: AsRef<str>>(text: T) -> String {
    text.as_ref()
        .chars()
        .map(|c| {
            let code_point = c as u32;
            if is_code_point_in_range(code_point, KATAKANA_CONVERSION_RANGE) {
                char::from_u32(code_point - KANA_OFFSET).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}
