/// 1 - minInclusive
/// 2 - maxInclusive
pub type CodepointRange = (u32, u32);

/// The only ideograph block 字通 headwords are matched against.
pub const CJK_UNIFIED_IDEOGRAPHS_RANGE: CodepointRange = (0x4e00, 0x9fff);

pub fn is_code_point_in_range(code_point: u32, range: CodepointRange) -> bool {
    code_point >= range.0 && code_point <= range.1
}

pub fn is_ideograph(c: char) -> bool {
    is_code_point_in_range(c as u32, CJK_UNIFIED_IDEOGRAPHS_RANGE)
}

/// Ideographs in `text`, in order, repeats included.
pub fn ideographs(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().filter(|&c| is_ideograph(c))
}

pub fn contains_ideograph(text: &str) -> bool {
    ideographs(text).next().is_some()
}
