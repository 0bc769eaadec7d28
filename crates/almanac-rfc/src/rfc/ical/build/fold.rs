//! Description folding.

use almanac_core::constants::DESCRIPTION_FOLD_WIDTH;

use super::escape::escape_text;

/// Escapes a description and folds it into continuation lines.
///
/// When the escaped text is longer than `DESCRIPTION_FOLD_WIDTH` characters,
/// a CRLF and a single space are inserted before every
/// `DESCRIPTION_FOLD_WIDTH`-th character. Chunks count code points, not
/// octets, so multi-byte text may exceed 75 octets per physical line.
#[must_use]
pub fn fold_description(s: &str) -> String {
    fold_every(&escape_text(s), DESCRIPTION_FOLD_WIDTH)
}

fn fold_every(text: &str, width: usize) -> String {
    if width == 0 || text.chars().count() <= width {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len() + (text.len() / width) * 3);
    for (i, c) in text.chars().enumerate() {
        if i > 0 && i % width == 0 {
            result.push_str("\r\n ");
        }
        result.push(c);
    }
    result
}
