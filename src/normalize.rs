//! Whitespace stripping ahead of parsing.

/// Removes every space character (`0x20`) from `text`. No other whitespace
/// class is recognised — a tab or newline in the input passes through
/// unchanged and will be rejected later by the parser as an unexpected
/// character.
pub fn normalise(text: &str) -> String {
    let mut dense = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch != ' ' {
            dense.push(ch);
        }
    }
    dense
}
