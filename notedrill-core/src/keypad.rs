//! Keypad symbol decoding shared by the text surfaces
//!
//! A line such as `"C4 E4"` or `"c"` is read as the key presses it spells:
//! letters become letter presses, digits become group presses, whitespace is
//! skipped (the assembler inserts separators itself). A token of several
//! letters with no digit (`bad`, `face`) is a word, not key presses.

use crate::session::ControlEvent;
use crate::types::Letter;

/// Key presses spelled by `line`, or `None` if it contains anything that is
/// not a keypad symbol
pub fn parse_keys(line: &str) -> Option<Vec<ControlEvent>> {
    let mut events = Vec::new();
    for token in line.split_whitespace() {
        if token.chars().count() > 1 && !token.chars().any(|c| c.is_ascii_digit()) {
            return None;
        }
        for c in token.chars() {
            if let Some(letter) = Letter::from_char(c) {
                events.push(ControlEvent::Letter(letter));
            } else if let Some(digit) = c.to_digit(10) {
                events.push(ControlEvent::Group(digit as u8));
            } else {
                return None;
            }
        }
    }
    if events.is_empty() {
        None
    } else {
        Some(events)
    }
}
