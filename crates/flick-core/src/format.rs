//! Display formatting for a single token.

use alloc::string::{String, ToString};

/// Presentation toggle, independent of playback state.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DisplayMode {
    Naive,
    #[default]
    Orp,
}

/// Character index of the optimal recognition point for a word of
/// `char_count` characters, or `None` when the word is too short to carry one.
pub const fn orp_char_index(char_count: usize) -> Option<usize> {
    match char_count {
        0 | 1 => None,
        2..=5 => Some(1),
        6..=9 => Some(2),
        10..=13 => Some(3),
        _ => Some(4),
    }
}

/// Render `token` for display. In ORP mode the focal character is wrapped in
/// brackets, e.g. `hello` becomes `h[e]llo`.
pub fn format_word(token: &str, mode: DisplayMode) -> String {
    if mode == DisplayMode::Naive {
        return token.to_string();
    }

    let Some(focal) = orp_char_index(token.chars().count()) else {
        return token.to_string();
    };

    let mut out = String::with_capacity(token.len() + 2);
    for (idx, ch) in token.chars().enumerate() {
        if idx == focal {
            out.push('[');
            out.push(ch);
            out.push(']');
        } else {
            out.push(ch);
        }
    }
    out
}
