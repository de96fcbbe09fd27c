//! Text utilities for TUI rendering.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string with ellipsis if it exceeds max_width (unicode-aware).
///
/// Keeps the tail of the text instead of the head when `keep_end` is set,
/// which is what an input field wants while the cursor sits at the end.
pub fn truncate_with_ellipsis(text: &str, max_width: usize, keep_end: bool) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let budget = max_width - 1;
    let mut kept: Vec<char> = Vec::new();
    let mut width = 0;
    let chars: Box<dyn Iterator<Item = char>> = if keep_end {
        Box::new(text.chars().rev())
    } else {
        Box::new(text.chars())
    };
    for ch in chars {
        let w = ch.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        kept.push(ch);
    }
    if keep_end {
        let mut out = String::from("…");
        out.extend(kept.into_iter().rev());
        out
    } else {
        let mut out: String = kept.into_iter().collect();
        out.push('…');
        out
    }
}

/// Replaces every character with a bullet.
pub fn mask(text: &str) -> String {
    "•".repeat(text.chars().count())
}
