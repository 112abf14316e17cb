//! Text helpers for fitting log lines and labels into terminal columns.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates `text` to `max_width` columns, ending with `…` when cut.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        width += ch_width;
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

/// Display width of `text` in columns, saturating at `u16::MAX`.
pub fn columns(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_with_ellipsis("net up", 10), "net up");
    }

    #[test]
    fn test_truncate_long_text() {
        assert_eq!(
            truncate_with_ellipsis("Starting network services...", 10),
            "Starting …"
        );
    }

    #[test]
    fn test_truncate_wide_chars() {
        assert_eq!(truncate_with_ellipsis("日本語テキスト", 7), "日本語…");
    }

    #[test]
    fn test_truncate_tiny_width() {
        assert_eq!(truncate_with_ellipsis("hello", 1), "…");
    }
}
