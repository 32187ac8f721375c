//! Helpers for putting device output into logs and diagnostics.
//! The Meshtastic CLI prints multi-line banners; these keep log lines single-line and short.

use std::fmt::Write;

/// Escape a string for single-line logging:
/// - `\n` => `\\n`
/// - `\r` => `\\r`
/// - `\t` => `\\t`
/// - backslash => `\\\\`
///   Output is capped at `max_chars` source characters with a trailing ellipsis.
pub fn escape_log(s: &str, max_chars: usize) -> String {
    let mut out = String::with_capacity(s.len().min(max_chars) + 8);
    for (count, ch) in s.chars().enumerate() {
        if count >= max_chars {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

/// First `max_chars` characters of `s`, with `…` appended when anything was cut.
/// Never splits a multi-byte character.
pub fn preview(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let mut out = s[..cut].to_string();
            out.push('…');
            out
        }
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{escape_log, preview};

    #[test]
    fn escapes_newlines_and_truncates() {
        let s = "Line1\nLine2\r\tEnd";
        assert_eq!(escape_log(s, 300), "Line1\\nLine2\\r\\tEnd");
        assert_eq!(escape_log("abcdef", 3), "abc…");
    }

    #[test]
    fn escapes_other_control_chars_as_hex() {
        assert_eq!(escape_log("a\u{1b}[0m", 300), "a\\x1B[0m");
    }

    #[test]
    fn preview_respects_char_boundaries() {
        assert_eq!(preview("ab🙂cd", 3), "ab🙂…");
        assert_eq!(preview("hello", 10), "hello");
        assert_eq!(preview("hello", 5), "hello");
    }
}
