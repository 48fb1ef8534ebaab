//! Log sanitization utilities
//!
//! Keeps upstream payloads (account balances, order lists) out of the logs
//! in full: bodies are flattened onto one line and cut short.

/// Characters of a payload kept in a log line.
const LOG_CHAR_LIMIT: usize = 256;

/// Render `s` for a single log line.
///
/// Line breaks and runs of whitespace collapse to one space, and anything past
/// [`LOG_CHAR_LIMIT`] characters is replaced by a note with the byte length.
pub fn truncate_for_log(s: &str) -> String {
    let mut flat = String::with_capacity(s.len().min(LOG_CHAR_LIMIT + 8));
    let mut kept = 0;
    for word in s.split_whitespace() {
        if kept >= LOG_CHAR_LIMIT {
            break;
        }
        if kept > 0 {
            flat.push(' ');
            kept += 1;
        }
        for ch in word.chars() {
            if kept >= LOG_CHAR_LIMIT {
                break;
            }
            flat.push(ch);
            kept += 1;
        }
    }

    let total_chars = s.split_whitespace().map(|w| w.chars().count() + 1).sum::<usize>();
    if total_chars.saturating_sub(1) > LOG_CHAR_LIMIT {
        format!("{flat}... [truncated, total {} bytes]", s.len())
    } else {
        flat
    }
}
