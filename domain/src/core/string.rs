//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len.saturating_sub(3).min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

/// Collapse runs of whitespace (including newlines) into single spaces.
///
/// LLM reasoning often spans several lines; debate log entries and table
/// cells want it on one.
pub fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // "€" is 3 bytes; never split inside it
        assert_eq!(truncate("€€€€", 8), "€...");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("Strong ROI.\n\n  Short   payback."), "Strong ROI. Short payback.");
        assert_eq!(single_line(""), "");
    }
}
