//! Helper functions and utilities
//! 
//! This module contains common helper functions used throughout the application.

/// Calculate pagination offset for a 1-based page number
pub fn calculate_offset(page: u32, page_size: u32) -> i64 {
    page.saturating_sub(1) as i64 * page_size as i64
}

/// Strip a leading list marker such as `-`, `*`, `•` or `1.` from a line
pub fn strip_list_marker(line: &str) -> &str {
    let trimmed = line.trim();

    for marker in ["- ", "* ", "• "] {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            return rest.trim_start();
        }
    }

    let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &trimmed[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return rest.trim_start();
        }
    }

    trimmed
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_offset() {
        assert_eq!(calculate_offset(1, 20), 0);
        assert_eq!(calculate_offset(3, 20), 40);
        assert_eq!(calculate_offset(0, 20), 0);
    }

    #[test]
    fn test_strip_list_marker() {
        assert_eq!(strip_list_marker("- Teams of four"), "Teams of four");
        assert_eq!(strip_list_marker("  * Be kind"), "Be kind");
        assert_eq!(strip_list_marker("• Submit on time"), "Submit on time");
        assert_eq!(strip_list_marker("12. Twelfth rule"), "Twelfth rule");
        assert_eq!(strip_list_marker("3) Third"), "Third");
        assert_eq!(strip_list_marker("2024 edition rules"), "2024 edition rules");
        assert_eq!(strip_list_marker("-5 points for late work"), "-5 points for late work");
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a   b\tc "), "a b c");
    }
}
