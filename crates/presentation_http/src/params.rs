//! Lenient query-parameter parsing
//!
//! Absent or non-numeric parameters fall back to their defaults and every
//! value is clamped to its documented range. A dashboard URL with a typo in
//! it still renders.

use std::collections::HashMap;

/// Read `key` from the query map, defaulting and clamping
#[must_use]
pub fn clamped(query: &HashMap<String, String>, key: &str, default: u32, min: u32, max: u32) -> u32 {
    query
        .get(key)
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .unwrap_or(default)
        .clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn absent_key_uses_default() {
        assert_eq!(clamped(&query(&[]), "hours", 12, 1, 168), 12);
    }

    #[test]
    fn valid_value_passes_through() {
        assert_eq!(clamped(&query(&[("hours", "24")]), "hours", 12, 1, 168), 24);
    }

    #[test]
    fn garbage_falls_back_to_default() {
        assert_eq!(clamped(&query(&[("hours", "abc")]), "hours", 12, 1, 168), 12);
        assert_eq!(clamped(&query(&[("hours", "-3")]), "hours", 12, 1, 168), 12);
        assert_eq!(clamped(&query(&[("hours", "")]), "hours", 12, 1, 168), 12);
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        assert_eq!(clamped(&query(&[("hours", " 24 ")]), "hours", 12, 1, 168), 24);
    }

    #[test]
    fn values_clamp_to_range() {
        assert_eq!(clamped(&query(&[("hours", "0")]), "hours", 12, 1, 168), 1);
        assert_eq!(clamped(&query(&[("hours", "9999")]), "hours", 12, 1, 168), 168);
    }
}
