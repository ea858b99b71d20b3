//! Search functionality for filtering listings.
//!
//! This module encapsulates the matching logic so the underlying
//! implementation can be swapped without touching the rest of the codebase.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// A matcher for fuzzy searching text.
pub struct Matcher {
    inner: SkimMatcherV2,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher {
    pub fn new() -> Self {
        Self {
            inner: SkimMatcherV2::default(),
        }
    }

    /// Check if the text matches the pattern using fuzzy matching.
    ///
    /// Matching is case-insensitive and allows non-consecutive characters,
    /// so "elec" matches "Electricista" and "jprz" matches "Juan Pérez".
    pub fn matches(&self, text: &str, pattern: &str) -> bool {
        let pattern_lower = pattern.to_lowercase();
        self.inner.fuzzy_match(text, &pattern_lower).is_some()
    }

    /// Check if any of the provided texts match the pattern.
    pub fn matches_any<'a>(&self, texts: impl IntoIterator<Item = &'a str>, pattern: &str) -> bool {
        texts.into_iter().any(|text| self.matches(text, pattern))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzzy_match() {
        let matcher = Matcher::new();

        assert!(matcher.matches("Electricista", "elec"));
        assert!(matcher.matches("Instalaciones", "inst"));
        assert!(matcher.matches("Juan Pérez", "juan"));

        // Non-consecutive characters
        assert!(matcher.matches("plomero", "plm"));

        // Case-insensitive
        assert!(matcher.matches("CARPINTERO", "carp"));
        assert!(matcher.matches("carpintero", "CARP"));

        // No match
        assert!(!matcher.matches("pintor", "xyz"));
    }

    #[test]
    fn test_matches_any() {
        let matcher = Matcher::new();

        let specialties = ["Instalaciones", "Reparaciones"];
        assert!(matcher.matches_any(specialties, "repar"));
        assert!(!matcher.matches_any(specialties, "xyz"));
    }
}
