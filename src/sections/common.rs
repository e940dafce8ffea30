//! Common PIN section - checks the list of frequently chosen PINs.

use super::{SectionInput, SectionResult, lookup};
use crate::database::PatternCategory;

/// Checks if the PIN is one of the most commonly chosen PINs.
pub fn common_pin_section(input: &SectionInput<'_>) -> SectionResult {
    lookup(input, &[PatternCategory::CommonPin])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::fixtures::{FixtureDatabase, input};
    use crate::types::ReasonCode;

    #[test]
    fn test_common_pin_section_match() {
        let db = FixtureDatabase::default().with(PatternCategory::CommonPin, "2468");
        let result = common_pin_section(&input("2468", None, &db));
        assert_eq!(result, vec![ReasonCode::Pattern(PatternCategory::CommonPin)]);
    }

    #[test]
    fn test_common_pin_section_no_match() {
        let db = FixtureDatabase::default().with(PatternCategory::CommonPin, "2468");
        assert!(common_pin_section(&input("8642", None, &db)).is_empty());
    }

    #[test]
    fn test_common_pin_section_ignores_other_categories() {
        let db = FixtureDatabase::default().with(PatternCategory::Ascending, "2468");
        assert!(common_pin_section(&input("2468", None, &db)).is_empty());
    }
}
