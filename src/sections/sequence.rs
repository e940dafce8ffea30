//! Sequence section - detects digit runs and repeated digits.

use super::{SectionInput, SectionResult, lookup};
use crate::database::PatternCategory;

const CATEGORIES: &[PatternCategory] = &[
    PatternCategory::Ascending,
    PatternCategory::Descending,
    PatternCategory::Repeated,
];

/// Checks for ascending, descending and single-digit runs.
pub fn sequence_section(input: &SectionInput<'_>) -> SectionResult {
    lookup(input, CATEGORIES)
}
