//! Keypad section - detects straight lines and knight moves on the keypad.

use super::{SectionInput, SectionResult, lookup};
use crate::database::PatternCategory;

const CATEGORIES: &[PatternCategory] = &[
    PatternCategory::KeypadHorizontal,
    PatternCategory::KeypadVertical,
    PatternCategory::KeypadDiagonal,
    PatternCategory::KeypadKnight,
];

/// Checks the PIN against keypad shapes. Every matching shape is reported.
pub fn keypad_section(input: &SectionInput<'_>) -> SectionResult {
    lookup(input, CATEGORIES)
}
