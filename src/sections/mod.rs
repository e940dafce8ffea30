//! PIN evaluation sections
//!
//! Each section checks one family of weaknesses and reports the rules it
//! triggered, in detection order.

mod common;
mod demographic;
mod keypad;
mod sequence;

pub use common::common_pin_section;
pub use demographic::demographic_section;
pub use keypad::keypad_section;
pub use sequence::sequence_section;

use crate::database::{PatternCategory, PatternDatabase};
use crate::types::{Demographics, PinLength, ReasonCode};

/// Everything a section may look at. The PIN is already format-checked.
pub struct SectionInput<'a> {
    pub pin: &'a str,
    pub length: PinLength,
    pub demographics: Option<&'a Demographics>,
    pub database: &'a dyn PatternDatabase,
}

/// Reason codes triggered by a section; empty when the section passed.
pub type SectionResult = Vec<ReasonCode>;

fn lookup(input: &SectionInput<'_>, categories: &[PatternCategory]) -> SectionResult {
    categories
        .iter()
        .filter(|category| input.database.contains(**category, input.pin))
        .map(|category| ReasonCode::Pattern(*category))
        .collect()
}
