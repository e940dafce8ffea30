//! Demographic section - detects PINs derived from personal dates.

use super::{SectionInput, SectionResult};
use crate::dates::{FragmentIndex, date_patterns, extract_date_components, fragment_sources};
use crate::types::ReasonCode;

/// Checks the PIN against patterns built from each provided date.
///
/// Every template producing the PIN is reported once per date. When no
/// template matches, the PIN is checked for fragments taken from one or more
/// of the dates.
pub fn demographic_section(input: &SectionInput<'_>) -> SectionResult {
    let Some(demographics) = input.demographics else {
        return Vec::new();
    };

    let mut reasons: SectionResult = Vec::new();
    let mut indexes = Vec::new();

    for (source, date) in demographics.dates() {
        let components = extract_date_components(date);
        if components.is_empty() {
            continue;
        }

        for pattern in date_patterns(&components, input.length) {
            if pattern.value != input.pin {
                continue;
            }
            let reason = ReasonCode::Demographic {
                source,
                template: pattern.template,
                reversed: pattern.reversed,
            };
            if !reasons.contains(&reason) {
                reasons.push(reason);
            }
        }

        indexes.push(FragmentIndex::new(source, &components));
    }

    if reasons.is_empty() {
        reasons.extend(
            fragment_sources(input.pin, input.length, &indexes)
                .into_iter()
                .map(|source| ReasonCode::DemographicFragments { source }),
        );
    }

    reasons
}
