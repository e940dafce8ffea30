//! PIN pattern templates derived from a single date.
//!
//! Each template lists which date components are concatenated, in order.
//! Templates whose concatenation does not have exactly the PIN length for a
//! given date are skipped (unpadded day/month forms only fit sometimes).

use std::collections::BTreeSet;

use super::components::{DateComponents, DateLabel, extract_date_components, reverse};
use crate::types::PinLength;

use DateLabel::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub parts: &'static [DateLabel],
    /// The character reversal of the concatenation is a pattern too.
    pub reversible: bool,
}

const fn template(name: &'static str, parts: &'static [DateLabel]) -> Template {
    Template {
        name,
        parts,
        reversible: true,
    }
}

pub const FOUR_DIGIT_TEMPLATES: &[Template] = &[
    template("DAY_MONTH", &[Day, Month]),
    template("MONTH_DAY", &[Month, Day]),
    template("YEAR2_MONTH", &[Year2, Month]),
    template("MONTH_YEAR2", &[Month, Year2]),
    template("YEAR2_DAY", &[Year2, Day]),
    template("DAY_YEAR2", &[Day, Year2]),
    template("DAY_DAY", &[Day, Day]),
    template("MONTH_MONTH", &[Month, Month]),
    template("DAY_MONTH_YEAR2_UNPADDED", &[DayUnpadded, MonthUnpadded, Year2]),
    template("MONTH_DAY_YEAR2_UNPADDED", &[MonthUnpadded, DayUnpadded, Year2]),
    Template {
        name: "YEAR4_REVERSED",
        parts: &[Year4Reversed],
        reversible: false,
    },
];

pub const SIX_DIGIT_TEMPLATES: &[Template] = &[
    template("DAY_MONTH_YEAR2", &[Day, Month, Year2]),
    template("MONTH_DAY_YEAR2", &[Month, Day, Year2]),
    template("YEAR2_MONTH_DAY", &[Year2, Month, Day]),
    template("DAY_YEAR2_MONTH", &[Day, Year2, Month]),
    template("MONTH_YEAR2_DAY", &[Month, Year2, Day]),
    template("YEAR2_DAY_MONTH", &[Year2, Day, Month]),
    template("YEAR4_DAY", &[Year4, Day]),
    template("DAY_YEAR4", &[Day, Year4]),
    template("YEAR4_MONTH", &[Year4, Month]),
    template("MONTH_YEAR4", &[Month, Year4]),
    template("DAY_DAY_DAY", &[Day, Day, Day]),
    template("MONTH_MONTH_MONTH", &[Month, Month, Month]),
    template("DAY_MONTH_DAY", &[Day, Month, Day]),
    template("MONTH_DAY_MONTH", &[Month, Day, Month]),
    template("DAY_DAY_YEAR2", &[Day, Day, Year2]),
    template("YEAR2_DAY_DAY", &[Year2, Day, Day]),
    template("DAY_YEAR2_DAY", &[Day, Year2, Day]),
    template("DAY_MONTH_YEAR4_UNPADDED", &[DayUnpadded, MonthUnpadded, Year4]),
    template("MONTH_DAY_YEAR4_UNPADDED", &[MonthUnpadded, DayUnpadded, Year4]),
    template("YEAR2_DAY_MONTH_MIRRORED", &[Year2Reversed, Day, MonthReversed]),
    template("DAY_MONTH_YEAR2_MIRRORED", &[DayReversed, Month, Year2Reversed]),
];

/// Name under which the verbatim 4-digit year is reported for 4-digit PINs.
pub const YEAR4_TEMPLATE: &str = "YEAR4";

pub fn templates_for(length: PinLength) -> &'static [Template] {
    match length {
        PinLength::Four => FOUR_DIGIT_TEMPLATES,
        PinLength::Six => SIX_DIGIT_TEMPLATES,
    }
}

/// A candidate PIN together with the template that produced it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DatePattern {
    pub value: String,
    pub template: &'static str,
    pub reversed: bool,
}

impl Template {
    /// Concatenates the template parts; `None` if a component is missing.
    pub fn render(&self, components: &DateComponents) -> Option<String> {
        self.parts
            .iter()
            .map(|label| components.get(*label))
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.concat())
    }
}

/// Every labeled pattern of exactly `length` digits derived from `components`.
pub fn date_patterns(components: &DateComponents, length: PinLength) -> Vec<DatePattern> {
    let target = length.as_usize();
    let mut patterns = Vec::new();

    for template in templates_for(length) {
        let Some(value) = template.render(components) else {
            continue;
        };
        if value.len() != target {
            continue;
        }
        let reversed = reverse(&value);
        if template.reversible && reversed != value {
            patterns.push(DatePattern {
                value: reversed,
                template: template.name,
                reversed: true,
            });
        }
        patterns.push(DatePattern {
            value,
            template: template.name,
            reversed: false,
        });
    }

    if length == PinLength::Four {
        if let Some(year) = components.get(DateLabel::Year4) {
            patterns.push(DatePattern {
                value: year.to_string(),
                template: YEAR4_TEMPLATE,
                reversed: false,
            });
        }
    }

    patterns
}

/// Builds the deduplicated set of PIN candidates for `date`.
///
/// Unparsable dates and unsupported lengths give an empty list.
pub fn extract_date_patterns(date: &str, pin_length: usize) -> Vec<String> {
    let Some(length) = PinLength::from_len(pin_length) else {
        return Vec::new();
    };
    let components = extract_date_components(date);
    date_patterns(&components, length)
        .into_iter()
        .map(|p| p.value)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
