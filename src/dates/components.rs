//! Date component extraction.
//!
//! Turns a `YYYY-MM-DD` date into the labeled digit fragments a user could
//! reuse when choosing a PIN.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

/// Closed set of component labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateLabel {
    Day,
    DayUnpadded,
    DayReversed,
    Month,
    MonthUnpadded,
    MonthReversed,
    Year2,
    Year2Reversed,
    Year4,
    Year4Reversed,
    YearHead,
    YearTail,
    YearDigit1,
    YearDigit2,
    YearDigit3,
    YearDigit4,
    /// Whole `YYYYMMDD` string reversed; the only 8-digit value.
    DateReversed,
}

impl DateLabel {
    pub const ALL: [DateLabel; 17] = [
        DateLabel::Day,
        DateLabel::DayUnpadded,
        DateLabel::DayReversed,
        DateLabel::Month,
        DateLabel::MonthUnpadded,
        DateLabel::MonthReversed,
        DateLabel::Year2,
        DateLabel::Year2Reversed,
        DateLabel::Year4,
        DateLabel::Year4Reversed,
        DateLabel::YearHead,
        DateLabel::YearTail,
        DateLabel::YearDigit1,
        DateLabel::YearDigit2,
        DateLabel::YearDigit3,
        DateLabel::YearDigit4,
        DateLabel::DateReversed,
    ];

    const YEAR_DIGITS: [DateLabel; 4] = [
        DateLabel::YearDigit1,
        DateLabel::YearDigit2,
        DateLabel::YearDigit3,
        DateLabel::YearDigit4,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DateLabel::Day => "day",
            DateLabel::DayUnpadded => "day_unpadded",
            DateLabel::DayReversed => "day_reversed",
            DateLabel::Month => "month",
            DateLabel::MonthUnpadded => "month_unpadded",
            DateLabel::MonthReversed => "month_reversed",
            DateLabel::Year2 => "year2",
            DateLabel::Year2Reversed => "year2_reversed",
            DateLabel::Year4 => "year4",
            DateLabel::Year4Reversed => "year4_reversed",
            DateLabel::YearHead => "year_head",
            DateLabel::YearTail => "year_tail",
            DateLabel::YearDigit1 => "year_digit1",
            DateLabel::YearDigit2 => "year_digit2",
            DateLabel::YearDigit3 => "year_digit3",
            DateLabel::YearDigit4 => "year_digit4",
            DateLabel::DateReversed => "date_reversed",
        }
    }
}

/// Labeled digit fragments of one date. Empty when the date was unparsable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateComponents {
    values: BTreeMap<DateLabel, String>,
}

impl DateComponents {
    pub fn from_date(date: NaiveDate) -> Option<Self> {
        let year = date.year();
        if !(1000..=9999).contains(&year) {
            return None;
        }

        let day = format!("{:02}", date.day());
        let month = format!("{:02}", date.month());
        let year4 = year.to_string();
        let year2 = year4[2..].to_string();

        let mut values = BTreeMap::new();
        values.insert(DateLabel::DayUnpadded, date.day().to_string());
        values.insert(DateLabel::DayReversed, reverse(&day));
        values.insert(DateLabel::MonthUnpadded, date.month().to_string());
        values.insert(DateLabel::MonthReversed, reverse(&month));
        values.insert(DateLabel::Year2Reversed, reverse(&year2));
        values.insert(DateLabel::Year4Reversed, reverse(&year4));
        values.insert(DateLabel::YearHead, year4[..2].to_string());
        values.insert(DateLabel::YearTail, year2.clone());
        for (label, digit) in DateLabel::YEAR_DIGITS.into_iter().zip(year4.chars()) {
            values.insert(label, digit.to_string());
        }
        values.insert(
            DateLabel::DateReversed,
            reverse(&format!("{year4}{month}{day}")),
        );
        values.insert(DateLabel::Day, day);
        values.insert(DateLabel::Month, month);
        values.insert(DateLabel::Year2, year2);
        values.insert(DateLabel::Year4, year4);

        Some(Self { values })
    }

    pub fn get(&self, label: DateLabel) -> Option<&str> {
        self.values.get(&label).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DateLabel, &str)> {
        self.values.iter().map(|(label, value)| (*label, value.as_str()))
    }
}

pub(crate) fn reverse(value: &str) -> String {
    value.chars().rev().collect()
}

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    let bytes = input.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}

/// Extracts every labeled component of `date`.
///
/// Unparsable input yields an empty mapping, never an error.
pub fn extract_date_components(date: &str) -> DateComponents {
    match parse_date(date).and_then(DateComponents::from_date) {
        Some(components) => components,
        None => {
            #[cfg(feature = "tracing")]
            tracing::debug!("Ignoring unparsable date input");
            DateComponents::default()
        }
    }
}

/// Returns component values of exactly `length` digits, plus every
/// `length`-wide window of longer values.
pub fn extract_components_by_length(components: &DateComponents, length: usize) -> Vec<String> {
    if length == 0 {
        return Vec::new();
    }

    let mut extracted: Vec<String> = components
        .iter()
        .filter(|(_, value)| value.len() == length)
        .map(|(_, value)| value.to_string())
        .collect();

    for (_, value) in components.iter().filter(|(_, value)| value.len() > length) {
        // Component values are ASCII digits, so byte windows are char windows.
        extracted.extend(
            value
                .as_bytes()
                .windows(length)
                .map(|w| String::from_utf8_lossy(w).into_owned()),
        );
    }

    extracted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn components(date: &str) -> DateComponents {
        let components = extract_date_components(date);
        assert!(!components.is_empty(), "expected components for {}", date);
        components
    }

    #[test]
    fn test_extract_all_labels() {
        let c = components("1995-08-15");
        assert_eq!(c.len(), DateLabel::ALL.len());
        assert_eq!(c.get(DateLabel::Day), Some("15"));
        assert_eq!(c.get(DateLabel::DayUnpadded), Some("15"));
        assert_eq!(c.get(DateLabel::DayReversed), Some("51"));
        assert_eq!(c.get(DateLabel::Month), Some("08"));
        assert_eq!(c.get(DateLabel::MonthUnpadded), Some("8"));
        assert_eq!(c.get(DateLabel::MonthReversed), Some("80"));
        assert_eq!(c.get(DateLabel::Year2), Some("95"));
        assert_eq!(c.get(DateLabel::Year2Reversed), Some("59"));
        assert_eq!(c.get(DateLabel::Year4), Some("1995"));
        assert_eq!(c.get(DateLabel::Year4Reversed), Some("5991"));
        assert_eq!(c.get(DateLabel::YearHead), Some("19"));
        assert_eq!(c.get(DateLabel::YearTail), Some("95"));
        assert_eq!(c.get(DateLabel::YearDigit1), Some("1"));
        assert_eq!(c.get(DateLabel::YearDigit2), Some("9"));
        assert_eq!(c.get(DateLabel::YearDigit3), Some("9"));
        assert_eq!(c.get(DateLabel::YearDigit4), Some("5"));
        assert_eq!(c.get(DateLabel::DateReversed), Some("51805991"));
    }

    #[test]
    fn test_component_values_are_digits_of_expected_length() {
        for date in ["2004-07-25", "1998-05-01", "2000-01-01", "1987-12-31"] {
            for (label, value) in components(date).iter() {
                assert!(value.chars().all(|c| c.is_ascii_digit()));
                if label == DateLabel::DateReversed {
                    assert_eq!(value.len(), 8);
                } else {
                    assert!(
                        matches!(value.len(), 1 | 2 | 4),
                        "{} has length {}",
                        label.as_str(),
                        value.len()
                    );
                }
            }
        }
    }

    #[test]
    fn test_unpadded_forms() {
        let c = components("2004-07-05");
        assert_eq!(c.get(DateLabel::Day), Some("05"));
        assert_eq!(c.get(DateLabel::DayUnpadded), Some("5"));
        assert_eq!(c.get(DateLabel::DayReversed), Some("50"));
        assert_eq!(c.get(DateLabel::MonthUnpadded), Some("7"));
        assert_eq!(c.get(DateLabel::Year2), Some("04"));
    }

    #[test]
    fn test_invalid_dates_yield_empty_components() {
        for date in [
            "",
            "not-a-date",
            "2012-12-34",
            "2023-02-30",
            "1995/08/15",
            "95-08-15",
            "1995-8-15",
            "0999-01-01",
        ] {
            assert!(
                extract_date_components(date).is_empty(),
                "expected no components for {:?}",
                date
            );
        }
    }

    #[test]
    fn test_leap_day_is_valid() {
        let c = components("2000-02-29");
        assert_eq!(c.get(DateLabel::Day), Some("29"));
        assert!(extract_date_components("2001-02-29").is_empty());
    }

    #[test]
    fn test_extraction_is_deterministic() {
        assert_eq!(components("1995-08-15"), components("1995-08-15"));
    }

    #[test]
    fn test_components_by_length_exact_and_windows() {
        let c = components("1995-08-15");
        let two = extract_components_by_length(&c, 2);
        for expected in ["15", "08", "51", "80", "95", "59", "19"] {
            assert!(two.contains(&expected.to_string()), "missing {}", expected);
        }
        // windows of 1995 and of the reversed full date
        assert!(two.contains(&"99".to_string()));
        assert!(two.contains(&"18".to_string()));
        assert!(two.iter().all(|v| v.len() == 2));

        let four = extract_components_by_length(&c, 4);
        assert!(four.contains(&"1995".to_string()));
        assert!(four.contains(&"5991".to_string()));
        assert!(four.contains(&"8059".to_string()));
        assert!(four.iter().all(|v| v.len() == 4));
    }

    #[test]
    fn test_components_by_length_empty_inputs() {
        let empty = DateComponents::default();
        assert!(extract_components_by_length(&empty, 2).is_empty());
        let c = components("1995-08-15");
        assert!(extract_components_by_length(&c, 0).is_empty());
        assert!(extract_components_by_length(&c, 9).is_empty());
    }
}
