//! Personal date analysis
//!
//! Derives PIN candidates from calendar dates.

mod components;
mod fragments;
mod templates;

pub use components::{
    DateComponents, DateLabel, extract_components_by_length, extract_date_components, parse_date,
};
pub use fragments::{FragmentIndex, fragment_sources};
pub use templates::{DatePattern, Template, date_patterns, extract_date_patterns, templates_for};
