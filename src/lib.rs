//! Mobile banking PIN strength evaluation library
//!
//! This library rates 4 and 6 digit PINs by checking them against common
//! choices, digit runs, keypad shapes and patterns derived from the user's
//! personal dates (birth dates, anniversary).
//!
//! # Features
//!
//! - `async` (default): Enables channel based and batch evaluation with cancellation support
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `MPIN_COMMON_PINS_PATH`: Custom path to a common PIN list, used by
//!   [`StaticPatternDatabase::from_env`] (default: `./assets/common-pins.txt`)
//!
//! # Example
//!
//! ```rust
//! use mpin_strength::{Demographics, PinStrength, validate_pin};
//! use secrecy::SecretString;
//!
//! let demographics = Demographics::new().with_dob("1995-08-15");
//! let pin = SecretString::new("1508".to_string().into());
//!
//! let result = validate_pin(&pin, Some(&demographics));
//!
//! assert!(result.strength() <= PinStrength::Weak);
//! println!("Score: {:?}", result.score);
//! println!("Reasons: {:?}", result.reason_codes());
//! ```

// Internal modules
mod database;
mod dates;
mod sections;
mod types;
mod validator;

// Public API
pub use database::{
    COMMON_FOUR_DIGIT, COMMON_PINS_PATH_VAR, COMMON_SIX_DIGIT, DatabaseError, PatternCategory,
    PatternDatabase, StaticPatternDatabase, common_pins_path,
};
pub use dates::{
    DateComponents, DateLabel, DatePattern, Template, date_patterns, extract_components_by_length,
    extract_date_components, extract_date_patterns, parse_date, templates_for,
};
pub use types::{
    DateSource, Demographics, PinFormatError, PinLength, PinScore, PinStrength, ReasonCode,
    ValidationResult,
};
pub use validator::{PinValidator, SCORE_FLOOR, ScoreAccumulator, base_score, validate_pin};

#[cfg(feature = "async")]
pub use validator::{validate_batch_tx, validate_pin_tx};
