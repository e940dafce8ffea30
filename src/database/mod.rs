//! Common pattern database
//!
//! Read-only lookup of well-known weak PINs: common choices, digit runs,
//! repeated digits and keypad shapes.

mod common;
mod keypad;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::types::PinLength;

pub use common::{COMMON_FOUR_DIGIT, COMMON_SIX_DIGIT};

/// Environment variable pointing to a custom common-PIN list.
pub const COMMON_PINS_PATH_VAR: &str = "MPIN_COMMON_PINS_PATH";

const DEFAULT_COMMON_PINS_PATH: &str = "./assets/common-pins.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternCategory {
    CommonPin,
    Ascending,
    Descending,
    Repeated,
    KeypadHorizontal,
    KeypadVertical,
    KeypadDiagonal,
    KeypadKnight,
}

impl PatternCategory {
    /// All categories, in the order the validator checks them.
    pub const ALL: [PatternCategory; 8] = [
        PatternCategory::CommonPin,
        PatternCategory::Ascending,
        PatternCategory::Descending,
        PatternCategory::Repeated,
        PatternCategory::KeypadHorizontal,
        PatternCategory::KeypadVertical,
        PatternCategory::KeypadDiagonal,
        PatternCategory::KeypadKnight,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            PatternCategory::CommonPin => "COMMONLY_USED",
            PatternCategory::Ascending => "SEQUENCE_ASCENDING",
            PatternCategory::Descending => "SEQUENCE_DESCENDING",
            PatternCategory::Repeated => "REPEATED_DIGITS",
            PatternCategory::KeypadHorizontal => "KEYPAD_HORIZONTAL",
            PatternCategory::KeypadVertical => "KEYPAD_VERTICAL",
            PatternCategory::KeypadDiagonal => "KEYPAD_DIAGONAL",
            PatternCategory::KeypadKnight => "KEYPAD_KNIGHT_MOVE",
        }
    }
}

/// Source of known weak PINs queried by the validator.
///
/// The PIN length is implied by the candidate itself.
pub trait PatternDatabase: Send + Sync {
    fn contains(&self, category: PatternCategory, pin: &str) -> bool;
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Common PIN file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read common PIN file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Common PIN file is empty")]
    EmptyFile,
    #[error("Invalid common PIN entry at line {line}: {entry:?}")]
    InvalidEntry { line: usize, entry: String },
}

/// In-memory pattern tables, built once and never mutated.
#[derive(Debug, Clone)]
pub struct StaticPatternDatabase {
    tables: HashMap<(PatternCategory, PinLength), HashSet<String>>,
}

impl StaticPatternDatabase {
    /// Built-in common PINs plus generated runs and keypad shapes.
    pub fn builtin() -> Self {
        let mut tables = HashMap::new();
        for length in PinLength::ALL {
            let n = length.as_usize();
            tables.insert((PatternCategory::CommonPin, length), common::common_pins(n));
            tables.insert((PatternCategory::Ascending, length), common::digit_runs(1, n));
            tables.insert((PatternCategory::Descending, length), common::digit_runs(-1, n));
            tables.insert((PatternCategory::Repeated, length), common::repeated_digits(n));
            tables.insert(
                (PatternCategory::KeypadHorizontal, length),
                keypad::line_sequences(keypad::HORIZONTAL, n),
            );
            tables.insert(
                (PatternCategory::KeypadVertical, length),
                keypad::line_sequences(keypad::VERTICAL, n),
            );
            tables.insert(
                (PatternCategory::KeypadDiagonal, length),
                keypad::line_sequences(keypad::DIAGONAL, n),
            );
            tables.insert(
                (PatternCategory::KeypadKnight, length),
                keypad::knight_sequences(n),
            );
        }
        Self { tables }
    }

    /// Built-in tables with the common PIN lists replaced by the file at `path`.
    ///
    /// The file holds one PIN per line; blank lines are skipped. Entries must
    /// be 4 or 6 ASCII digits.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File does not exist
    /// - File cannot be read
    /// - File is empty
    /// - A line is not a valid PIN
    pub fn with_common_pins_from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        let path = path.as_ref();

        if !path.exists() {
            #[cfg(feature = "tracing")]
            tracing::error!("Common PIN list loading FAILED: FileNotFound {:?}", path);
            return Err(DatabaseError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;

        if content.trim().is_empty() {
            #[cfg(feature = "tracing")]
            tracing::error!("Common PIN list loading FAILED: Empty file {:?}", path);
            return Err(DatabaseError::EmptyFile);
        }

        let mut common: HashMap<PinLength, HashSet<String>> = PinLength::ALL
            .into_iter()
            .map(|length| (length, HashSet::new()))
            .collect();

        for (index, line) in content.lines().enumerate() {
            let entry = line.trim();
            if entry.is_empty() {
                continue;
            }
            let length = PinLength::parse(entry).map_err(|_| DatabaseError::InvalidEntry {
                line: index + 1,
                entry: entry.to_string(),
            })?;
            common.entry(length).or_default().insert(entry.to_string());
        }

        #[cfg(feature = "tracing")]
        tracing::info!(
            "Common PIN list loaded: {} PINs from {:?}",
            common.values().map(HashSet::len).sum::<usize>(),
            path
        );

        let mut database = Self::builtin();
        for (length, pins) in common {
            database
                .tables
                .insert((PatternCategory::CommonPin, length), pins);
        }

        Ok(database)
    }

    /// Loads the common PIN list from the configured path.
    ///
    /// # Environment Variable
    ///
    /// Set `MPIN_COMMON_PINS_PATH` to specify a custom list location.
    /// If not set, defaults to `./assets/common-pins.txt`.
    pub fn from_env() -> Result<Self, DatabaseError> {
        Self::with_common_pins_from_path(common_pins_path())
    }

    /// Number of entries in one table.
    pub fn len(&self, category: PatternCategory, length: PinLength) -> usize {
        self.tables
            .get(&(category, length))
            .map(HashSet::len)
            .unwrap_or(0)
    }
}

impl Default for StaticPatternDatabase {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PatternDatabase for StaticPatternDatabase {
    fn contains(&self, category: PatternCategory, pin: &str) -> bool {
        PinLength::from_len(pin.len())
            .and_then(|length| self.tables.get(&(category, length)))
            .is_some_and(|table| table.contains(pin))
    }
}

/// Returns the common PIN list path.
///
/// Priority:
/// 1. Environment variable `MPIN_COMMON_PINS_PATH`
/// 2. Default path `./assets/common-pins.txt`
pub fn common_pins_path() -> PathBuf {
    std::env::var(COMMON_PINS_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_COMMON_PINS_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper to safely set env var in tests
    fn set_env(key: &str, value: &str) {
        // SAFETY: This is only for testing purposes in single-threaded test context
        unsafe { std::env::set_var(key, value); }
    }

    /// Helper to safely remove env var in tests
    fn remove_env(key: &str) {
        // SAFETY: This is only for testing purposes in single-threaded test context
        unsafe { std::env::remove_var(key); }
    }

    fn setup_with_tempfile(lines: &[&str]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        for line in lines {
            writeln!(temp_file, "{}", line).expect("Failed to write");
        }
        temp_file
    }

    #[test]
    fn test_builtin_categories() {
        let db = StaticPatternDatabase::builtin();
        assert!(db.contains(PatternCategory::CommonPin, "1234"));
        assert!(db.contains(PatternCategory::CommonPin, "123456"));
        assert!(db.contains(PatternCategory::Ascending, "3456"));
        assert!(db.contains(PatternCategory::Descending, "987654"));
        assert!(db.contains(PatternCategory::Repeated, "0000"));
        assert!(db.contains(PatternCategory::KeypadHorizontal, "4565"));
        assert!(db.contains(PatternCategory::KeypadVertical, "2580"));
        assert!(db.contains(PatternCategory::KeypadDiagonal, "1595"));
        assert!(db.contains(PatternCategory::KeypadKnight, "1672"));
    }

    #[test]
    fn test_random_pin_is_in_no_category() {
        let db = StaticPatternDatabase::builtin();
        for pin in ["1397", "8193", "395739"] {
            for category in PatternCategory::ALL {
                assert!(!db.contains(category, pin), "{} matched {:?}", pin, category);
            }
        }
    }

    #[test]
    fn test_unsupported_length_never_matches() {
        let db = StaticPatternDatabase::builtin();
        assert!(!db.contains(PatternCategory::Ascending, "12345"));
        assert!(!db.contains(PatternCategory::Repeated, ""));
    }

    #[test]
    fn test_table_sizes() {
        let db = StaticPatternDatabase::builtin();
        assert_eq!(db.len(PatternCategory::Repeated, PinLength::Four), 10);
        assert_eq!(db.len(PatternCategory::Ascending, PinLength::Six), 10);
        assert_eq!(
            db.len(PatternCategory::CommonPin, PinLength::Four),
            COMMON_FOUR_DIGIT.len()
        );
    }

    #[test]
    #[serial]
    fn test_common_pins_path_default() {
        remove_env(COMMON_PINS_PATH_VAR);

        let path = common_pins_path();
        assert_eq!(path, PathBuf::from("./assets/common-pins.txt"));
    }

    #[test]
    #[serial]
    fn test_common_pins_path_from_env() {
        let custom_path = "/custom/path/common-pins.txt";
        set_env(COMMON_PINS_PATH_VAR, custom_path);

        let path = common_pins_path();
        assert_eq!(path, PathBuf::from(custom_path));

        remove_env(COMMON_PINS_PATH_VAR);
    }

    #[test]
    #[serial]
    fn test_from_env_file_not_found() {
        set_env(COMMON_PINS_PATH_VAR, "/nonexistent/path/common-pins.txt");

        let result = StaticPatternDatabase::from_env();
        assert!(matches!(result, Err(DatabaseError::FileNotFound(_))));

        remove_env(COMMON_PINS_PATH_VAR);
    }

    #[test]
    #[serial]
    fn test_from_env_success() {
        let temp_file = setup_with_tempfile(&["8193", "918273"]);
        let path = temp_file.path().to_str().unwrap();
        set_env(COMMON_PINS_PATH_VAR, path);

        let db = StaticPatternDatabase::from_env().expect("list should load");
        assert!(db.contains(PatternCategory::CommonPin, "8193"));
        assert!(db.contains(PatternCategory::CommonPin, "918273"));

        remove_env(COMMON_PINS_PATH_VAR);
    }

    #[test]
    fn test_file_replaces_builtin_common_list() {
        let temp_file = setup_with_tempfile(&["8193", "", "  918273  "]);

        let db = StaticPatternDatabase::with_common_pins_from_path(temp_file.path())
            .expect("list should load");
        assert!(db.contains(PatternCategory::CommonPin, "8193"));
        assert!(db.contains(PatternCategory::CommonPin, "918273"));
        assert!(!db.contains(PatternCategory::CommonPin, "1234"));
        assert_eq!(db.len(PatternCategory::CommonPin, PinLength::Four), 1);
        // generated tables are untouched
        assert!(db.contains(PatternCategory::Ascending, "1234"));
    }

    #[test]
    fn test_empty_file() {
        let temp_file = setup_with_tempfile(&["", "   "]);

        let result = StaticPatternDatabase::with_common_pins_from_path(temp_file.path());
        assert!(matches!(result, Err(DatabaseError::EmptyFile)));
    }

    #[test]
    fn test_invalid_entry() {
        let temp_file = setup_with_tempfile(&["1234", "12a4", "5678"]);

        let result = StaticPatternDatabase::with_common_pins_from_path(temp_file.path());
        match result {
            Err(DatabaseError::InvalidEntry { line, entry }) => {
                assert_eq!(line, 2);
                assert_eq!(entry, "12a4");
            }
            other => panic!("Expected InvalidEntry error, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_length_entry() {
        let temp_file = setup_with_tempfile(&["12345"]);

        let result = StaticPatternDatabase::with_common_pins_from_path(temp_file.path());
        assert!(matches!(result, Err(DatabaseError::InvalidEntry { line: 1, .. })));
    }
}
