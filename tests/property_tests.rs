//! Property-based tests for logger_abstract using proptest

use logger_abstract::adapters::{Encoder, EncoderConfig, Encoding};
use logger_abstract::core::message::{sprint, sprintln};
use logger_abstract::prelude::*;
use parking_lot::Mutex;
use proptest::prelude::*;
use std::fmt::Display;
use std::io::Write;
use std::sync::Arc;

fn any_level() -> impl Strategy<Value = Level> {
    prop::sample::select(Level::ALL.to_vec())
}

#[derive(Default)]
struct Counter(Mutex<Vec<String>>);

impl log::Log for Counter {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        self.0.lock().push(record.args().to_string());
    }

    fn flush(&self) {}
}

// ============================================================================
// Level Tests
// ============================================================================

proptest! {
    /// Test that level names roundtrip in either case
    #[test]
    fn test_level_str_roundtrip(level in any_level()) {
        prop_assert_eq!(level.to_str().parse::<Level>().unwrap(), level);
        prop_assert_eq!(level.to_lowercase_str().parse::<Level>().unwrap(), level);
        prop_assert_eq!(level.to_string(), level.to_str());
    }

    /// Test that the numeric encoding roundtrips
    #[test]
    fn test_level_numeric_roundtrip(level in any_level()) {
        let value = level as i64;
        prop_assert_eq!(Level::try_from(value).unwrap(), level);
    }

    /// Test that values outside the closed set are rejected
    #[test]
    fn test_level_rejects_unknown_values(value in prop_oneof![i64::MIN..0_i64, 6_i64..i64::MAX]) {
        let result = Level::try_from(value);
        prop_assert!(matches!(result, Err(LoggerError::UnknownLevel(v)) if v == value));
    }

    /// Test that ordering agrees with the numeric encoding
    #[test]
    fn test_level_ordering(a in any_level(), b in any_level()) {
        prop_assert_eq!(a.cmp(&b), (a as i64).cmp(&(b as i64)));
    }

    /// Test that only panic and fatal are terminal
    #[test]
    fn test_terminal_levels_map_to_error(level in any_level()) {
        if level.is_terminal() {
            prop_assert_eq!(level.as_log_level(), log::Level::Error);
        } else {
            prop_assert_eq!(Level::from_log_level(level.as_log_level()), level);
        }
    }
}

// ============================================================================
// Message Tests
// ============================================================================

proptest! {
    /// Test that the plain shape concatenates without separators
    #[test]
    fn test_sprint_concatenates(parts in prop::collection::vec("[a-z0-9 ]{0,8}", 0..6)) {
        let args: Vec<&dyn Display> = parts.iter().map(|p| p as &dyn Display).collect();
        prop_assert_eq!(sprint(&args), parts.concat());
    }

    /// Test that the line shape joins with exactly one space
    #[test]
    fn test_sprintln_joins_with_spaces(parts in prop::collection::vec("[a-z0-9]{0,8}", 0..6)) {
        let args: Vec<&dyn Display> = parts.iter().map(|p| p as &dyn Display).collect();
        let message = sprintln(&args);
        prop_assert_eq!(&message, &parts.join(" "));
        prop_assert!(!message.ends_with('\n'));
    }
}

// ============================================================================
// Adapter Tests
// ============================================================================

proptest! {
    /// Test that every write accepts all of its bytes as one record
    #[test]
    fn test_write_accepts_every_byte(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let counter = Arc::new(Counter::default());
        let mut logger = StructuredLogger::new(counter.clone());

        let written = logger.write(&bytes).unwrap();
        prop_assert_eq!(written, bytes.len());
        prop_assert_eq!(counter.0.lock().len(), 1);
    }

    /// Test that children never leak fields into the parent
    #[test]
    fn test_with_never_mutates_parent(keys in prop::collection::vec("[a-z]{1,8}", 1..6)) {
        let counter = Arc::new(Counter::default());
        let parent = StructuredLogger::new(counter);

        let fields: Vec<Field> = keys.iter().map(|k| Field::new(k.as_str(), "v")).collect();
        let child = parent.with(&fields);

        prop_assert!(parent.fields().is_empty());
        prop_assert_eq!(child.fields().len(), keys.len());
    }

    /// Test that console output keeps one record per line
    #[test]
    fn test_console_one_line_per_record(message in "\\PC{0,40}|[a-z]*\n[a-z]*\r?") {
        let encoder = Encoder::new(Encoding::Console, EncoderConfig::console());
        let line = encoder.encode(
            &log::Record::builder()
                .args(format_args!("{}", message))
                .level(log::Level::Info)
                .build(),
        );

        prop_assert!(!line.contains('\n'));
        prop_assert!(!line.contains('\r'));
    }
}
