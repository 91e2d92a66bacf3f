//! Timestamp formatting for the preset encoders

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use logger_abstract::adapters::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Console.format(&at), "2025-01-08 10:30:45.00000");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2025-01-08 10:30:45.12345`, five fractional digits.
    ///
    /// Fixed by the console preset; downstream consumers parse it verbatim.
    #[default]
    Console,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// Seconds since the Unix epoch as a float: `1736332245.123456`
    EpochSeconds,
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Console => {
                // chrono has no five-digit fraction specifier. A leap second
                // reports nanos past 1e9 and renders as second 60.
                let tenth_micros = (datetime.timestamp_subsec_nanos() % 1_000_000_000) / 10_000;
                format!("{}.{:05}", datetime.format("%Y-%m-%d %H:%M:%S"), tenth_micros)
            }
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::EpochSeconds => format!("{:.6}", Self::epoch_seconds(datetime)),
        }
    }

    /// JSON form: numeric for epoch timestamps, a string otherwise.
    #[must_use]
    pub fn to_json(&self, datetime: &DateTime<Utc>) -> serde_json::Value {
        match self {
            TimestampFormat::EpochSeconds => serde_json::Number::from_f64(Self::epoch_seconds(datetime))
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(self.format(datetime))),
            _ => serde_json::Value::String(self.format(datetime)),
        }
    }

    fn epoch_seconds(datetime: &DateTime<Utc>) -> f64 {
        datetime.timestamp() as f64 + f64::from(datetime.timestamp_subsec_nanos()) / 1e9
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_console_format_has_five_fraction_digits() {
        let result = TimestampFormat::Console.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08 10:30:45.12345");
    }

    #[test]
    fn test_console_format_pads_fraction() {
        let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).single().expect("valid datetime")
            + chrono::Duration::microseconds(70);
        assert_eq!(TimestampFormat::Console.format(&at), "2025-01-08 10:30:45.00007");
    }

    #[test]
    fn test_console_format_during_leap_second() {
        let leap = chrono::NaiveDate::from_ymd_opt(2016, 12, 31)
            .and_then(|d| d.and_hms_nano_opt(23, 59, 59, 1_500_000_000))
            .expect("valid leap second");
        let at = Utc.from_utc_datetime(&leap);
        assert_eq!(TimestampFormat::Console.format(&at), "2016-12-31 23:59:60.50000");
    }

    #[test]
    fn test_iso8601_format() {
        let result = TimestampFormat::Iso8601.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_epoch_seconds_json_is_numeric() {
        let value = TimestampFormat::EpochSeconds.to_json(&fixed_datetime());
        let secs = value.as_f64().expect("numeric timestamp");
        assert!((secs - 1_736_332_245.123_456).abs() < 1e-3);
    }

    #[test]
    fn test_string_formats_json_as_strings() {
        let value = TimestampFormat::Console.to_json(&fixed_datetime());
        assert_eq!(value, serde_json::json!("2025-01-08 10:30:45.12345"));
    }

    #[test]
    fn test_default_is_console() {
        assert_eq!(TimestampFormat::default(), TimestampFormat::Console);
    }
}
