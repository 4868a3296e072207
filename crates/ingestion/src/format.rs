//! Text formatting shared by the status report

use chrono::{DateTime, Local};
use contracts::Timestamp;

const COMPONENT_WIDTH: usize = 10;
const COMPONENT_PRECISION: usize = 4;

/// Undefined value marker
pub(crate) const SENTINEL: &str = "--";

/// Fixed-width, space-separated components
pub fn format_components(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{v:>COMPONENT_WIDTH$.COMPONENT_PRECISION$}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Like `format_components`, rendering `count` sentinels when undefined
pub(crate) fn format_optional_components(values: Option<&[f64]>, count: usize) -> String {
    match values {
        Some(values) => format_components(values),
        None => vec![format!("{SENTINEL:>COMPONENT_WIDTH$}"); count].join(" "),
    }
}

/// `freq=NN.NN Hz`, or `freq=-- Hz` while unknown
pub fn format_frequency(hz: f64) -> String {
    if hz.is_finite() && hz > 0.0 {
        format!("freq={hz:.2} Hz")
    } else {
        format!("freq={SENTINEL} Hz")
    }
}

/// Local wall-clock time with millisecond precision
pub fn now_string() -> String {
    Local::now().format("%F %T%.3f").to_string()
}

/// Source timestamp as local time; unstamped samples show the current time
pub fn format_stamp(stamp: Timestamp) -> String {
    if stamp.is_unset() {
        return now_string();
    }

    let micros = i64::from(stamp.secs) * 1_000_000 + i64::from(stamp.micros);
    match DateTime::from_timestamp_micros(micros) {
        Some(utc) => utc.with_timezone(&Local).format("%F %T%.3f").to_string(),
        None => SENTINEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components() {
        assert_eq!(format_components(&[1.0, -0.5]), "    1.0000    -0.5000");
        assert_eq!(
            format_optional_components(None, 3),
            "        --         --         --"
        );
    }

    #[test]
    fn test_frequency() {
        assert_eq!(format_frequency(99.996), "freq=100.00 Hz");
        assert_eq!(format_frequency(0.0), "freq=-- Hz");
        assert_eq!(format_frequency(f64::NAN), "freq=-- Hz");
    }

    #[test]
    fn test_stamp_has_millisecond_precision() {
        let text = format_stamp(Timestamp::new(1_700_000_000, 123_456));
        assert!(text.ends_with(".123"), "{text}");
        // YYYY-MM-DD HH:MM:SS.mmm
        assert_eq!(text.len(), 23);
    }

    #[test]
    fn test_unset_stamp_falls_back_to_now() {
        let text = format_stamp(Timestamp::default());
        assert_eq!(text.len(), 23);
        assert!(!text.starts_with("1970"));
    }
}
