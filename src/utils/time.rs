//! Timestamp formatting for backend dates.
//!
//! The backend reports UTC timestamps, either RFC 3339 or naive ISO 8601 without an offset.
//! They are shown in India Standard Time, the organization's reporting zone.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

/// UTC+05:30.
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

fn parse_utc(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Formats a backend timestamp as "dd/mm/yyyy, hh:mm:ss am" in IST.
///
/// Input that is not a recognizable date is returned unchanged.
pub fn format_timestamp(input: &str) -> String {
    match (parse_utc(input), FixedOffset::east_opt(IST_OFFSET_SECS)) {
        (Some(utc), Some(ist)) => utc
            .with_timezone(&ist)
            .format("%d/%m/%Y, %I:%M:%S %P")
            .to_string(),
        _ => input.to_string(),
    }
}

/// Shortens a "YYYY-MM-DD HH:MM:SS" log timestamp to "MM-DD HH:MM".
pub fn format_compact_timestamp(timestamp: &str) -> String {
    let mut parts = timestamp.split(' ');
    match (parts.next(), parts.next()) {
        (Some(date), Some(time)) => match (date.get(5..10), time.get(0..5)) {
            (Some(month_day), Some(hour_min)) => format!("{} {}", month_day, hour_min),
            _ => timestamp.to_string(),
        },
        _ => timestamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_timestamps_are_treated_as_utc() {
        assert_eq!(
            format_timestamp("2024-03-01T18:45:10.123456"),
            "02/03/2024, 12:15:10 am"
        );
    }

    #[test]
    fn offsets_are_respected() {
        assert_eq!(
            format_timestamp("2024-03-01T10:00:00+05:30"),
            "01/03/2024, 10:00:00 am"
        );
        assert_eq!(format_timestamp("2024-03-01T06:30:00Z"), "01/03/2024, 12:00:00 pm");
    }

    #[test]
    fn unparseable_input_is_returned_unchanged() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
        assert_eq!(format_timestamp(""), "");
    }

    #[test]
    fn compact_timestamp() {
        assert_eq!(format_compact_timestamp("2024-03-01 18:45:10"), "03-01 18:45");
        assert_eq!(format_compact_timestamp("garbage"), "garbage");
    }
}
