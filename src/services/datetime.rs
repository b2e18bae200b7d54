use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::errors::entity::EntityError;

/// Fixed wire format for date fields
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Fixed wire format for time fields
pub const TIME_FORMAT: &str = "%H:%M";

/// Parse a date string in the fixed wire format
pub fn parse_date(value: &str) -> Result<NaiveDate, EntityError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        EntityError::validation(format!(
            "Invalid date format. Expected format is {}.",
            DATE_FORMAT
        ))
    })
}

/// Parse a time string in the fixed wire format
pub fn parse_time(value: &str) -> Result<NaiveTime, EntityError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| {
        EntityError::validation(format!(
            "Invalid time format. Expected format is {}.",
            TIME_FORMAT
        ))
    })
}

/// Combine a date and a time into a UTC timestamp
pub fn combine(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    Utc.from_utc_datetime(&NaiveDateTime::new(date, time))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_accepts_wire_format() {
        let date = parse_date("2025-03-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    }

    #[test]
    fn test_parse_date_rejects_other_formats() {
        assert!(parse_date("01.03.2025").is_err());
        assert!(parse_date("2025-3").is_err());
    }

    #[test]
    fn test_parse_time_accepts_wire_format() {
        let time = parse_time("21:30").unwrap();
        assert_eq!(time, NaiveTime::from_hms_opt(21, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_time_rejects_seconds() {
        assert!(parse_time("21:30:15").is_err());
    }

    #[test]
    fn test_combine_produces_utc_timestamp() {
        let date = parse_date("2025-03-01").unwrap();
        let time = parse_time("08:05").unwrap();
        let combined = combine(date, time);
        assert_eq!(combined.to_rfc3339(), "2025-03-01T08:05:00+00:00");
    }
}
