use crate::utils::error::{ReservationError, Result};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
});

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 去除前後空白後不可為空，回傳修剪後的字串
pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ReservationError::validation(
            field_name,
            "value cannot be empty or whitespace-only",
        ));
    }
    Ok(trimmed.to_string())
}

pub fn validate_positive_number(field_name: &str, value: i64) -> Result<u32> {
    if value <= 0 {
        return Err(ReservationError::validation(
            field_name,
            format!("value must be greater than 0, got {}", value),
        ));
    }
    u32::try_from(value).map_err(|_| {
        ReservationError::validation(field_name, format!("value {} is too large", value))
    })
}

pub fn validate_email(field_name: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if !EMAIL_RE.is_match(trimmed) {
        return Err(ReservationError::validation(
            field_name,
            format!("'{}' is not a valid email address", value),
        ));
    }
    Ok(trimmed.to_string())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(ReservationError::ConfigError {
            message: format!("{}: path cannot be empty", field_name),
        });
    }

    if path.contains('\0') {
        return Err(ReservationError::ConfigError {
            message: format!("{}: path contains null bytes", field_name),
        });
    }

    Ok(())
}

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !well_formed {
        return Err(ReservationError::validation(
            "date",
            format!("'{}' does not match YYYY-MM-DD", value),
        ));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        ReservationError::validation("date", format!("'{}' is not a calendar date: {}", value, e))
    })
}

/// Dates must round-trip through `YYYY-MM-DD`, so only years 0000-9999 are stored.
pub fn validate_iso_year(field_name: &str, date: NaiveDate) -> Result<NaiveDate> {
    if !(0..=9999).contains(&date.year()) {
        return Err(ReservationError::validation(
            field_name,
            format!("year {} is outside 0000-9999", date.year()),
        ));
    }
    Ok(date)
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_non_empty_string() {
        assert_eq!(validate_non_empty_string("name", "  Hotel X ").unwrap(), "Hotel X");
        assert!(validate_non_empty_string("name", "").is_err());
        assert!(validate_non_empty_string("name", "   ").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert_eq!(validate_positive_number("total_rooms", 5).unwrap(), 5);
        assert!(validate_positive_number("total_rooms", 0).is_err());
        assert!(validate_positive_number("total_rooms", -3).is_err());
        assert!(validate_positive_number("total_rooms", i64::MAX).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(
            validate_email("email", " alice@example.com ").unwrap(),
            "alice@example.com"
        );
        assert!(validate_email("email", "not-an-email").is_err());
        assert!(validate_email("email", "a@b").is_err());
        assert!(validate_email("email", "a b@example.com").is_err());
        assert!(validate_email("email", "").is_err());
    }

    #[test]
    fn test_parse_iso_date() {
        let leap = parse_iso_date("2024-02-29").unwrap();
        assert_eq!(format_iso_date(leap), "2024-02-29");

        for bad in ["2024/02/29", "2023-02-29", "2024-2-9", "24-02-29", "", "2024-13-01", " 2024-01-01"] {
            let err = parse_iso_date(bad).unwrap_err();
            assert!(
                matches!(err, ReservationError::ValidationError { .. }),
                "expected validation error for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_validate_iso_year() {
        let date = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap();
        assert_eq!(validate_iso_year("check_in", date).unwrap(), date);
        assert!(validate_iso_year("check_in", NaiveDate::from_ymd_opt(10000, 1, 1).unwrap()).is_err());
        assert!(validate_iso_year("check_in", NaiveDate::from_ymd_opt(-5, 1, 1).unwrap()).is_err());
        assert_eq!(format_iso_date(NaiveDate::from_ymd_opt(7, 3, 9).unwrap()), "0007-03-09");
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("storage.data_dir", "./data").is_ok());
        assert!(validate_path("storage.data_dir", "").is_err());
        assert!(validate_path("storage.data_dir", "bad\0path").is_err());
    }
}
