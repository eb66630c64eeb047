use crate::utils::error::{ReservationError, Result};
use crate::utils::validation::{format_iso_date, parse_iso_date, validate_iso_year};
use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Half-open stay `[check_in, check_out)`: the guest leaves on `check_out`,
/// so that night is free for the next booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StayPeriod {
    #[serde(serialize_with = "serialize_iso_date")]
    check_in: NaiveDate,
    #[serde(serialize_with = "serialize_iso_date")]
    check_out: NaiveDate,
}

fn serialize_iso_date<S: Serializer>(
    date: &NaiveDate,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_iso_date(*date))
}

impl StayPeriod {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self> {
        validate_iso_year("check_in", check_in)?;
        validate_iso_year("check_out", check_out)?;
        if check_in >= check_out {
            return Err(ReservationError::validation(
                "check_out",
                format!(
                    "check_in ({}) must be before check_out ({})",
                    check_in, check_out
                ),
            ));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn parse(check_in: &str, check_out: &str) -> Result<Self> {
        Self::new(parse_iso_date(check_in)?, parse_iso_date(check_out)?)
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    pub fn overlaps(&self, other: &StayPeriod) -> bool {
        let latest_start = self.check_in.max(other.check_in);
        let earliest_end = self.check_out.min(other.check_out);
        latest_start < earliest_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn period(a: u32, b: u32) -> StayPeriod {
        StayPeriod::new(day(a), day(b)).unwrap()
    }

    fn covers(period: &StayPeriod, date: NaiveDate) -> bool {
        period.check_in() <= date && date < period.check_out()
    }

    #[test]
    fn test_rejects_empty_and_inverted_ranges() {
        assert!(StayPeriod::new(day(10), day(10)).is_err());
        assert!(StayPeriod::new(day(12), day(10)).is_err());
        assert!(StayPeriod::parse("2024-01-10", "2024/01/11").is_err());
    }

    #[test]
    fn test_boundary_is_not_overlap() {
        assert!(!period(10, 11).overlaps(&period(11, 12)));
        assert!(period(10, 12).overlaps(&period(11, 13)));
        assert!(period(10, 11).overlaps(&period(10, 12)));
        assert!(period(1, 20).overlaps(&period(5, 6)));
    }

    #[test]
    fn test_nights_across_leap_day() {
        let p = StayPeriod::parse("2024-02-28", "2024-03-01").unwrap();
        assert_eq!(p.nights(), 2);
    }

    #[test]
    fn test_rejects_years_outside_four_digits() {
        let last = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap();
        let beyond = NaiveDate::from_ymd_opt(10000, 1, 2).unwrap();
        let before_zero = NaiveDate::from_ymd_opt(-1, 12, 30).unwrap();

        assert!(matches!(
            StayPeriod::new(last, beyond),
            Err(ReservationError::ValidationError { .. })
        ));
        assert!(matches!(
            StayPeriod::new(before_zero, NaiveDate::from_ymd_opt(0, 1, 2).unwrap()),
            Err(ReservationError::ValidationError { .. })
        ));
        assert!(StayPeriod::new(NaiveDate::from_ymd_opt(9999, 12, 30).unwrap(), last).is_ok());
    }

    #[test]
    fn test_serializes_dates_in_parseable_form() {
        let p = StayPeriod::new(
            NaiveDate::from_ymd_opt(9999, 12, 30).unwrap(),
            NaiveDate::from_ymd_opt(9999, 12, 31).unwrap(),
        )
        .unwrap();
        let json = serde_json::to_value(p).unwrap();
        assert_eq!(json["check_in"], "9999-12-30");
        assert_eq!(json["check_out"], "9999-12-31");

        let early = StayPeriod::parse("0001-01-01", "0001-01-05").unwrap();
        let json = serde_json::to_value(early).unwrap();
        let back = StayPeriod::parse(
            json["check_in"].as_str().unwrap(),
            json["check_out"].as_str().unwrap(),
        )
        .unwrap();
        assert_eq!(back, early);
    }

    proptest! {
        #[test]
        fn prop_overlaps_is_symmetric(a in 1u32..28, la in 1u32..4, b in 1u32..28, lb in 1u32..4) {
            let x = period(a, a + la);
            let y = period(b, b + lb);
            prop_assert_eq!(x.overlaps(&y), y.overlaps(&x));
        }

        #[test]
        fn prop_overlap_matches_shared_night(a in 1u32..28, la in 1u32..4, b in 1u32..28, lb in 1u32..4) {
            let x = period(a, a + la);
            let y = period(b, b + lb);
            let shared = (1..=31).map(day).any(|d| covers(&x, d) && covers(&y, d));
            prop_assert_eq!(x.overlaps(&y), shared);
        }
    }
}
