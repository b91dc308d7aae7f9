//! Reporting periods anchored on local calendar boundaries

use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc};

/// Period selectable on the earnings report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EarningsPeriod {
    /// Since local midnight
    Today,
    /// Since Monday 00:00 of the current week
    Week,
    /// Since the first day of the month at 00:00
    Month,
}

impl EarningsPeriod {
    /// Parse a query value; unknown values mean no period
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "today" => Some(EarningsPeriod::Today),
            "week" => Some(EarningsPeriod::Week),
            "month" => Some(EarningsPeriod::Month),
            _ => None,
        }
    }

    /// Start of the period containing `now`, in `now`'s time zone
    pub fn start<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DateTime<Utc> {
        let today = now.date_naive();
        let first_day = match self {
            EarningsPeriod::Today => today,
            // Sunday belongs to the week that started six days earlier
            EarningsPeriod::Week => {
                today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
            }
            EarningsPeriod::Month => today.with_day(1).unwrap_or(today),
        };

        let midnight = first_day.and_time(NaiveTime::MIN);
        let tz = now.timezone();
        match tz.from_local_datetime(&midnight).earliest() {
            Some(start) => start.with_timezone(&Utc),
            // Midnight skipped by a DST change
            None => tz.from_utc_datetime(&midnight).with_timezone(&Utc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn paris_summer() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<FixedOffset> {
        paris_summer().with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_parse() {
        assert_eq!(EarningsPeriod::parse("today"), Some(EarningsPeriod::Today));
        assert_eq!(EarningsPeriod::parse("week"), Some(EarningsPeriod::Week));
        assert_eq!(EarningsPeriod::parse("month"), Some(EarningsPeriod::Month));
        assert_eq!(EarningsPeriod::parse("year"), None);
        assert_eq!(EarningsPeriod::parse(""), None);
    }

    #[test]
    fn test_today_starts_at_local_midnight() {
        let start = EarningsPeriod::Today.start(&at(2024, 5, 15, 10, 30, 0));
        assert_eq!(start, at(2024, 5, 15, 0, 0, 0));
    }

    #[test]
    fn test_week_starts_on_monday() {
        // Wednesday
        let start = EarningsPeriod::Week.start(&at(2024, 5, 15, 10, 30, 0));
        assert_eq!(start, at(2024, 5, 13, 0, 0, 0));
    }

    #[test]
    fn test_sunday_belongs_to_previous_monday() {
        let start = EarningsPeriod::Week.start(&at(2024, 5, 19, 23, 0, 0));
        assert_eq!(start, at(2024, 5, 13, 0, 0, 0));
    }

    #[test]
    fn test_monday_starts_its_own_week() {
        let start = EarningsPeriod::Week.start(&at(2024, 5, 13, 0, 0, 1));
        assert_eq!(start, at(2024, 5, 13, 0, 0, 0));
    }

    #[test]
    fn test_month_starts_on_first_day() {
        let start = EarningsPeriod::Month.start(&at(2024, 5, 31, 18, 0, 0));
        assert_eq!(start, at(2024, 5, 1, 0, 0, 0));
    }

    #[test]
    fn test_week_crossing_month_boundary() {
        // Friday 2024-03-01 belongs to the week of Monday 2024-02-26
        let start = EarningsPeriod::Week.start(&at(2024, 3, 1, 9, 0, 0));
        assert_eq!(start, at(2024, 2, 26, 0, 0, 0));
    }
}
