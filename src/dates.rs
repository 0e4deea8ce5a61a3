use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static YMD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("valid ymd pattern"));

static JP_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{4})年([0-9]{1,2})月([0-9]{1,2})日").expect("valid jp date pattern")
});

/// How a date is spelled out for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `2026年02月05日`, empty when absent.
    Padded,
    /// `2026年2月5日`, `-` when absent.
    Unpadded,
}

/// Parses a `YYYY-MM-DD` string as a calendar date with no timezone attached.
///
/// Anything else, including impossible dates such as `2025-02-30`, is absent.
pub fn parse_local_date(value: &str) -> Option<NaiveDate> {
    let caps = YMD.captures(value.trim())?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whole days from `date` to `today`; positive when `date` is in the past.
pub fn days_since(today: NaiveDate, date: NaiveDate) -> i64 {
    (today - date).num_days()
}

pub fn days_since_today(date: Option<NaiveDate>) -> Option<i64> {
    date.map(|date| days_since(today(), date))
}

pub fn is_recently_updated(value: &str, window_days: u32) -> bool {
    Recency::new(window_days).is_new_at(today(), value)
}

/// The window, in days, during which an entry carries a "NEW" badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recency {
    pub window_days: u32,
}

impl Default for Recency {
    fn default() -> Self {
        Self { window_days: 14 }
    }
}

impl Recency {
    pub fn new(window_days: u32) -> Self {
        Self { window_days }
    }

    pub fn is_new_at(&self, today: NaiveDate, value: &str) -> bool {
        self.is_date_new_at(today, parse_local_date(value))
    }

    pub fn is_date_new_at(&self, today: NaiveDate, date: Option<NaiveDate>) -> bool {
        if self.window_days == 0 {
            return false;
        }
        match date {
            Some(date) => {
                let days = days_since(today, date);
                (0..=i64::from(self.window_days)).contains(&days)
            }
            None => false,
        }
    }
}

pub fn format_display_date(value: &str, style: DateStyle) -> String {
    format_date(parse_local_date(value), style)
}

pub fn format_date(date: Option<NaiveDate>, style: DateStyle) -> String {
    match (date, style) {
        (Some(d), DateStyle::Padded) => {
            format!("{}年{:02}月{:02}日", d.year(), d.month(), d.day())
        }
        (Some(d), DateStyle::Unpadded) => format!("{}年{}月{}日", d.year(), d.month(), d.day()),
        (None, DateStyle::Padded) => String::new(),
        (None, DateStyle::Unpadded) => "-".to_string(),
    }
}

/// Pulls the first `{year}年{month}月{day}日` out of free text as `YYYY-MM-DD`.
pub fn extract_date_from_meta(meta: &str) -> Option<String> {
    let caps = JP_DATE.captures(meta)?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    Some(format!("{}-{month:02}-{day:02}", &caps[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_strict_ymd() {
        assert_eq!(parse_local_date("2025-01-31"), Some(ymd(2025, 1, 31)));
        assert_eq!(parse_local_date(" 2025-01-31 "), Some(ymd(2025, 1, 31)));
    }

    #[test]
    fn malformed_dates_are_absent() {
        for value in [
            "",
            "2025-1-31",
            "25-01-31",
            "2025/01/31",
            "2025-01-31T00:00",
            "abcd-ef-gh",
            "2025-02-30",
            "2025-13-01",
            "２０２５-01-31",
        ] {
            assert_eq!(parse_local_date(value), None, "{value:?}");
        }
    }

    #[test]
    fn formatting_round_trips_the_calendar_date() {
        for value in ["2024-02-29", "2026-10-16", "1999-12-01"] {
            let date = parse_local_date(value).unwrap();
            let padded = format_display_date(value, DateStyle::Padded);
            let back = extract_date_from_meta(&padded).unwrap();
            assert_eq!(parse_local_date(&back), Some(date));

            let unpadded = format_display_date(value, DateStyle::Unpadded);
            let back = extract_date_from_meta(&unpadded).unwrap();
            assert_eq!(parse_local_date(&back), Some(date));
        }
    }

    #[test]
    fn display_styles_and_placeholders() {
        assert_eq!(format_display_date("2026-02-05", DateStyle::Padded), "2026年02月05日");
        assert_eq!(format_display_date("2026-02-05", DateStyle::Unpadded), "2026年2月5日");
        assert_eq!(format_display_date("nope", DateStyle::Padded), "");
        assert_eq!(format_display_date("nope", DateStyle::Unpadded), "-");
    }

    #[test]
    fn recency_window_is_inclusive() {
        let today = ymd(2026, 3, 20);
        let recency = Recency::new(14);
        assert!(recency.is_new_at(today, "2026-03-20"));
        assert!(recency.is_new_at(today, "2026-03-06"));
        assert!(!recency.is_new_at(today, "2026-03-05"));
        assert!(!recency.is_new_at(today, "2026-03-21"));
        assert!(!recency.is_new_at(today, "garbage"));
    }

    #[test]
    fn zero_window_disables_badges() {
        let today = ymd(2026, 3, 20);
        assert!(!Recency::new(0).is_new_at(today, "2026-03-20"));
        assert!(!is_recently_updated(&today.to_string(), 0));
    }

    #[test]
    fn days_since_counts_calendar_days() {
        assert_eq!(days_since(ymd(2026, 3, 1), ymd(2026, 2, 27)), 2);
        assert_eq!(days_since(ymd(2026, 3, 1), ymd(2026, 3, 2)), -1);
        assert_eq!(days_since_today(None), None);
        assert_eq!(days_since_today(Some(today())), Some(0));
    }

    #[test]
    fn extracts_date_from_meta_text() {
        assert_eq!(
            extract_date_from_meta("更新日：2026年2月10日").as_deref(),
            Some("2026-02-10")
        );
        assert_eq!(extract_date_from_meta("更新日：未定"), None);
    }
}
