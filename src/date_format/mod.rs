//! Moment-style date patterns over `chrono`.
//!
//! Patterns use the familiar tokens (`YYYY`, `MMMM`, `Do`, `dddd`, `hh`, `a`,
//! `Q`, ...). Text inside `[...]` is copied literally and any character that
//! is not part of a token is copied as-is, so `"[Quarter] Q"` renders as
//! `"Quarter 3"`.

pub mod legacy;

use chrono::{DateTime, Datelike, Local, Timelike};
use regex::Regex;
use std::sync::{Arc, OnceLock};

use crate::interfaces::{Clock, DateFormatter, SystemClock};

/// Names used when rendering text tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLocale {
    pub months: [String; 12],
    pub months_short: [String; 12],
    /// Sunday first
    pub weekdays: [String; 7],
    pub weekdays_short: [String; 7],
    pub weekdays_min: [String; 7],
    pub am: String,
    pub pm: String,
}

fn owned<const N: usize>(names: [&str; N]) -> [String; N] {
    names.map(str::to_string)
}

impl Default for DateLocale {
    fn default() -> Self {
        Self {
            months: owned([
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]),
            months_short: owned([
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]),
            weekdays: owned([
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ]),
            weekdays_short: owned(["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]),
            weekdays_min: owned(["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]),
            am: "am".to_string(),
            pm: "pm".to_string(),
        }
    }
}

impl DateLocale {
    /// Replace the full month names, keeping everything else.
    #[must_use]
    pub fn with_months(mut self, months: [&str; 12]) -> Self {
        self.months = owned(months);
        self
    }

    #[must_use]
    pub fn with_weekdays(mut self, weekdays: [&str; 7]) -> Self {
        self.weekdays = owned(weekdays);
        self
    }
}

/// Quarter of the year, 1 to 4.
#[must_use]
pub fn quarter(date: &impl Datelike) -> u32 {
    date.month0() / 3 + 1
}

/// English ordinal suffix: 1st, 2nd, 3rd, 4th, 11th, 12th, 13th, 21st.
#[must_use]
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"\[[^\]]*\]|YYYY|YY|Qo|Q|MMMM|MMM|MM|Mo|M|Do|DDDD|DDD|DD|D|dddd|ddd|dd|do|d|E|HH|H|hh|h|mm|m|ss|s|SSS|a|A|ZZ|Z|X|x",
        )
        .expect("date token regex is valid")
    })
}

/// Default implementation of DateFormatter using moment-style patterns
#[derive(Clone)]
pub struct MomentFormatter {
    clock: Arc<dyn Clock>,
    locale: DateLocale,
}

impl Default for MomentFormatter {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl MomentFormatter {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            locale: DateLocale::default(),
        }
    }

    #[must_use]
    pub fn with_locale(mut self, locale: DateLocale) -> Self {
        self.locale = locale;
        self
    }

    #[must_use]
    pub fn locale(&self) -> &DateLocale {
        &self.locale
    }

    /// Render `date` with `pattern`.
    #[must_use]
    pub fn format_at(&self, date: &DateTime<Local>, pattern: &str) -> String {
        let mut out = String::with_capacity(pattern.len() * 2);
        let mut pos = 0;
        for m in token_regex().find_iter(pattern) {
            out.push_str(&pattern[pos..m.start()]);
            out.push_str(&self.render_token(date, m.as_str()));
            pos = m.end();
        }
        out.push_str(&pattern[pos..]);
        out
    }

    fn render_token(&self, date: &DateTime<Local>, token: &str) -> String {
        let weekday = date.weekday().num_days_from_sunday() as usize;
        let month0 = date.month0() as usize;
        let hour12 = match date.hour() % 12 {
            0 => 12,
            h => h,
        };
        let offset_secs = date.offset().local_minus_utc();
        let offset_sign = if offset_secs < 0 { '-' } else { '+' };
        let (offset_h, offset_m) = (offset_secs.abs() / 3600, offset_secs.abs() % 3600 / 60);

        match token {
            "YYYY" => format!("{:04}", date.year()),
            "YY" => format!("{:02}", date.year().rem_euclid(100)),
            "Q" => quarter(date).to_string(),
            "Qo" => ordinal(quarter(date)),
            "MMMM" => self.locale.months[month0].clone(),
            "MMM" => self.locale.months_short[month0].clone(),
            "MM" => format!("{:02}", date.month()),
            "Mo" => ordinal(date.month()),
            "M" => date.month().to_string(),
            "DDDD" => format!("{:03}", date.ordinal()),
            "DDD" => date.ordinal().to_string(),
            "DD" => format!("{:02}", date.day()),
            "Do" => ordinal(date.day()),
            "D" => date.day().to_string(),
            "dddd" => self.locale.weekdays[weekday].clone(),
            "ddd" => self.locale.weekdays_short[weekday].clone(),
            "dd" => self.locale.weekdays_min[weekday].clone(),
            "do" => ordinal(weekday as u32),
            "d" => weekday.to_string(),
            "E" => date.weekday().number_from_monday().to_string(),
            "HH" => format!("{:02}", date.hour()),
            "H" => date.hour().to_string(),
            "hh" => format!("{hour12:02}"),
            "h" => hour12.to_string(),
            "mm" => format!("{:02}", date.minute()),
            "m" => date.minute().to_string(),
            "ss" => format!("{:02}", date.second()),
            "s" => date.second().to_string(),
            "SSS" => format!("{:03}", date.timestamp_subsec_millis().min(999)),
            "a" | "A" => {
                let meridiem = if date.hour() < 12 {
                    &self.locale.am
                } else {
                    &self.locale.pm
                };
                if token == "A" {
                    meridiem.to_uppercase()
                } else {
                    meridiem.clone()
                }
            }
            "ZZ" => format!("{offset_sign}{offset_h:02}{offset_m:02}"),
            "Z" => format!("{offset_sign}{offset_h:02}:{offset_m:02}"),
            "X" => date.timestamp().to_string(),
            "x" => date.timestamp_millis().to_string(),
            bracketed => bracketed
                .strip_prefix('[')
                .and_then(|s| s.strip_suffix(']'))
                .unwrap_or(bracketed)
                .to_string(),
        }
    }
}

impl DateFormatter for MomentFormatter {
    fn format_now(&self, pattern: &str) -> String {
        self.format_at(&self.clock.now(), pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::MockClock;
    use chrono::TimeZone;

    fn sample() -> DateTime<Local> {
        // Saturday
        Local
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
            .single()
            .expect("unambiguous local time")
    }

    #[test]
    fn renders_common_tokens() {
        let f = MomentFormatter::default();
        let d = sample();
        assert_eq!(f.format_at(&d, "YYYY-MM-DD HH:mm:ss"), "2024-03-09 14:05:07");
        assert_eq!(f.format_at(&d, "D-M-YY H:m:s"), "9-3-24 14:5:7");
        assert_eq!(f.format_at(&d, "dddd hh"), "Saturday 02");
        assert_eq!(
            f.format_at(&d, "dddd, MMMM Do YYYY, h:mm:ss a"),
            "Saturday, March 9th 2024, 2:05:07 pm"
        );
        assert_eq!(f.format_at(&d, "ddd MMM dd A"), "Sat Mar Sa PM");
        assert_eq!(f.format_at(&d, "E d DDD DDDD"), "6 6 69 069");
    }

    #[test]
    fn brackets_escape_literal_text() {
        let f = MomentFormatter::default();
        assert_eq!(f.format_at(&sample(), "[Quarter] Q"), "Quarter 1");
        assert_eq!(f.format_at(&sample(), "[YYYY] YYYY"), "YYYY 2024");
        assert_eq!(f.format_at(&sample(), "Qo"), "1st");
    }

    #[test]
    fn locale_overrides_month_names() {
        let f = MomentFormatter::default()
            .with_locale(DateLocale::default().with_months(["moo"; 12]));
        assert_eq!(f.format_at(&sample(), "MMMM"), "moo");
        assert_eq!(f.format_at(&sample(), "MMM"), "Mar");
    }

    #[test]
    fn format_now_reads_the_clock() {
        let mut clock = MockClock::new();
        clock.expect_now().times(1).returning(sample);
        let f = MomentFormatter::new(Arc::new(clock));
        assert_eq!(f.format_now("YYYY/MM"), "2024/03");
    }

    #[test]
    fn ordinals() {
        let got: Vec<String> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 101, 111].map(ordinal).to_vec();
        assert_eq!(
            got,
            ["1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "101st", "111th"]
        );
    }

    #[test]
    fn midnight_is_twelve_am() {
        let d = Local
            .with_ymd_and_hms(2024, 1, 1, 0, 30, 0)
            .single()
            .expect("unambiguous local time");
        assert_eq!(MomentFormatter::default().format_at(&d, "h:mm A"), "12:30 AM");
    }
}
