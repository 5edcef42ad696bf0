//! Date rendering against `YYYY YY MM DD HH mm SS` token patterns.

use chrono::{DateTime, Datelike, Local, NaiveDate, Timelike, Utc};
use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::normalize::{normalize_label, NormalizedDate};

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("YYYY|YY|MM|DD|HH|mm|SS").expect("valid token regex"))
}

fn dotted_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?<y>\d{4})\.(?<m>\d{2})\.(?<d>\d{2})").expect("valid dotted date regex")
    })
}

/// Date fields read either in UTC or in local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormatter {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
}

impl DateFormatter {
    pub fn new(date: &DateTime<Utc>, utc: bool) -> Self {
        if utc {
            Self::from_fields(date)
        } else {
            Self::from_fields(&date.with_timezone(&Local))
        }
    }

    fn from_fields<T: Datelike + Timelike>(d: &T) -> Self {
        Self {
            year: d.year(),
            month: d.month(),
            day: d.day(),
            hour: d.hour(),
            minute: d.minute(),
            second: d.second(),
        }
    }

    /// Zero-padded value of one token; `None` for unknown tokens.
    pub fn token(&self, token: &str) -> Option<String> {
        let value = match token {
            "YYYY" => format!("{:04}", self.year),
            "YY" => {
                let full = format!("{:04}", self.year);
                full[2..].to_string()
            }
            "MM" => format!("{:02}", self.month),
            "DD" => format!("{:02}", self.day),
            "HH" => format!("{:02}", self.hour),
            "mm" => format!("{:02}", self.minute),
            "SS" => format!("{:02}", self.second),
            _ => return None,
        };
        Some(value)
    }

    pub fn format(&self, pattern: &str) -> String {
        token_re()
            .replace_all(pattern, |caps: &Captures| {
                self.token(&caps[0]).unwrap_or_default()
            })
            .into_owned()
    }
}

pub fn format_date(date: &DateTime<Utc>, pattern: &str, utc: bool) -> String {
    DateFormatter::new(date, utc).format(pattern)
}

/// `YYYY.MM.DD` in UTC.
pub fn day_date_string(date: &DateTime<Utc>) -> String {
    format_date(date, "YYYY.MM.DD", true)
}

/// Formats a date given as text.
///
/// A `YYYY.MM.DD` date is first rewritten to `YYYY-MM-DD`, which some parsers
/// reject in dotted form. A bare ISO date is midnight UTC; other inputs are
/// read as local time. Returns `None` when the value does not parse.
pub fn format_date_str(value: &str, pattern: &str, utc: bool) -> Option<String> {
    let repaired = dotted_date_re().replace(value, "$y-$m-$d");
    let trimmed = repaired.trim();
    let date = match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(d) => d.and_hms_opt(0, 0, 0).map(|n| n.and_utc()),
        Err(_) => match normalize_label(trimmed, &[]) {
            NormalizedDate::Date(d) => Some(d),
            NormalizedDate::Absent => None,
        },
    };
    match date {
        Some(d) => Some(format_date(&d, pattern, utc)),
        None => {
            tracing::warn!(value, "invalid date value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 7, 5, 9, 2).unwrap()
    }

    #[test]
    fn all_tokens_zero_padded() {
        assert_eq!(
            format_date(&sample(), "YYYY-MM-DD HH:mm:SS (YY)", true),
            "2024-03-07 05:09:02 (24)"
        );
    }

    #[test]
    fn literal_text_is_kept() {
        assert_eq!(format_date(&sample(), "on DD/MM", true), "on 07/03");
    }

    #[test]
    fn small_years_pad_to_four() {
        let d = Utc.with_ymd_and_hms(33, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(format_date(&d, "YYYY|YY", true), "0033|33");
    }

    #[test]
    fn local_flag_reads_local_fields() {
        let d = sample();
        let local = d.with_timezone(&Local);
        let expected = format!("{:02}", local.hour());
        assert_eq!(format_date(&d, "HH", false), expected);
    }

    #[test]
    fn day_date_is_utc() {
        let d = Utc.with_ymd_and_hms(2024, 11, 18, 23, 59, 0).unwrap();
        assert_eq!(day_date_string(&d), "2024.11.18");
    }

    #[test]
    fn dotted_input_is_repaired() {
        assert_eq!(
            format_date_str("2024.11.18", "YYYY/MM/DD", true).as_deref(),
            Some("2024/11/18")
        );
        assert_eq!(
            format_date_str("2024-11-18", "YYYY.MM.DD", true).as_deref(),
            Some("2024.11.18")
        );
    }

    #[test]
    fn invalid_string_input() {
        assert_eq!(format_date_str("not a date", "YYYY", true), None);
        assert_eq!(format_date_str("2024.13.40", "YYYY", true), None);
    }
}
