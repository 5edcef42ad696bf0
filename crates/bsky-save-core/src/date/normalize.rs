//! Accessibility label -> calendar date.
//!
//! Labels look like `November 18, 2024 at 11:44 AM`. Some locales insert
//! words (" at ", " um ", ...) that no date pattern accepts; those are
//! replaced with a space before parsing.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// A fully valid date, or the explicit absence of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizedDate {
    Date(DateTime<Utc>),
    Absent,
}

impl NormalizedDate {
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            NormalizedDate::Date(d) => Some(*d),
            NormalizedDate::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, NormalizedDate::Absent)
    }
}

impl From<Option<DateTime<Utc>>> for NormalizedDate {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(NormalizedDate::Absent, NormalizedDate::Date)
    }
}

const DATE_TIME_FORMATS: &[&str] = &[
    "%B %d, %Y %I:%M %p",
    "%B %d, %Y %I:%M:%S %p",
    "%B %d, %Y %H:%M",
    "%B %d, %Y %H:%M:%S",
    "%d %B %Y %H:%M",
    "%d %B %Y %H:%M:%S",
    "%d %B %Y %I:%M %p",
    "%B %d %Y %I:%M %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y, %I:%M %p",
    "%d.%m.%Y %H:%M",
    "%d.%m.%Y, %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%d %B %Y",
    "%B %d %Y",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
];

/// Normalizes `label`, reading zone-less times as local time.
pub fn normalize_label(label: &str, garbage_parts: &[String]) -> NormalizedDate {
    normalize_label_in(label, garbage_parts, &Local)
}

/// Normalizes `label`, reading zone-less times in `tz`.
///
/// The first occurrence of each garbage part is replaced with a single space.
/// Explicit offsets (RFC 3339, RFC 2822) win over `tz`. Anything that does
/// not parse, or names a local time that does not exist in `tz`, is `Absent`.
pub fn normalize_label_in<Tz: TimeZone>(
    label: &str,
    garbage_parts: &[String],
    tz: &Tz,
) -> NormalizedDate {
    let mut cleaned = label.to_string();
    for part in garbage_parts.iter().filter(|p| !p.is_empty()) {
        cleaned = cleaned.replacen(part.as_str(), " ", 1);
    }
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        return NormalizedDate::Absent;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(&cleaned) {
        return NormalizedDate::Date(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(&cleaned) {
        return NormalizedDate::Date(dt.with_timezone(&Utc));
    }

    let naive = DATE_TIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(&cleaned, f).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(&cleaned, f).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        });

    match naive.and_then(|n| tz.from_local_datetime(&n).earliest()) {
        Some(dt) => NormalizedDate::Date(dt.with_timezone(&Utc)),
        None => {
            tracing::debug!(label, "unparsable date label");
            NormalizedDate::Absent
        }
    }
}
