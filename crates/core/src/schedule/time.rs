//! Time-of-day and weekday utilities.
//!
//! Shift and appointment times are stored as "HH:MM" strings at the edges
//! and as minutes since midnight internally. Weekdays are canonicalized
//! through a fixed table keyed on [`chrono::Weekday`] - never through locale
//! formatting, which varies by runtime environment. Stored day names come
//! from tenant data and may carry accented characters in either precomposed
//! or combining-mark form, so comparisons go through [`normalize_day_name`].

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an "HH:MM" time string.
///
/// These indicate corrupt stored data (or an unvalidated caller), not a
/// recoverable user condition.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeFormatError {
    /// The input is not of the form "HH:MM".
    #[error("malformed time string {input:?}, expected \"HH:MM\"")]
    Malformed {
        /// The rejected input.
        input: String,
    },
    /// The hour field is outside 0-23.
    #[error("hour out of range in {input:?}")]
    HourOutOfRange {
        /// The rejected input.
        input: String,
    },
    /// The minute field is outside 0-59.
    #[error("minute out of range in {input:?}")]
    MinuteOutOfRange {
        /// The rejected input.
        input: String,
    },
}

/// Parse an "HH:MM" string into minutes since midnight.
///
/// Accepts one- or two-digit hour and two-digit minute fields
/// ("8:00" and "08:00" both parse to 480).
///
/// # Errors
///
/// Returns [`TimeFormatError`] if the input is not a valid time of day.
pub fn to_minutes(s: &str) -> Result<u16, TimeFormatError> {
    let malformed = || TimeFormatError::Malformed {
        input: s.to_owned(),
    };

    let (hour_part, minute_part) = s.split_once(':').ok_or_else(malformed)?;

    if hour_part.is_empty()
        || hour_part.len() > 2
        || minute_part.len() != 2
        || !hour_part.bytes().all(|b| b.is_ascii_digit())
        || !minute_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(malformed());
    }

    let hour: u16 = hour_part.parse().map_err(|_| malformed())?;
    let minute: u16 = minute_part.parse().map_err(|_| malformed())?;

    if hour > 23 {
        return Err(TimeFormatError::HourOutOfRange {
            input: s.to_owned(),
        });
    }
    if minute > 59 {
        return Err(TimeFormatError::MinuteOutOfRange {
            input: s.to_owned(),
        });
    }

    Ok(hour * 60 + minute)
}

/// Format minutes since midnight as a zero-padded "HH:MM" string.
///
/// The input must be a minute-of-day value (0-1439).
#[must_use]
pub fn from_minutes(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Canonical weekday enumeration.
///
/// The canonical names are the seven fixed lowercase Spanish day names used
/// throughout tenant shift data. They are produced from this table only;
/// a computed name is never derived from locale formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays, Monday first.
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// The weekday of a calendar date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday() {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }

    /// The canonical lowercase day name.
    #[must_use]
    pub const fn canonical_name(self) -> &'static str {
        match self {
            Self::Monday => "lunes",
            Self::Tuesday => "martes",
            Self::Wednesday => "miércoles",
            Self::Thursday => "jueves",
            Self::Friday => "viernes",
            Self::Saturday => "sábado",
            Self::Sunday => "domingo",
        }
    }

    /// Resolve a stored day name to a weekday, tolerating case and
    /// diacritic/encoding variants.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = normalize_day_name(name);
        Self::ALL
            .into_iter()
            .find(|day| normalize_day_name(day.canonical_name()) == normalized)
    }

    /// Whether a stored day name refers to this weekday.
    #[must_use]
    pub fn matches_stored(self, stored: &str) -> bool {
        normalize_day_name(stored) == normalize_day_name(self.canonical_name())
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical_name())
    }
}

/// Normalize a day name for comparison: lowercase and fold diacritics.
///
/// Handles both precomposed characters ("miércoles") and combining-mark
/// sequences ("mie\u{0301}rcoles"), so shift rows written by different
/// clients compare equal regardless of their Unicode form.
#[must_use]
pub fn normalize_day_name(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .filter_map(fold_char)
        .collect()
}

/// Fold a single character: strip combining marks, map accented vowels to
/// their base letter, pass everything else through.
const fn fold_char(c: char) -> Option<char> {
    match c {
        // Combining diacritical marks (U+0300..U+036F) are dropped entirely
        '\u{0300}'..='\u{036F}' => None,
        'á' | 'à' | 'ä' | 'â' => Some('a'),
        'é' | 'è' | 'ë' | 'ê' => Some('e'),
        'í' | 'ì' | 'ï' | 'î' => Some('i'),
        'ó' | 'ò' | 'ö' | 'ô' => Some('o'),
        'ú' | 'ù' | 'ü' | 'û' => Some('u'),
        other => Some(other),
    }
}
