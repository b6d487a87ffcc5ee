//! # Journal Entry Form
//!
//! The three user-editable fields and the JSON payload built from them.
//!
//! ```text
//! FormState
//! ├── date: String     // "" or "YYYY-MM-DD"
//! ├── mood: Mood       // one of six categories
//! └── journal: String  // free text
//! ```
//!
//! `FormState::payload()` is the single place where the presence check on
//! `journal` happens. Everything else is accepted as typed.

use chrono::{Local, Months, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::analysis::AnalysisError;

/// ISO-8601 calendar date format used on the wire.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The dominant mood of the day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Happy,
    Sad,
    Angry,
    Anxious,
    Calm,
    Tired,
}

impl Mood {
    /// Picker order.
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Angry,
        Mood::Anxious,
        Mood::Calm,
        Mood::Tired,
    ];

    /// Wire name, as sent in the `mood` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
            Mood::Anxious => "anxious",
            Mood::Calm => "calm",
            Mood::Tired => "tired",
        }
    }

    /// Human-readable label for the picker.
    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "😊 Happy",
            Mood::Sad => "😢 Sad",
            Mood::Angry => "😠 Angry",
            Mood::Anxious => "😰 Anxious",
            Mood::Calm => "😌 Calm",
            Mood::Tired => "😴 Tired",
        }
    }

    /// Position in [`Mood::ALL`].
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|m| *m == self).unwrap_or(0)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown mood '{s}'"))
    }
}

/// User-editable form fields. Owned by `App`, mutated only through actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub date: String,
    pub mood: Mood,
    pub journal: String,
}

/// Body of `POST /api/analyze`. Built fresh on each submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestPayload {
    pub date: String,
    pub mood: Mood,
    pub journal: String,
}

impl FormState {
    /// Builds the request payload, or `AnalysisError::Validation` when the
    /// journal is empty.
    pub fn payload(&self) -> Result<RequestPayload, AnalysisError> {
        if self.journal.is_empty() {
            return Err(AnalysisError::Validation(
                "journal must not be empty".to_string(),
            ));
        }
        Ok(RequestPayload {
            date: self.date.clone(),
            mood: self.mood,
            journal: self.journal.clone(),
        })
    }

    /// Parsed date, if the field holds one.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

// ============================================================================
// Date field helpers
// ============================================================================

/// Parses a `YYYY-MM-DD` string. Empty or malformed input yields `None`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolves a CLI/config date argument: `today`, an ISO date, or empty.
pub fn resolve_date_arg(arg: &str) -> Result<String, String> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Ok(String::new());
    }
    if arg.eq_ignore_ascii_case("today") {
        return Ok(format_date(today()));
    }
    parse_date(arg)
        .map(format_date)
        .ok_or_else(|| format!("invalid date '{arg}', expected YYYY-MM-DD or 'today'"))
}

/// Shifts a date string by whole days. An empty field starts from `base`.
pub fn shift_days(current: &str, days: i64, base: NaiveDate) -> String {
    let start = parse_date(current).unwrap_or(base);
    let shifted = start
        .checked_add_signed(chrono::Duration::days(days))
        .unwrap_or(start);
    format_date(shifted)
}

/// Shifts a date string by whole months, clamping to the end of shorter months.
pub fn shift_months(current: &str, months: i32, base: NaiveDate) -> String {
    let start = parse_date(current).unwrap_or(base);
    let magnitude = Months::new(months.unsigned_abs());
    let shifted = if months >= 0 {
        start.checked_add_months(magnitude)
    } else {
        start.checked_sub_months(magnitude)
    };
    format_date(shifted.unwrap_or(start))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_mood_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Mood::Anxious).unwrap(), "\"anxious\"");
        let parsed: Mood = serde_json::from_str("\"tired\"").unwrap();
        assert_eq!(parsed, Mood::Tired);
    }

    #[test]
    fn test_mood_from_str_is_case_insensitive() {
        assert_eq!("Calm".parse::<Mood>().unwrap(), Mood::Calm);
        assert!("grumpy".parse::<Mood>().is_err());
    }

    #[test]
    fn test_mood_index_matches_all_order() {
        for (i, mood) in Mood::ALL.iter().enumerate() {
            assert_eq!(mood.index(), i);
        }
    }

    #[test]
    fn test_default_form() {
        let form = FormState::default();
        assert_eq!(form.date, "");
        assert_eq!(form.mood, Mood::Happy);
        assert_eq!(form.journal, "");
    }

    #[test]
    fn test_payload_rejects_empty_journal() {
        let form = FormState::default();
        assert!(matches!(form.payload(), Err(AnalysisError::Validation(_))));
    }

    #[test]
    fn test_payload_accepts_whitespace_journal() {
        // Only the presence check applies; whitespace counts as content.
        let form = FormState {
            journal: " ".to_string(),
            ..Default::default()
        };
        assert!(form.payload().is_ok());
    }

    #[test]
    fn test_payload_serializes_in_field_order() {
        let form = FormState {
            date: "2024-01-01".to_string(),
            mood: Mood::Happy,
            journal: "Had a great day".to_string(),
        };
        let body = serde_json::to_string(&form.payload().unwrap()).unwrap();
        assert_eq!(
            body,
            r#"{"date":"2024-01-01","mood":"happy","journal":"Had a great day"}"#
        );
    }

    #[test]
    fn test_payload_keeps_empty_date() {
        let form = FormState {
            journal: "x".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(form.payload().unwrap()).unwrap();
        assert_eq!(value["date"], "");
    }

    #[test]
    fn test_resolve_date_arg() {
        assert_eq!(resolve_date_arg("").unwrap(), "");
        assert_eq!(resolve_date_arg("2024-02-29").unwrap(), "2024-02-29");
        assert_eq!(resolve_date_arg("today").unwrap(), format_date(today()));
        assert!(resolve_date_arg("2023-02-29").is_err());
        assert!(resolve_date_arg("yesterday").is_err());
    }

    #[test]
    fn test_shift_days_from_empty_uses_base() {
        assert_eq!(shift_days("", 0, date(2024, 5, 10)), "2024-05-10");
        assert_eq!(shift_days("", -1, date(2024, 5, 10)), "2024-05-09");
    }

    #[test]
    fn test_shift_days_crosses_year_boundary() {
        assert_eq!(shift_days("2023-12-31", 1, date(2000, 1, 1)), "2024-01-01");
    }

    #[test]
    fn test_shift_months_clamps_to_month_end() {
        assert_eq!(shift_months("2024-01-31", 1, date(2000, 1, 1)), "2024-02-29");
        assert_eq!(shift_months("2024-03-31", -1, date(2000, 1, 1)), "2024-02-29");
    }
}
