//! Render candidate slots as human-readable suggestions.
//!
//! The numbers and times in the output are fixed; month names and the
//! participant summary wording come from a [`Locale`].

use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::slot::CandidateSlot;

/// Wording used when formatting a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    /// Month names, January first. Must contain exactly 12 entries.
    pub month_names: Vec<String>,
    /// Summary shown in parentheses. `{available}`, `{total}` and `{percent}`
    /// are replaced with the slot's numbers.
    pub summary_template: String,
}

impl Locale {
    /// Turkish wording, e.g. `19 Kasım 2025, 10:00 - 11:00 (4/5 katılımcı uygun, %80)`.
    pub fn turkish() -> Self {
        Self::from_parts(
            [
                "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos",
                "Eylül", "Ekim", "Kasım", "Aralık",
            ],
            "{available}/{total} katılımcı uygun, %{percent}",
        )
    }

    /// English wording, e.g. `19 November 2025, 10:00 - 11:00 (4/5 participants available, 80%)`.
    pub fn english() -> Self {
        Self::from_parts(
            [
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
            ],
            "{available}/{total} participants available, {percent}%",
        )
    }

    /// Look up a built-in locale by language code (`tr`, `en`).
    pub fn by_code(code: &str) -> Result<Self> {
        match code.to_ascii_lowercase().as_str() {
            "tr" | "tr-tr" | "turkish" => Ok(Self::turkish()),
            "en" | "en-us" | "en-gb" | "english" => Ok(Self::english()),
            other => Err(SlotError::InvalidConfig(format!(
                "unknown locale '{}'. Available locales: tr, en",
                other
            ))),
        }
    }

    fn from_parts(months: [&str; 12], template: &str) -> Self {
        Self {
            month_names: months.iter().map(|m| m.to_string()).collect(),
            summary_template: template.to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.month_names.len() != 12 {
            return Err(SlotError::InvalidConfig(format!(
                "locale needs 12 month names, got {}",
                self.month_names.len()
            )));
        }
        Ok(())
    }

    fn month_name(&self, month: u32) -> &str {
        self.month_names
            .get(month as usize - 1)
            .map(String::as_str)
            .unwrap_or("")
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::turkish()
    }
}

/// Format a slot as `"{day} {month} {year}, {HH:MM} - {HH:MM} ({summary})"`.
///
/// Times are shown in the slot's own UTC offset. The percentage is rounded to
/// the nearest integer, ties to even (62.5 shows as 62).
pub fn format_slot(slot: &CandidateSlot, locale: &Locale) -> String {
    let start = slot.start_time;
    let end = slot.end_time;

    let summary = locale
        .summary_template
        .replace("{available}", &slot.available_count.to_string())
        .replace("{total}", &slot.total_participants.to_string())
        .replace("{percent}", &format!("{:.0}", slot.availability_percentage));

    format!(
        "{:02} {} {}, {:02}:{:02} - {:02}:{:02} ({})",
        start.day(),
        locale.month_name(start.month()),
        start.year(),
        start.hour(),
        start.minute(),
        end.hour(),
        end.minute(),
        summary
    )
}
