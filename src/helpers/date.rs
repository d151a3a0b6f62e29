//! Date helper functions

use chrono::{Datelike, NaiveDate};

/// Format a date the way the reader's locale writes a long date
///
/// # Examples
/// ```ignore
/// localized_date(&date, "ko") // -> "2024년 1월 15일"
/// localized_date(&date, "en") // -> "January 15, 2024"
/// ```
pub fn localized_date(date: &NaiveDate, language: &str) -> String {
    let base = language.split(['-', '_']).next().unwrap_or_default();

    match base.to_ascii_lowercase().as_str() {
        "ko" => format!("{}년 {}월 {}일", date.year(), date.month(), date.day()),
        "ja" | "zh" => format!("{}年{}月{}日", date.year(), date.month(), date.day()),
        _ => full_date(date),
    }
}

/// Format date in full format (like "January 15, 2024")
pub fn full_date(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
