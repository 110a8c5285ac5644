//! Status badges, dates and amounts as shown in table cells.

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Pattern used by [`format_date`] callers without a preference.
pub const DEFAULT_DATE_PATTERN: &str = "DD MMM, YYYY";
/// Upper line of a date cell.
pub const DATE_CELL_PATTERN: &str = "MMMM D, YYYY";
/// Lower line of a date cell.
pub const TIME_CELL_PATTERN: &str = "h:mm A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Success,
    Warning,
    Danger,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTone {
    GreenDark,
    OrangeDark,
    RedDark,
    Gray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub color: BadgeColor,
    pub text: TextTone,
}

impl StatusBadge {
    const SUCCESS: Self = Self {
        color: BadgeColor::Success,
        text: TextTone::GreenDark,
    };
    const WARNING: Self = Self {
        color: BadgeColor::Warning,
        text: TextTone::OrangeDark,
    };
    const DANGER: Self = Self {
        color: BadgeColor::Danger,
        text: TextTone::RedDark,
    };
    const NEUTRAL: Self = Self {
        color: BadgeColor::Default,
        text: TextTone::Gray,
    };
}

/// Case-insensitive lookup in the status vocabulary. Unknown statuses get the neutral badge.
pub fn status_to_badge(status: &str) -> StatusBadge {
    match status.to_lowercase().as_str() {
        "paid" | "active" | "delivered" => StatusBadge::SUCCESS,
        "pending" | "inactive" | "in_transit" => StatusBadge::WARNING,
        "overdue" | "cancelled" => StatusBadge::DANGER,
        _ => StatusBadge::NEUTRAL,
    }
}

/// "$ 544" style amount.
pub fn format_amount(amount: f64) -> String {
    format!("$ {amount}")
}

pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

// Longest first so `MMMM` wins over `MM`.
const TOKENS: [&str; 25] = [
    "YYYY", "MMMM", "dddd", "MMM", "ddd", "SSS", "YY", "MM", "DD", "dd", "HH", "hh", "mm", "ss",
    "ZZ", "M", "D", "d", "H", "h", "m", "s", "A", "a", "Z",
];

/// Render `date` with a dayjs-style pattern, in UTC. `None` renders as an empty string.
///
/// Text inside `[...]` is copied verbatim; characters that are not tokens pass through.
pub fn format_date(date: Option<DateTime<Utc>>, pattern: &str) -> String {
    let Some(date) = date else {
        return String::new();
    };

    let mut out = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;
    while let Some(ch) = rest.chars().next() {
        if ch == '[' {
            if let Some(end) = rest.find(']') {
                out.push_str(&rest[1..end]);
                rest = &rest[end + 1..];
                continue;
            }
        }
        if let Some(token) = TOKENS.iter().find(|token| rest.starts_with(**token)) {
            out.push_str(&render_token(&date, token));
            rest = &rest[token.len()..];
        } else {
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }
    out
}

fn render_token(date: &DateTime<Utc>, token: &str) -> String {
    let (is_pm, hour12) = date.hour12();
    let meridiem = if is_pm { "PM" } else { "AM" };

    match token {
        "YYYY" => format!("{:04}", date.year()),
        "YY" => format!("{:02}", date.year().rem_euclid(100)),
        "MMMM" => date.format("%B").to_string(),
        "MMM" => date.format("%b").to_string(),
        "MM" => format!("{:02}", date.month()),
        "M" => date.month().to_string(),
        "DD" => format!("{:02}", date.day()),
        "D" => date.day().to_string(),
        "dddd" => date.format("%A").to_string(),
        "ddd" => date.format("%a").to_string(),
        "dd" => date.format("%a").to_string().chars().take(2).collect(),
        "d" => date.weekday().num_days_from_sunday().to_string(),
        "HH" => format!("{:02}", date.hour()),
        "H" => date.hour().to_string(),
        "hh" => format!("{hour12:02}"),
        "h" => hour12.to_string(),
        "mm" => format!("{:02}", date.minute()),
        "m" => date.minute().to_string(),
        "ss" => format!("{:02}", date.second()),
        "s" => date.second().to_string(),
        "SSS" => format!("{:03}", date.timestamp_subsec_millis().min(999)),
        "A" => meridiem.to_owned(),
        "a" => meridiem.to_lowercase(),
        "ZZ" => "+0000".to_owned(),
        "Z" => "+00:00".to_owned(),
        other => other.to_owned(),
    }
}
