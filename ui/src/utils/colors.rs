//! Shared color constants for the UI.

use egui::Color32;
use tabula_business::ToastLevel;
use tabula_business::format::{BadgeColor, TextTone};

/// Forest green color for success status.
pub const COLOR_GREEN: Color32 = Color32::from_rgb(34, 139, 34);

/// Red color for error/danger status.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Amber color for warning/pending status.
pub const COLOR_AMBER: Color32 = Color32::from_rgb(255, 193, 7);

pub const COLOR_GRAY: Color32 = Color32::from_rgb(156, 163, 175);

pub const COLOR_GREEN_DARK: Color32 = Color32::from_rgb(17, 94, 50);
pub const COLOR_ORANGE_DARK: Color32 = Color32::from_rgb(194, 65, 12);
pub const COLOR_RED_DARK: Color32 = Color32::from_rgb(153, 27, 27);
pub const COLOR_GRAY_DARK: Color32 = Color32::from_rgb(75, 85, 99);

/// Fill of the dot in front of a status label.
pub fn badge_color(color: BadgeColor) -> Color32 {
    match color {
        // Success dots are muted gray.
        BadgeColor::Success | BadgeColor::Default => COLOR_GRAY,
        BadgeColor::Warning => COLOR_AMBER,
        BadgeColor::Danger => COLOR_RED,
    }
}

pub fn text_tone(tone: TextTone) -> Color32 {
    match tone {
        TextTone::GreenDark => COLOR_GREEN_DARK,
        TextTone::OrangeDark => COLOR_ORANGE_DARK,
        TextTone::RedDark => COLOR_RED_DARK,
        TextTone::Gray => COLOR_GRAY_DARK,
    }
}

pub fn toast_color(level: ToastLevel) -> Color32 {
    match level {
        ToastLevel::Info => COLOR_GRAY_DARK,
        ToastLevel::Success => COLOR_GREEN,
        ToastLevel::Warning => COLOR_AMBER,
        ToastLevel::Error => COLOR_RED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_business::format::status_to_badge;

    #[test]
    fn unknown_status_is_gray() {
        let badge = status_to_badge("archived");
        assert_eq!(badge_color(badge.color), COLOR_GRAY);
        assert_eq!(text_tone(badge.text), COLOR_GRAY_DARK);
    }

    #[test]
    fn overdue_is_red() {
        let badge = status_to_badge("Overdue");
        assert_eq!(badge_color(badge.color), COLOR_RED);
        assert_eq!(text_tone(badge.text), COLOR_RED_DARK);
    }
}
