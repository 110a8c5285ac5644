//! Cell rendering functions for the generic table.
//!
//! Each [`Cell`] variant maps to one small widget. Interactive cells push a [`TableAction`].

use chrono::{DateTime, Utc};
use egui::{Align2, Button, FontId, RichText, Sense, Ui, Vec2, WidgetInfo, WidgetType};
use log::debug;
use tabula_business::format::{
    DATE_CELL_PATTERN, TIME_CELL_PATTERN, format_amount, format_date, status_to_badge,
};
use tabula_business::table::{Cell, TableAction};

use crate::utils::colors::{COLOR_GRAY, badge_color, text_tone};

pub const SELECT_ROW_LABEL: &str = "Select row";

const AVATAR_SIZE: f32 = 32.0;
const DOT_RADIUS: f32 = 4.0;

#[inline]
pub fn render_cell(
    ui: &mut Ui,
    cell: &Cell,
    row_id: &str,
    selected: bool,
    actions: &mut Vec<TableAction>,
) {
    match cell {
        Cell::Text(text) => {
            ui.label(text);
        }
        Cell::Avatar {
            name,
            description,
            src,
        } => render_avatar_cell(ui, name, description.as_deref(), src.as_deref()),
        Cell::Date(date) => render_date_cell(ui, date),
        Cell::Amount(amount) => {
            ui.label(RichText::new(format_amount(*amount)).strong());
        }
        Cell::Status(status) => render_status_cell(ui, status),
        Cell::SelectRow => {
            if render_select_row(ui, selected) {
                actions.push(TableAction::ToggleRowSelected(row_id.to_owned()));
            }
        }
        Cell::Action => {
            if ui.add(Button::new("➕").small()).clicked() {
                debug!("row action clicked for {row_id}");
            }
        }
        Cell::Empty => {}
    }
}

/// Initials in a circle, then the name over a muted description.
///
/// Remote avatars are not fetched; the source is shown on hover.
fn render_avatar_cell(ui: &mut Ui, name: &str, description: Option<&str>, src: Option<&str>) {
    ui.horizontal(|ui| {
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(AVATAR_SIZE), Sense::hover());
        let painter = ui.painter();
        painter.circle_filled(rect.center(), AVATAR_SIZE / 2.0, COLOR_GRAY);
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            initials(name),
            FontId::proportional(13.0),
            ui.visuals().strong_text_color(),
        );
        if let Some(src) = src {
            response.on_hover_text(src);
        }

        ui.vertical(|ui| {
            ui.label(RichText::new(name).strong());
            if let Some(description) = description {
                ui.label(RichText::new(description).small().weak());
            }
        });
    });
}

fn render_date_cell(ui: &mut Ui, date: &DateTime<Utc>) {
    ui.vertical(|ui| {
        ui.label(format_date(Some(*date), DATE_CELL_PATTERN));
        ui.label(RichText::new(format_date(Some(*date), TIME_CELL_PATTERN)).small().weak());
    });
}

/// Colored dot followed by the capitalized status.
pub fn render_status_cell(ui: &mut Ui, status: &str) {
    let badge = status_to_badge(status);
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(DOT_RADIUS * 2.0), Sense::hover());
        ui.painter()
            .circle_filled(rect.center(), DOT_RADIUS, badge_color(badge.color));
        ui.label(
            RichText::new(capitalize(status))
                .strong()
                .color(text_tone(badge.text)),
        );
    });
}

fn render_select_row(ui: &mut Ui, selected: bool) -> bool {
    let mut checked = selected;
    let response = ui.checkbox(&mut checked, "");
    response.widget_info(|| {
        WidgetInfo::selected(WidgetType::Checkbox, true, selected, SELECT_ROW_LABEL)
    });
    response.changed()
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Upper-cases the first letter of every word.
fn capitalize(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
