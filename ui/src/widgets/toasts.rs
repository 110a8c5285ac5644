//! Toast overlay in the bottom-right corner.

use std::time::{Duration, Instant};

use egui::{Align2, Frame, Id, Order, RichText, vec2};
use tabula_business::{ToastCenter, ToastLevel};
use tabula_states::StateCtx;

use crate::utils::colors::toast_color;

const TOAST_MARGIN: f32 = 16.0;
const TOAST_WIDTH: f32 = 320.0;

/// Moves newly raised toasts on screen, drops expired ones and draws the rest.
pub fn toasts(ctx: &egui::Context, state_ctx: &mut StateCtx) {
    let now = Instant::now();
    let center = state_ctx.state_mut::<ToastCenter>();
    center.pump(now);
    if center.active().is_empty() {
        return;
    }

    let mut dismissed = None;
    egui::Area::new(Id::new("toasts"))
        .order(Order::Foreground)
        .anchor(Align2::RIGHT_BOTTOM, vec2(-TOAST_MARGIN, -TOAST_MARGIN))
        .show(ctx, |ui| {
            ui.set_max_width(TOAST_WIDTH);
            for (index, active) in center.active().iter().enumerate() {
                Frame::popup(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(level_icon(active.toast.level))
                                .color(toast_color(active.toast.level)),
                        );
                        ui.label(&active.toast.message);
                        if ui.small_button("✕").clicked() {
                            dismissed = Some(index);
                        }
                    });
                });
            }
        });

    if let Some(index) = dismissed {
        center.dismiss(index);
    }

    // Wake up for the next expiry even without input.
    let next_expiry = center
        .active()
        .iter()
        .map(|active| {
            active
                .toast
                .duration
                .saturating_sub(now.saturating_duration_since(active.shown_at))
        })
        .min()
        .unwrap_or(Duration::ZERO);
    ctx.request_repaint_after(next_expiry);
}

fn level_icon(level: ToastLevel) -> &'static str {
    match level {
        ToastLevel::Info => "ℹ",
        ToastLevel::Success => "✔",
        ToastLevel::Warning => "⚠",
        ToastLevel::Error => "✖",
    }
}
