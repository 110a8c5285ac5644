//! New-user form hosted in the dashboard drawer.

use egui::{Button, RichText, TextEdit, Ui, vec2};
use log::info;
use tabula_business::{CreateUserCommand, CreateUserCompute, CreateUserForm, CreateUserInput};
use tabula_states::StateCtx;

use crate::utils::colors::COLOR_RED;

pub const FIRST_NAME_HINT: &str = "First name";
pub const LAST_NAME_HINT: &str = "Last name";
pub const EMAIL_HINT: &str = "Email";
pub const AGE_HINT: &str = "Age";

const SUBMIT_HEIGHT: f32 = 36.0;

/// Renders the form fields with their inline errors and the submit button.
///
/// A valid submit stores the payload in [`CreateUserInput`] and dispatches [`CreateUserCommand`];
/// an invalid one only records the field errors. Returns whether a request was dispatched.
pub fn user_form(state_ctx: &mut StateCtx, ui: &mut Ui) -> bool {
    let compute = state_ctx
        .cached::<CreateUserCompute>()
        .cloned()
        .unwrap_or_default();
    let pending = compute.is_pending();

    let mut payload = None;
    state_ctx.update::<CreateUserForm>(|form| {
        let errors = form.errors.clone();
        ui.vertical(|ui| {
            ui.spacing_mut().item_spacing.y = 4.0;
            form_field(ui, &mut form.first_name, FIRST_NAME_HINT, errors.first_name);
            form_field(ui, &mut form.last_name, LAST_NAME_HINT, errors.last_name);
            form_field(ui, &mut form.email, EMAIL_HINT, errors.email);
            form_field(ui, &mut form.age, AGE_HINT, None);
        });

        ui.add_space(16.0);
        let submit = Button::new(compute.submit_label())
            .min_size(vec2(ui.available_width(), SUBMIT_HEIGHT));
        if ui.add_enabled(!pending, submit).clicked() {
            payload = form.submit();
        }
    });

    let Some(payload) = payload else {
        return false;
    };
    info!("user_form: submitting {}", payload.email);
    state_ctx.update::<CreateUserInput>(|input| input.payload = Some(payload));
    // Published before the dispatch so the command's result always lands after it.
    let updater = state_ctx.updater();
    updater.set(CreateUserCompute::pending());
    if state_ctx.dispatch::<CreateUserCommand>().is_some() {
        true
    } else {
        updater.set(CreateUserCompute::default());
        false
    }
}

fn form_field(ui: &mut Ui, value: &mut String, hint: &str, error: Option<&str>) {
    ui.add(
        TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(f32::INFINITY),
    );
    if let Some(error) = error {
        ui.label(RichText::new(error).small().color(COLOR_RED));
    }
    ui.add_space(8.0);
}
