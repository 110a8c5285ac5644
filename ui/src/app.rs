use std::time::Duration;

use log::debug;
use tabula_business::{CreateUserCompute, FetchUsersCompute, TOKEN_KEY};

use crate::{pages, state::State, widgets};

/// Poll interval while a command is in flight; results arrive without input events.
const IN_FLIGHT_REPAINT: Duration = Duration::from_millis(100);

pub struct TabulaApp {
    state: State,
}

impl TabulaApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    fn in_flight(&self) -> bool {
        let ctx = &self.state.ctx;
        ctx.cached::<FetchUsersCompute>()
            .is_some_and(|fetch| fetch.loading)
            || ctx
                .cached::<CreateUserCompute>()
                .is_some_and(CreateUserCompute::is_pending)
    }
}

impl eframe::App for TabulaApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Sync Compute for render
        self.state.ctx.sync_computes();

        egui::CentralPanel::default().show(ctx, |ui| {
            pages::dashboard_page(&mut self.state, ui);
        });

        widgets::toasts(ctx, &mut self.state.ctx);

        // Run background jobs
        self.state.ctx.run_computed();

        if self.in_flight() {
            ctx.request_repaint_after(IN_FLIGHT_REPAINT);
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        // eframe storage has no removal; an empty value reads back as no token.
        let token = self.state.tokens.token().unwrap_or_default();
        debug!("TabulaApp::save: persisting token ({} bytes)", token.len());
        storage.set_string(TOKEN_KEY, token);
    }
}
