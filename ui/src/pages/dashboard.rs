//! Dashboard page.
//!
//! The users tab is bound to the page URL: its search box and page size write `search` and
//! `limit`, which re-derive [`DashboardQuery`] and trigger a new fetch. The invoices and roles
//! tabs show static rows and keep their view state local.

use egui::{Id, RichText, ScrollArea, SidePanel, Ui};
use log::debug;
use tabula_business::columns::{
    person_columns, person_table_config, role_columns, role_table_config, user_columns,
    user_table_config,
};
use tabula_business::entities::{sample_persons, sample_roles};
use tabula_business::page_url::{LIMIT_PARAM, SEARCH_PARAM};
use tabula_business::table::{DataTable, TableAction};
use tabula_business::{
    CreateUserCompute, DashboardQuery, FetchUsersCompute, PageUrl, Person, Role, User,
    UsersFetcher,
};
use tabula_states::StateCtx;

use crate::state::State;
use crate::utils::colors::COLOR_RED;
use crate::widgets::{self, TableResponse};

pub const NEW_USER_LABEL: &str = "New User";
pub const RETRY_LABEL: &str = "Retry";
pub const LOADING_LABEL: &str = "Loading users...";

const DRAWER_WIDTH: f32 = 600.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DashboardTab {
    #[default]
    Users,
    Invoices,
    Roles,
}

impl DashboardTab {
    const ALL: [Self; 3] = [Self::Users, Self::Invoices, Self::Roles];

    fn label(self) -> &'static str {
        match self {
            Self::Users => "Users",
            Self::Invoices => "Invoices",
            Self::Roles => "Roles",
        }
    }
}

/// Per-page UI state that lives outside the [`StateCtx`].
#[derive(Debug)]
pub struct DashboardState {
    pub fetcher: UsersFetcher,
    pub users_table: DataTable<User>,
    pub invoices_table: DataTable<Person>,
    pub invoices: Vec<Person>,
    pub roles_table: DataTable<Role>,
    pub roles: Vec<Role>,
    pub tab: DashboardTab,
    pub drawer_open: bool,
    /// A create request was dispatched from the drawer and has not finished yet.
    create_pending: bool,
}

impl DashboardState {
    /// Start the users table from the query the app was opened with.
    pub fn new(query: &DashboardQuery) -> Self {
        let mut users_table = DataTable::new(user_columns(), user_table_config());
        users_table.set_page_size(query.limit as usize);
        if let Some(search) = &query.search {
            users_table.set_global_filter(search.as_str());
        }

        Self {
            fetcher: UsersFetcher::default(),
            users_table,
            invoices_table: DataTable::new(person_columns(), person_table_config()),
            invoices: sample_persons(),
            roles_table: DataTable::new(role_columns(), role_table_config()),
            roles: sample_roles(),
            tab: DashboardTab::default(),
            drawer_open: false,
            create_pending: false,
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(&DashboardQuery::default())
    }
}

/// Renders the dashboard and keeps the users fetch in step with the page URL.
pub fn dashboard_page(state: &mut State, ui: &mut Ui) {
    let State { ctx, dashboard, .. } = state;
    dashboard.fetcher.sync(ctx);
    close_drawer_after_create(ctx, dashboard);

    ui.horizontal(|ui| {
        ui.heading("Dashboard");
        ui.add_space(16.0);
        if ui.button(format!("➕ {NEW_USER_LABEL}")).clicked() {
            dashboard.drawer_open = true;
        }
    });
    ui.separator();

    if dashboard.drawer_open {
        SidePanel::left(Id::new("new_user_drawer"))
            .default_width(DRAWER_WIDTH)
            .resizable(true)
            .show_inside(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(NEW_USER_LABEL);
                    if ui.small_button("✕").clicked() {
                        dashboard.drawer_open = false;
                    }
                });
                ui.add_space(12.0);
                if widgets::user_form(ctx, ui) {
                    dashboard.create_pending = true;
                }
            });
    }

    ui.horizontal(|ui| {
        for tab in DashboardTab::ALL {
            ui.selectable_value(&mut dashboard.tab, tab, tab.label());
        }
    });
    ui.add_space(8.0);

    ScrollArea::vertical()
        .id_salt("dashboard_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| match dashboard.tab {
            DashboardTab::Users => users_tab(ctx, dashboard, ui),
            DashboardTab::Invoices => {
                widgets::generic_table(ui, &dashboard.invoices_table, &dashboard.invoices, "invoices")
                    .apply_to(&mut dashboard.invoices_table);
            }
            DashboardTab::Roles => {
                widgets::generic_table(ui, &dashboard.roles_table, &dashboard.roles, "roles")
                    .apply_to(&mut dashboard.roles_table);
            }
        });
}

fn users_tab(ctx: &mut StateCtx, dashboard: &mut DashboardState, ui: &mut Ui) {
    let (loading, error) = ctx
        .cached::<FetchUsersCompute>()
        .map(|fetch| (fetch.loading, fetch.error.clone()))
        .unwrap_or_default();

    if loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.weak(LOADING_LABEL);
        });
    }
    if let Some(error) = error {
        ui.horizontal(|ui| {
            ui.label(RichText::new(error).color(COLOR_RED));
            if ui.button(RETRY_LABEL).clicked() {
                dashboard.fetcher.reload(ctx);
            }
        });
    }

    let response = {
        let rows = ctx
            .cached::<FetchUsersCompute>()
            .map_or(&[][..], FetchUsersCompute::users);
        widgets::generic_table(ui, &dashboard.users_table, rows, "users")
    };
    apply_users_actions(ctx, &mut dashboard.users_table, response);
}

/// Apply the users table actions, mirroring search and page size into the page URL.
pub fn apply_users_actions(
    ctx: &mut StateCtx,
    table: &mut DataTable<User>,
    response: TableResponse,
) {
    for action in &response.actions {
        match action {
            TableAction::SetGlobalFilter(search) => {
                debug!("dashboard: search -> {search:?}");
                ctx.update::<PageUrl>(|url| url.set_param(SEARCH_PARAM, search));
            }
            TableAction::SetPageSize(size) => {
                debug!("dashboard: limit -> {size}");
                ctx.update::<PageUrl>(|url| url.set_param(LIMIT_PARAM, &size.to_string()));
            }
            TableAction::ClearFilters => {
                ctx.update::<PageUrl>(|url| url.set_param(SEARCH_PARAM, ""));
            }
            _ => {}
        }
    }
    response.apply_to(table);
}

/// Runs before the form, so the frame that dispatched a request never checks it.
fn close_drawer_after_create(ctx: &StateCtx, dashboard: &mut DashboardState) {
    if !dashboard.create_pending {
        return;
    }
    let Some(create) = ctx.cached::<CreateUserCompute>() else {
        return;
    };
    if create.is_pending() {
        return;
    }
    dashboard.create_pending = false;
    if create.created_user().is_some() {
        dashboard.drawer_open = false;
    }
}
