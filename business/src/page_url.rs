//! Address of the dashboard page and the query derived from it.
//!
//! The toolbar and pagination write `search` and `limit` into [`PageUrl`];
//! [`DashboardQuery`] re-derives from it and drives the users fetch.

use std::any::{Any, TypeId};

use log::{debug, warn};
use tabula_states::{Compute, ComputeDeps, Dep, State, Updater, state_assign_impl};
use url::Url;

pub const DEFAULT_PAGE_URL: &str = "http://localhost/dashboard";
pub const DEFAULT_LIMIT: u32 = 10;
pub const SEARCH_PARAM: &str = "search";
pub const LIMIT_PARAM: &str = "limit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUrl {
    url: Url,
}

impl Default for PageUrl {
    fn default() -> Self {
        Self::parse(DEFAULT_PAGE_URL).expect("DEFAULT_PAGE_URL is an absolute url")
    }
}

impl PageUrl {
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        Url::parse(raw).map(|url| Self { url })
    }

    /// Like [`PageUrl::parse`], but falls back to the default page on invalid input.
    pub fn parse_or_default(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_else(|err| {
            warn!("PageUrl: invalid url {raw:?} ({err}), using default");
            Self::default()
        })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Replace `name` while keeping every other parameter. An empty value removes it.
    pub fn set_param(&mut self, name: &str, value: &str) {
        let kept: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter(|(key, _)| key != name)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        {
            let mut pairs = self.url.query_pairs_mut();
            pairs.clear();
            for (key, value) in &kept {
                pairs.append_pair(key, value);
            }
            if !value.is_empty() {
                pairs.append_pair(name, value);
            }
        }
        if self.url.query() == Some("") {
            self.url.set_query(None);
        }
        debug!("PageUrl: {}", self.url);
    }
}

impl State for PageUrl {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

/// What the users table should show, derived from [`PageUrl`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardQuery {
    pub limit: u32,
    pub search: Option<String>,
}

impl Default for DashboardQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            search: None,
        }
    }
}

impl DashboardQuery {
    /// Missing, unparsable or zero `limit` falls back to [`DEFAULT_LIMIT`]; empty `search` is none.
    pub fn from_url(url: &PageUrl) -> Self {
        let limit = url
            .param(LIMIT_PARAM)
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_LIMIT);
        let search = url.param(SEARCH_PARAM).filter(|search| !search.is_empty());
        Self { limit, search }
    }
}

impl State for DashboardQuery {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

impl Compute for DashboardQuery {
    fn deps(&self) -> ComputeDeps {
        const STATE_IDS: [TypeId; 1] = [TypeId::of::<PageUrl>()];
        const COMPUTE_IDS: [TypeId; 0] = [];
        (&STATE_IDS, &COMPUTE_IDS)
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) {
        match deps.get_state_ref::<PageUrl>() {
            Ok(url) => {
                let next = Self::from_url(url);
                if next != *self {
                    updater.set(next);
                }
            }
            Err(err) => warn!("DashboardQuery: {err}"),
        }
    }
}
