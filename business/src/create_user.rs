//! User creation form, its command and the compute-shaped result cache.
//!
//! Flow:
//! 1. the form widget edits [`CreateUserForm`]
//! 2. on submit, [`CreateUserForm::submit`] validates; a valid payload goes into
//!    [`CreateUserInput`] and [`CreateUserCommand`] is dispatched
//! 3. the command posts to `/users/add`, raises a toast and publishes the outcome into
//!    [`CreateUserCompute`]; on success the form is reset
//!
//! Field errors are plain values on the form, never `Err`s.

use std::any::{Any, TypeId};

use email_address::EmailAddress;
use log::{error, info, warn};
use serde::Serialize;
use tabula_states::{
    Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, State, Updater,
    state_assign_impl,
};
use tokio_util::sync::CancellationToken;

use crate::api_client::ApiClient;
use crate::entities::User;
use crate::users_api::add_user;

pub const FIRST_NAME_REQUIRED: &str = "First name is required";
pub const LAST_NAME_REQUIRED: &str = "Last name is required";
pub const INVALID_EMAIL: &str = "Invalid email address";
pub const USER_CREATED: &str = "User created successfully";
pub const USER_CREATE_FAILED: &str = "Failed to create user";

/// Validated body of `POST /users/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub first_name: Option<&'static str>,
    pub last_name: Option<&'static str>,
    pub email: Option<&'static str>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }
}

/// Raw text of the form fields plus the errors of the last submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateUserForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: String,
    pub errors: FormErrors,
}

impl CreateUserForm {
    pub fn validate(&self) -> Result<CreateUserPayload, FormErrors> {
        let errors = FormErrors {
            first_name: self.first_name.is_empty().then_some(FIRST_NAME_REQUIRED),
            last_name: self.last_name.is_empty().then_some(LAST_NAME_REQUIRED),
            email: (!EmailAddress::is_valid(&self.email)).then_some(INVALID_EMAIL),
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(CreateUserPayload {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            age: coerce_age(&self.age),
        })
    }

    /// Validate and record the outcome in `errors`.
    pub fn submit(&mut self) -> Option<CreateUserPayload> {
        match self.validate() {
            Ok(payload) => {
                self.errors = FormErrors::default();
                Some(payload)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }
}

/// Leading integer of `raw` (after whitespace and an optional sign), `0` when there is none.
///
/// Non-numeric input is accepted as `0` rather than rejected.
pub fn coerce_age(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0_i64, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(i64::from(digit - b'0'))
        });
    if negative { -value } else { value }
}

impl State for CreateUserForm {
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

/// Input of [`CreateUserCommand`]. `None` means no request intended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateUserInput {
    pub payload: Option<CreateUserPayload>,
}

impl State for CreateUserInput {
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

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CreateUserResult {
    #[default]
    Idle,
    Pending,
    Success(User),
    Error(String),
}

/// Latest create-user outcome. Written only by [`CreateUserCommand`]; `compute` is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateUserCompute {
    pub result: CreateUserResult,
}

impl CreateUserCompute {
    pub fn pending() -> Self {
        Self {
            result: CreateUserResult::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.result, CreateUserResult::Pending)
    }

    pub fn created_user(&self) -> Option<&User> {
        match &self.result {
            CreateUserResult::Success(user) => Some(user),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.result {
            CreateUserResult::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Label of the submit button.
    pub fn submit_label(&self) -> &'static str {
        if self.is_pending() {
            "Creating..."
        } else {
            "Save User"
        }
    }
}

impl State for CreateUserCompute {
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

impl Compute for CreateUserCompute {
    fn deps(&self) -> ComputeDeps {
        const STATE_IDS: [TypeId; 0] = [];
        const COMPUTE_IDS: [TypeId; 0] = [];
        (&STATE_IDS, &COMPUTE_IDS)
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {}
}

/// Posts [`CreateUserInput::payload`] to `/users/add`.
#[derive(Debug, Default)]
pub struct CreateUserCommand;

impl Command for CreateUserCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let payload = snap
            .state::<CreateUserInput>()
            .ok()
            .and_then(|input| input.payload.clone());
        let client = snap.state::<ApiClient>().cloned();

        Box::pin(async move {
            let Some(payload) = payload else {
                info!("CreateUserCommand: no payload set, skipping");
                return;
            };
            let client = match client {
                Ok(client) => client,
                Err(err) => {
                    error!("CreateUserCommand: {err}");
                    updater.set(CreateUserCompute {
                        result: CreateUserResult::Error(err.to_string()),
                    });
                    return;
                }
            };

            info!("CreateUserCommand: creating user {}", payload.email);
            updater.set(CreateUserCompute::pending());

            let result = tokio::select! {
                () = cancel.cancelled() => {
                    warn!("CreateUserCommand: cancelled");
                    updater.set(CreateUserCompute::default());
                    return;
                }
                result = add_user(&client, &payload) => result,
            };

            match result {
                Ok(user) => {
                    info!("CreateUserCommand: created user {}", user.id);
                    client.notifier().success(USER_CREATED);
                    updater.set(CreateUserForm::default());
                    updater.set(CreateUserInput::default());
                    updater.set(CreateUserCompute {
                        result: CreateUserResult::Success(user),
                    });
                }
                Err(err) => {
                    error!("CreateUserCommand: error creating user: {err}");
                    client.notifier().error(USER_CREATE_FAILED);
                    updater.set(CreateUserCompute {
                        result: CreateUserResult::Error(err.to_string()),
                    });
                }
            }
        })
    }
}
