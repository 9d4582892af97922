//! Session state and the login/registration rules.
//!
//! One session per running instance. Credentials are compared in plaintext
//! against the mock directory; there is no real security model here.

use crate::domain::{CommodityId, MarketId, NewUser, User};
use crate::store::UserDirectory;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

/// Failures of session-level actions. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Same message for unknown phone and wrong password.
    #[error("Invalid phone number or password")]
    InvalidCredentials,
    #[error("Phone number already registered")]
    PhoneTaken,
    #[error("You must be logged in to submit prices")]
    NotAuthenticated,
    #[error("Only reporters can submit prices")]
    NotReporter,
    #[error("Unknown commodity: {0}")]
    UnknownCommodity(CommodityId),
    #[error("Unknown market: {0}")]
    UnknownMarket(MarketId),
}

/// The signed-in user, if any.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current_user: Option<User>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    /// Sign in with an exact phone and password match.
    pub fn login(
        &mut self,
        directory: &UserDirectory,
        phone: &str,
        password: &str,
    ) -> Result<&User, SessionError> {
        let Some(user) = directory.find_by_credentials(phone, password) else {
            warn!("Login rejected");
            return Err(SessionError::InvalidCredentials);
        };
        info!(user_id = %user.id, role = %user.role, "User logged in");
        Ok(self.current_user.insert(user.clone()))
    }

    /// Add a user to the directory and sign them in.
    ///
    /// A taken phone number leaves both the directory and the session untouched.
    pub fn register(
        &mut self,
        directory: &mut UserDirectory,
        new_user: NewUser,
    ) -> Result<&User, SessionError> {
        let Some(user) = directory.insert(new_user) else {
            warn!("Registration rejected: phone already registered");
            return Err(SessionError::PhoneTaken);
        };
        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(self.current_user.insert(user.clone()))
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.current_user.take() {
            info!(user_id = %user.id, "User logged out");
        }
    }

    /// The current user, provided they may submit prices.
    pub fn authorize_report(&self) -> Result<&User, SessionError> {
        let user = self
            .current_user
            .as_ref()
            .ok_or(SessionError::NotAuthenticated)?;
        if !user.role.can_report_prices() {
            return Err(SessionError::NotReporter);
        }
        Ok(user)
    }
}

/// Flat `{success, message}` rendering of an action result for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActionOutcome {
    pub fn from_result<T>(result: &Result<T, SessionError>, success_message: Option<&str>) -> Self {
        match result {
            Ok(_) => Self {
                success: true,
                message: success_message.map(str::to_string),
            },
            Err(err) => Self {
                success: false,
                message: Some(err.to_string()),
            },
        }
    }
}
