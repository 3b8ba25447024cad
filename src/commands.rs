//! Application flows built on the API client: login, logout, password
//! management and child record edits.
//!
//! Input checks here are presence checks only; everything else is the
//! backend's call.

use serde::Serialize;
use thiserror::Error;

use crate::api::types::{
    ChangePasswordRequest, ChildProfileFields, ForgotPasswordRequest, LoginRequest,
};
use crate::api::{auth, records, ApiError};
use crate::session::{Role, SessionClaims, StorageError};
use crate::state::AppState;
use crate::view::Notice;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Session could not be saved: {0}")]
    Storage(#[from] StorageError),
    #[error("Invalid credentials or user type")]
    MissingSession,
    #[error("Unknown user type: {0}")]
    UnknownRole(String),
    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CommandError {
    /// User-facing rendering of the failure.
    pub fn notice(&self, title: &str) -> Notice {
        match self {
            CommandError::Api(err) => Notice::from_error(title, err),
            CommandError::Storage(_) => Notice::new(
                title,
                "You are logged in, but your session may not persist after a restart.",
            ),
            other => Notice::new(title, &other.to_string()),
        }
    }
}

/// Who is logged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub user_name: Option<String>,
    pub nic_no: Option<String>,
    pub role: Role,
    pub token_expired: bool,
}

fn require(value: &str, field: &str) -> Result<(), CommandError> {
    if value.trim().is_empty() {
        return Err(CommandError::Validation(format!("Please enter your {}", field)));
    }
    Ok(())
}

/// Log in and persist the returned access token.
///
/// The token is only stored once the response carries both a token and a
/// known user type. A storage failure is reported even though the backend
/// accepted the credentials.
pub async fn login(
    state: &AppState,
    user_name: &str,
    password: &str,
) -> Result<UserIdentity, CommandError> {
    require(user_name, "username")?;
    require(password, "password")?;

    log::info!("Logging in as {}", user_name);

    let request = LoginRequest {
        user_name: user_name.to_string(),
        password: password.to_string(),
    };
    let resp = auth::login(&state.api, &request).await?;

    let (Some(access_token), Some(user_type)) = (resp.access_token, resp.user_type) else {
        return Err(CommandError::MissingSession);
    };
    let Some(role) = Role::parse(&user_type) else {
        return Err(CommandError::UnknownRole(user_type));
    };

    state.tokens().save(&access_token)?;

    log::info!("Login complete ({:?})", role);
    Ok(UserIdentity {
        user_name: resp.user_name.or_else(|| Some(user_name.to_string())),
        nic_no: resp.nic_no,
        role,
        token_expired: false,
    })
}

/// Logout: tell the backend (best-effort), then forget the token locally.
pub async fn logout(state: &AppState) -> Result<(), CommandError> {
    log::info!("Logging out");

    if let Err(e) = auth::logout(&state.api).await {
        log::warn!("Logout request failed (will continue local cleanup): {}", e);
    }

    state.tokens().clear()?;

    log::info!("Logout complete");
    Ok(())
}

/// The identity embedded in the stored token, if one is stored.
///
/// An unreadable store or an undecodable token both count as logged out.
pub fn current_user(state: &AppState) -> Option<UserIdentity> {
    let token = match state.tokens().load() {
        Ok(Some(token)) => token,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Failed to read stored token: {}", e);
            return None;
        }
    };

    let claims = match SessionClaims::decode(&token) {
        Ok(claims) => claims,
        Err(e) => {
            log::warn!("Stored token is not a readable JWT: {}", e);
            return None;
        }
    };

    let role = claims.role()?;
    Some(UserIdentity {
        user_name: claims.user_name.clone(),
        nic_no: claims.nic_no.clone(),
        role,
        token_expired: claims.is_expired(),
    })
}

pub async fn change_password(
    state: &AppState,
    user_name: &str,
    current_password: &str,
    new_password: &str,
) -> Result<(), CommandError> {
    if user_name.is_empty() || current_password.is_empty() || new_password.is_empty() {
        return Err(CommandError::Validation(
            "Please fill in all fields".to_string(),
        ));
    }
    if current_password == new_password {
        return Err(CommandError::Validation(
            "New password must be different from the current password".to_string(),
        ));
    }

    let request = ChangePasswordRequest {
        user_name: user_name.to_string(),
        password: current_password.to_string(),
        new_password: new_password.to_string(),
    };
    auth::change_password(&state.api, &request).await?;

    log::info!("Password updated for {}", user_name);
    Ok(())
}

/// Request password reset instructions. Returns the server's message.
pub async fn forgot_password(state: &AppState, email: &str) -> Result<Option<String>, CommandError> {
    require(email, "email address")?;

    let request = ForgotPasswordRequest {
        email: email.trim().to_string(),
    };
    Ok(auth::forgot_password(&state.api, &request).await?)
}

/// Save edited medical fields for one child.
pub async fn save_child_fields(
    state: &AppState,
    child_id: &str,
    fields: &ChildProfileFields,
) -> Result<(), CommandError> {
    require(child_id, "child id")?;
    if fields.trimmed().is_empty() {
        return Err(CommandError::Validation("Nothing to update".to_string()));
    }

    records::update_child_fields(&state.api, child_id, fields).await?;
    log::info!("Updated medical fields for child {}", child_id);
    Ok(())
}
