//! Account endpoints: login, logout and password management.

use super::client::ApiClient;
use super::outcome::Outcome;
use super::request::RequestDescriptor;
use super::types::{
    ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse,
};

/// POST /auth/login. Sent without credentials if none are stored yet.
pub async fn login(client: &ApiClient, request: &LoginRequest) -> Outcome<LoginResponse> {
    client.post("/auth/login", request).await
}

/// POST /auth/logout with the current token. The response body is ignored.
pub async fn logout(client: &ApiClient) -> Outcome<()> {
    client
        .request(RequestDescriptor::post("/auth/logout"))
        .await
        .map(|_| ())
}

/// PATCH /auth/change-password. The response body is ignored.
pub async fn change_password(client: &ApiClient, request: &ChangePasswordRequest) -> Outcome<()> {
    let _: serde_json::Value = client.patch("/auth/change-password", request).await?;
    Ok(())
}

/// POST /auth/forgot-password. Returns the server's message, if it sent one.
pub async fn forgot_password(
    client: &ApiClient,
    request: &ForgotPasswordRequest,
) -> Outcome<Option<String>> {
    let value: serde_json::Value = client.post("/auth/forgot-password", request).await?;
    // Acknowledgement bodies vary; only a `message` string is meaningful.
    let ack: MessageResponse = serde_json::from_value(value).unwrap_or_default();
    Ok(ack.message)
}
