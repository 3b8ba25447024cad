//! Request and response types for the KidsCare backend API.
//!
//! All structs use camelCase serialization to match the API's JSON format.
//! The backend owns these shapes; fields the screens can live without are
//! optional so an additive schema change does not break decoding.

use serde::{Deserialize, Deserializer, Serialize};

/// Login request body sent to POST /auth/login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

/// Login response from POST /auth/login.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: Option<String>,
    pub nic_no: Option<String>,
    pub user_name: Option<String>,
    pub user_type: Option<String>,
}

/// Body of PATCH /auth/change-password.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub user_name: String,
    pub password: String,
    pub new_password: String,
}

/// Body of POST /auth/forgot-password.
#[derive(Debug, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Generic `{ "message": ... }` acknowledgement.
#[derive(Debug, Default, Deserialize)]
pub struct MessageResponse {
    pub message: Option<String>,
}

/// Response from GET /auth/parent-name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentNameResponse {
    pub full_name: String,
}

/// Response from GET /auth/doctor-name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorInfoResponse {
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub credentials: Vec<String>,
}

/// A child profile as listed for a parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildProfile {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub full_name: String,
    pub gender: Option<String>,
    pub birth_date: Option<String>,
    pub birth_place: Option<String>,
    pub vaccines_given: Option<String>,
    pub vaccines_to_be_given: Option<String>,
}

/// Response from GET /auth/parent-child-profiles.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentChildProfilesResponse {
    pub child_profiles: Vec<ChildProfile>,
}

/// A patient entry from GET /auth/doctor-child-profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub full_name: String,
    pub birth_date: Option<String>,
}

/// Editable medical fields of a child profile.
///
/// Read and written via PATCH /auth/child-profile-fields/{childId}. On
/// writes only the populated fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildProfileFields {
    /// Backend spelling is `alergies`.
    #[serde(rename = "alergies", alias = "allergies", skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub born_diseases: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vaccines_given: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vaccines_to_be_given: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_records: Option<String>,
}

/// An announcement shown on the announcements screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    pub date: String,
    pub content: String,
}

/// Explicit `null` decodes the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Identifiers arrive as either strings or integers depending on the table.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Str(String),
        Num(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Str(s) => s,
        Id::Num(n) => n.to_string(),
    })
}
