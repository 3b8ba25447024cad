//! Profile endpoints for the parent and doctor home screens.

use super::client::ApiClient;
use super::outcome::Outcome;
use super::types::{
    ChildProfile, DoctorInfoResponse, ParentChildProfilesResponse, ParentNameResponse,
    PatientSummary,
};

/// GET /auth/parent-name
pub async fn parent_name(client: &ApiClient) -> Outcome<String> {
    let resp: ParentNameResponse = client.get("/auth/parent-name").await?;
    Ok(resp.full_name)
}

/// GET /auth/doctor-name
pub async fn doctor_info(client: &ApiClient) -> Outcome<DoctorInfoResponse> {
    client.get("/auth/doctor-name").await
}

/// GET /auth/parent-child-profiles
///
/// The backend wraps the list: `{ "childProfiles": [...] }`.
pub async fn parent_child_profiles(client: &ApiClient) -> Outcome<Vec<ChildProfile>> {
    let resp: ParentChildProfilesResponse = client.get("/auth/parent-child-profiles").await?;
    Ok(resp.child_profiles)
}

/// GET /auth/doctor-child-profiles
///
/// Unlike the parent variant this returns a bare array.
pub async fn doctor_child_profiles(client: &ApiClient) -> Outcome<Vec<PatientSummary>> {
    client.get("/auth/doctor-child-profiles").await
}

/// Case-insensitive substring filter used by the doctor's patient search.
pub fn filter_patients<'a>(patients: &'a [PatientSummary], query: &str) -> Vec<&'a PatientSummary> {
    let needle = query.to_lowercase();
    patients
        .iter()
        .filter(|p| p.full_name.to_lowercase().contains(&needle))
        .collect()
}
