//! Child medical fields: allergies, congenital diseases, vaccinations and
//! medical records.
//!
//! The backend serves both reads and writes from
//! PATCH /auth/child-profile-fields/{childId}: an empty PATCH returns the
//! current fields, a PATCH with a body updates them.

use super::client::{with_body, ApiClient};
use super::outcome::Outcome;
use super::request::RequestDescriptor;
use super::types::ChildProfileFields;

const CHILD_FIELDS_PATH: &str = "/auth/child-profile-fields";

pub const NO_ALLERGIES: &str = "No allergies specified";
pub const NO_DISEASES: &str = "No diseases specified";
pub const NO_VACCINES_GIVEN: &str = "No vaccines given yet";
pub const NO_UPCOMING_VACCINES: &str = "No upcoming vaccines";
pub const NO_RECORDS: &str = "No records specified";

/// Fetch the medical fields of one child.
pub async fn fetch_child_fields(client: &ApiClient, child_id: &str) -> Outcome<ChildProfileFields> {
    let descriptor = RequestDescriptor::patch(CHILD_FIELDS_PATH).param(child_id);
    // Null body: profile exists but has nothing filled in
    let fields: Option<ChildProfileFields> = client.request_json(descriptor).await?;
    Ok(fields.unwrap_or_default())
}

/// Update the populated fields of one child. Values are trimmed first.
pub async fn update_child_fields(
    client: &ApiClient,
    child_id: &str,
    fields: &ChildProfileFields,
) -> Outcome<()> {
    let update = fields.trimmed();
    let descriptor = with_body(
        RequestDescriptor::patch(CHILD_FIELDS_PATH).param(child_id),
        &update,
    )?;
    client.request(descriptor).await.map(|_| ())
}

fn or_placeholder<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => placeholder,
    }
}

impl ChildProfileFields {
    /// Copy with every present value trimmed. Values that trim to nothing
    /// are dropped.
    pub fn trimmed(&self) -> Self {
        let trim = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            allergies: trim(&self.allergies),
            born_diseases: trim(&self.born_diseases),
            vaccines_given: trim(&self.vaccines_given),
            vaccines_to_be_given: trim(&self.vaccines_to_be_given),
            medical_records: trim(&self.medical_records),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn allergies_display(&self) -> &str {
        or_placeholder(&self.allergies, NO_ALLERGIES)
    }

    pub fn born_diseases_display(&self) -> &str {
        or_placeholder(&self.born_diseases, NO_DISEASES)
    }

    pub fn vaccines_given_display(&self) -> &str {
        or_placeholder(&self.vaccines_given, NO_VACCINES_GIVEN)
    }

    pub fn vaccines_to_be_given_display(&self) -> &str {
        or_placeholder(&self.vaccines_to_be_given, NO_UPCOMING_VACCINES)
    }

    pub fn medical_records_display(&self) -> &str {
        or_placeholder(&self.medical_records, NO_RECORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_for_missing_fields() {
        let fields = ChildProfileFields {
            allergies: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(fields.allergies_display(), NO_ALLERGIES);
        assert_eq!(fields.born_diseases_display(), NO_DISEASES);
        assert_eq!(fields.vaccines_given_display(), NO_VACCINES_GIVEN);
        assert_eq!(fields.vaccines_to_be_given_display(), NO_UPCOMING_VACCINES);
        assert_eq!(fields.medical_records_display(), NO_RECORDS);
    }

    #[test]
    fn test_display_uses_value_when_present() {
        let fields = ChildProfileFields {
            vaccines_given: Some("BCG, Polio".to_string()),
            ..Default::default()
        };
        assert_eq!(fields.vaccines_given_display(), "BCG, Polio");
    }

    #[test]
    fn test_trimmed_keeps_absent_fields_absent() {
        let fields = ChildProfileFields {
            vaccines_given: Some("  MMR \n".to_string()),
            ..Default::default()
        };
        let trimmed = fields.trimmed();
        assert_eq!(trimmed.vaccines_given.as_deref(), Some("MMR"));
        assert_eq!(trimmed.medical_records, None);
        assert!(!trimmed.is_empty());
        assert!(ChildProfileFields::default().is_empty());
    }

    #[test]
    fn test_trimmed_drops_blank_values() {
        let fields = ChildProfileFields {
            allergies: Some("  ".to_string()),
            born_diseases: Some(String::new()),
            ..Default::default()
        };
        let trimmed = fields.trimmed();
        assert_eq!(trimmed.allergies, None);
        assert_eq!(trimmed.born_diseases, None);
        assert!(trimmed.is_empty());
    }
}
