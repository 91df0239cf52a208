//! Provisioning and update inputs with field validation.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use adportal_core::error::AppError;

use crate::validation::{check_password, into_result};

/// Staff request to create an organization together with its owner.
#[derive(Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionOrganizationRequest {
    /// Organization display name.
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "must be 1 to 255 characters"))]
    pub org_display_name: String,
    /// Legal company name.
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "must be 1 to 255 characters"))]
    pub company_name: String,
    /// Subscription plan.
    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "must be 1 to 50 characters"))]
    pub plan: String,
    /// Owner's display name.
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "must be 1 to 255 characters"))]
    pub owner_name: String,
    /// Owner's email; must not belong to any existing customer user.
    #[serde(default)]
    #[validate(email(message = "must be a valid email address"))]
    pub owner_email: String,
    /// Owner's initial password.
    #[serde(default, skip_serializing)]
    pub owner_password: String,
}

impl std::fmt::Debug for ProvisionOrganizationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProvisionOrganizationRequest")
            .field("org_display_name", &self.org_display_name)
            .field("company_name", &self.company_name)
            .field("plan", &self.plan)
            .field("owner_name", &self.owner_name)
            .field("owner_email", &self.owner_email)
            .field("owner_password", &"<redacted>")
            .finish()
    }
}

impl ProvisionOrganizationRequest {
    /// Trims text fields and lowercases the owner email.
    pub fn normalized(&self) -> Self {
        Self {
            org_display_name: self.org_display_name.trim().to_string(),
            company_name: self.company_name.trim().to_string(),
            plan: self.plan.trim().to_string(),
            owner_name: self.owner_name.trim().to_string(),
            owner_email: self.owner_email.trim().to_lowercase(),
            owner_password: self.owner_password.clone(),
        }
    }

    /// Runs every field check and collects all failures.
    pub fn check(&self, password_min_length: usize) -> Result<(), AppError> {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);
        check_password(
            &mut errors,
            "owner_password",
            &self.owner_password,
            password_min_length,
        );
        into_result(errors)
    }
}

/// Staff request to change an organization's descriptive fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrganizationRequest {
    /// New display name.
    #[validate(length(min = 1, max = 255, message = "must not be empty"))]
    pub org_display_name: Option<String>,
    /// New company name.
    #[validate(length(min = 1, max = 255, message = "must not be empty"))]
    pub company_name: Option<String>,
    /// New plan.
    #[validate(length(min = 1, max = 50, message = "must not be empty"))]
    pub plan: Option<String>,
}

impl UpdateOrganizationRequest {
    /// Trims every present field.
    pub fn normalized(&self) -> Self {
        let trim = |v: &Option<String>| v.as_ref().map(|s| s.trim().to_string());
        Self {
            org_display_name: trim(&self.org_display_name),
            company_name: trim(&self.company_name),
            plan: trim(&self.plan),
        }
    }

    /// Runs every field check and collects all failures.
    pub fn check(&self) -> Result<(), AppError> {
        into_result(self.validate().err().unwrap_or_else(ValidationErrors::new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adportal_core::error::ErrorKind;

    fn valid() -> ProvisionOrganizationRequest {
        ProvisionOrganizationRequest {
            org_display_name: "Globex".to_string(),
            company_name: "Globex Corporation".to_string(),
            plan: "professional".to_string(),
            owner_name: "Hank Scorpio".to_string(),
            owner_email: "hank@globex.com".to_string(),
            owner_password: "volcano-lair".to_string(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid().check(8).is_ok());
    }

    #[test]
    fn test_every_bad_field_is_reported() {
        let request = ProvisionOrganizationRequest {
            org_display_name: String::new(),
            plan: String::new(),
            owner_email: "not-an-email".to_string(),
            owner_password: "short".to_string(),
            ..valid()
        };
        let err = request.check(8).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(
            err.details,
            vec![
                "orgDisplayName: must be 1 to 255 characters".to_string(),
                "ownerEmail: must be a valid email address".to_string(),
                "ownerPassword: must be at least 8 characters".to_string(),
                "plan: must be 1 to 50 characters".to_string(),
            ]
        );
    }

    #[test]
    fn test_normalized_trims_and_lowercases() {
        let request = ProvisionOrganizationRequest {
            org_display_name: "  Globex ".to_string(),
            owner_email: " Hank@Globex.COM ".to_string(),
            ..valid()
        }
        .normalized();
        assert_eq!(request.org_display_name, "Globex");
        assert_eq!(request.owner_email, "hank@globex.com");
    }

    #[test]
    fn test_whitespace_only_name_fails_after_normalizing() {
        let request = ProvisionOrganizationRequest {
            owner_name: "   ".to_string(),
            ..valid()
        }
        .normalized();
        let err = request.check(8).unwrap_err();
        assert_eq!(err.details, vec!["ownerName: must be 1 to 255 characters".to_string()]);
    }

    #[test]
    fn test_update_rejects_empty_fields_only_when_present() {
        assert!(UpdateOrganizationRequest::default().check().is_ok());
        let err = UpdateOrganizationRequest {
            plan: Some(String::new()),
            ..Default::default()
        }
        .check()
        .unwrap_err();
        assert_eq!(err.details, vec!["plan: must not be empty".to_string()]);
    }

    #[test]
    fn test_password_never_serialized() {
        let json = serde_json::to_string(&valid()).unwrap();
        assert!(!json.contains("volcano"));
        assert!(json.contains("ownerEmail"));
    }
}
