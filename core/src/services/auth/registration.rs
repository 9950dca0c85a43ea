//! Registration requests and the pre-write validation pass.

use serde::{Deserialize, Serialize};

use hv_shared::utils::password;
use hv_shared::utils::phone::{is_valid_phone, normalize_phone_number};
use hv_shared::utils::validation::{is_blank, is_valid_email};

use crate::domain::entities::identity::RoleProfile;
use crate::errors::{AuthError, DomainResult, ValidationError};
use crate::repositories::IdentityStore;

/// Fields shared by every registration, regardless of role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub gdpr_consent: bool,
}

/// Patient registration: at least one of the two identity documents must
/// be present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPatientRequest {
    #[serde(flatten)]
    pub common: RegisterRequest,
    pub national_id: Option<String>,
    pub passport_no: Option<String>,
    pub birth_place: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterDoctorRequest {
    #[serde(flatten)]
    pub common: RegisterRequest,
    pub diploma_no: String,
    pub license_no: String,
    pub specialty: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterAdminRequest {
    #[serde(flatten)]
    pub common: RegisterRequest,
    pub employee_id: String,
    pub department: String,
    pub job_title: Option<String>,
}

/// Validates a registration before anything is written.
///
/// Checks run fail-fast in a fixed order: required fields, email format,
/// phone format, password strength, consent, then uniqueness. Uniqueness
/// spans all four partitions for email and phone; role-specific keys are
/// checked only against the target partition. Soft-deleted identities do
/// not block re-registration.
#[derive(Clone)]
pub struct RegistrationValidator {
    store: IdentityStore,
}

impl RegistrationValidator {
    pub fn new(store: IdentityStore) -> Self {
        Self { store }
    }

    /// Runs the common checks and returns the normalized (email, phone).
    pub async fn validate_common(&self, request: &RegisterRequest) -> DomainResult<(String, String)> {
        for (field, value) in [
            ("first_name", &request.first_name),
            ("last_name", &request.last_name),
            ("email", &request.email),
            ("phone", &request.phone),
            ("password", &request.password),
        ] {
            if is_blank(value) {
                return Err(ValidationError::RequiredField {
                    field: field.to_string(),
                }
                .into());
            }
        }

        let email = request.email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        let phone = normalize_phone_number(&request.phone);
        if !is_valid_phone(&phone) {
            return Err(ValidationError::InvalidPhoneFormat.into());
        }
        if !password::is_strong(&request.password) {
            return Err(ValidationError::WeakPassword.into());
        }
        if !request.gdpr_consent {
            return Err(ValidationError::ConsentRequired.into());
        }

        self.ensure_unique_contact(&email, &phone).await?;
        Ok((email, phone))
    }

    /// Role payload checks plus role-key uniqueness in the target partition.
    pub async fn validate_profile(&self, profile: &RoleProfile) -> DomainResult<()> {
        match profile {
            RoleProfile::Generic => {}
            RoleProfile::Patient(p) => {
                if p.national_id.is_none() && p.passport_no.is_none() {
                    return Err(ValidationError::RequiredField {
                        field: "national_id".to_string(),
                    }
                    .into());
                }
            }
            RoleProfile::Doctor(d) => {
                for (field, value) in [
                    ("diploma_no", &d.diploma_no),
                    ("license_no", &d.license_no),
                    ("specialty", &d.specialty),
                ] {
                    if is_blank(value) {
                        return Err(ValidationError::RequiredField {
                            field: field.to_string(),
                        }
                        .into());
                    }
                }
            }
            RoleProfile::Admin(a) => {
                for (field, value) in [
                    ("employee_id", &a.employee_id),
                    ("department", &a.department),
                ] {
                    if is_blank(value) {
                        return Err(ValidationError::RequiredField {
                            field: field.to_string(),
                        }
                        .into());
                    }
                }
            }
        }

        self.ensure_unique_role_keys(profile).await
    }

    async fn ensure_unique_contact(&self, email: &str, phone: &str) -> DomainResult<()> {
        for partition in self.store.partitions() {
            if partition.exists_by_email(email).await? {
                return Err(AuthError::AlreadyExists {
                    field: "email".to_string(),
                }
                .into());
            }
        }
        for partition in self.store.partitions() {
            if partition.exists_by_phone(phone).await? {
                return Err(AuthError::AlreadyExists {
                    field: "phone".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    async fn ensure_unique_role_keys(&self, profile: &RoleProfile) -> DomainResult<()> {
        let partition = self.store.partition(profile.role());
        for (field, value) in profile.unique_keys() {
            if partition.exists_by_role_key(field, value).await? {
                return Err(AuthError::AlreadyExists {
                    field: field.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}
