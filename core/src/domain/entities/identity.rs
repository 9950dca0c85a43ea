//! Identity entity representing a registered account in the HealthVia system.
//!
//! An identity is physically stored in exactly one of four role partitions
//! (generic, patient, doctor, admin); the [`RoleProfile`] sum type carries the
//! partition-specific payload. Email and phone are unique across the union of
//! all live partitions, not just within one.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Consecutive failed logins before the account is locked
pub const MAX_FAILED_LOGIN_ATTEMPTS: u32 = 5;

/// Length of the lockout window in minutes
pub const LOCK_DURATION_MINUTES: i64 = 30;

/// Role of an identity, derived from its partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Not-yet-specialized account
    Generic,
    Patient,
    Doctor,
    Admin,
}

impl UserRole {
    /// Stable string code used in token claims
    pub fn code(&self) -> &'static str {
        match self {
            UserRole::Generic => "generic",
            UserRole::Patient => "patient",
            UserRole::Doctor => "doctor",
            UserRole::Admin => "admin",
        }
    }
}

/// Lifecycle status of an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    PendingVerification,
    Active,
    Inactive,
    Suspended,
    Deleted,
}

impl UserStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, UserStatus::Active)
    }
}

/// Review state of a doctor's credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoctorVerification {
    Pending,
    Approved,
    Rejected,
}

/// Patient partition payload
///
/// At least one of `national_id` / `passport_no` must be present; each is a
/// sparse unique key within the patient partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub national_id: Option<String>,
    pub passport_no: Option<String>,
    pub birth_place: Option<String>,
}

/// Doctor partition payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorProfile {
    /// Diploma number, unique within the doctor partition
    pub diploma_no: String,
    /// Medical license number, unique within the doctor partition
    pub license_no: String,
    pub specialty: String,
    pub accepting_new_patients: bool,
    pub verification: DoctorVerification,
}

/// Admin partition payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    /// Employee number, unique within the admin partition
    pub employee_id: String,
    pub department: String,
    pub job_title: Option<String>,
}

/// Role-specific payload; the variant determines which partition stores the record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RoleProfile {
    Generic,
    Patient(PatientProfile),
    Doctor(DoctorProfile),
    Admin(AdminProfile),
}

impl RoleProfile {
    pub fn role(&self) -> UserRole {
        match self {
            RoleProfile::Generic => UserRole::Generic,
            RoleProfile::Patient(_) => UserRole::Patient,
            RoleProfile::Doctor(_) => UserRole::Doctor,
            RoleProfile::Admin(_) => UserRole::Admin,
        }
    }

    /// Partition-local unique keys as (field, value) pairs.
    ///
    /// Absent optional keys are skipped, matching sparse unique indexes.
    pub fn unique_keys(&self) -> Vec<(&'static str, &str)> {
        match self {
            RoleProfile::Generic => Vec::new(),
            RoleProfile::Patient(p) => {
                let mut keys = Vec::new();
                if let Some(ref national_id) = p.national_id {
                    keys.push(("national_id", national_id.as_str()));
                }
                if let Some(ref passport_no) = p.passport_no {
                    keys.push(("passport_no", passport_no.as_str()));
                }
                keys
            }
            RoleProfile::Doctor(d) => vec![
                ("diploma_no", d.diploma_no.as_str()),
                ("license_no", d.license_no.as_str()),
            ],
            RoleProfile::Admin(a) => vec![("employee_id", a.employee_id.as_str())],
        }
    }
}

/// Identity entity representing a registered account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique identifier, stable for the lifetime of the record
    pub id: Uuid,

    pub first_name: String,
    pub last_name: String,

    /// Unique across the union of all live partitions
    pub email: String,

    /// Unique across the union of all live partitions
    pub phone: String,

    /// Adaptive one-way hash; the plaintext is never stored
    pub password_hash: String,

    pub status: UserStatus,
    pub email_verified: bool,
    pub phone_verified: bool,

    pub gdpr_consent: bool,
    pub gdpr_consent_date: Option<DateTime<Utc>>,

    /// Consecutive failed login attempts since the last success
    pub failed_login_count: u32,

    /// End of the active lockout window, if any
    pub lock_until: Option<DateTime<Utc>>,

    pub last_login_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Soft-delete flag; deleted records are excluded from lookups and
    /// uniqueness checks but retained for the audit trail
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<Uuid>,

    /// Partition payload carrying the role
    pub profile: RoleProfile,
}

impl Identity {
    /// Creates a new identity with partition defaults applied.
    ///
    /// Patients and doctors start in `PendingVerification` with both
    /// verification flags off; admins start `Active` with email pre-verified.
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        phone: String,
        password_hash: String,
        profile: RoleProfile,
    ) -> Self {
        let now = Utc::now();
        let (status, email_verified) = match profile.role() {
            UserRole::Admin => (UserStatus::Active, true),
            _ => (UserStatus::PendingVerification, false),
        };
        Self {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            email,
            phone,
            password_hash,
            status,
            email_verified,
            phone_verified: false,
            gdpr_consent: false,
            gdpr_consent_date: None,
            failed_login_count: 0,
            lock_until: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
            deleted: false,
            deleted_at: None,
            deleted_by: None,
            profile,
        }
    }

    pub fn role(&self) -> UserRole {
        self.profile.role()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// True iff an unexpired lockout window is active
    pub fn is_account_locked(&self) -> bool {
        self.lock_until.map_or(false, |until| until > Utc::now())
    }

    /// Records a failed login attempt; the fifth consecutive failure opens a
    /// 30-minute lockout window.
    pub fn record_failed_attempt(&mut self) {
        self.failed_login_count += 1;
        if self.failed_login_count >= MAX_FAILED_LOGIN_ATTEMPTS {
            self.lock_until = Some(Utc::now() + Duration::minutes(LOCK_DURATION_MINUTES));
        }
        self.updated_at = Utc::now();
    }

    /// Records a successful login: stamps last-login, resets the failed
    /// counter and clears any lockout window.
    pub fn record_success(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.failed_login_count = 0;
        self.lock_until = None;
        self.updated_at = now;
    }

    /// Clears the lockout state without touching last-login (admin unlock or
    /// maintenance sweep). Idempotent.
    pub fn clear_lock(&mut self) {
        self.failed_login_count = 0;
        self.lock_until = None;
        self.updated_at = Utc::now();
    }

    pub fn record_consent(&mut self) {
        self.gdpr_consent = true;
        self.gdpr_consent_date = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    pub fn verify_email(&mut self) {
        self.email_verified = true;
        self.updated_at = Utc::now();
    }

    pub fn verify_phone(&mut self) {
        self.phone_verified = true;
        self.updated_at = Utc::now();
    }

    /// Soft-deletes the record, keeping it for the audit trail. The acting
    /// user id is required.
    pub fn mark_deleted(&mut self, deleted_by: Uuid) {
        let now = Utc::now();
        self.deleted = true;
        self.deleted_at = Some(now);
        self.deleted_by = Some(deleted_by);
        self.status = UserStatus::Deleted;
        self.updated_at = now;
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }
}
