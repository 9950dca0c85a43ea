//! Main authentication service implementation

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use hv_shared::utils::phone::mask_phone_number;

use crate::domain::entities::identity::{
    AdminProfile, DoctorProfile, DoctorVerification, Identity, PatientProfile, RoleProfile,
    UserRole, UserStatus,
};
use crate::domain::value_objects::AuthResult;
use crate::errors::{AuthError, DomainResult, TokenError};
use crate::repositories::IdentityStore;
use crate::services::credential::CredentialService;
use crate::services::token::TokenService;

use super::account_lock::{AccountLockInfo, AccountLockService};
use super::registration::{
    RegisterAdminRequest, RegisterDoctorRequest, RegisterPatientRequest, RegisterRequest,
    RegistrationValidator,
};
use super::resolver::IdentityResolver;

/// Authentication service covering registration, login, refresh, lockout
/// and account removal.
///
/// Register never reports which check failed beyond the error variant, and
/// login collapses unknown identifier and bad password into one error so
/// the endpoint cannot be used to enumerate accounts.
pub struct AuthService {
    store: IdentityStore,
    resolver: IdentityResolver,
    validator: RegistrationValidator,
    credentials: CredentialService,
    tokens: Arc<TokenService>,
    locks: AccountLockService,
}

impl AuthService {
    pub fn new(
        store: IdentityStore,
        credentials: CredentialService,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            resolver: IdentityResolver::new(store.clone()),
            validator: RegistrationValidator::new(store.clone()),
            locks: AccountLockService::new(store.clone()),
            store,
            credentials,
            tokens,
        }
    }

    /// Register a patient and log them straight in.
    pub async fn register_patient(
        &self,
        request: RegisterPatientRequest,
    ) -> DomainResult<AuthResult> {
        let profile = RoleProfile::Patient(PatientProfile {
            national_id: normalize_optional(request.national_id),
            passport_no: normalize_optional(request.passport_no),
            birth_place: normalize_optional(request.birth_place),
        });
        self.register(request.common, profile).await
    }

    /// Register a doctor; the credential review starts out pending.
    pub async fn register_doctor(
        &self,
        request: RegisterDoctorRequest,
    ) -> DomainResult<AuthResult> {
        let profile = RoleProfile::Doctor(DoctorProfile {
            diploma_no: request.diploma_no.trim().to_string(),
            license_no: request.license_no.trim().to_string(),
            specialty: request.specialty.trim().to_string(),
            accepting_new_patients: false,
            verification: DoctorVerification::Pending,
        });
        self.register(request.common, profile).await
    }

    /// Register an administrator. Admin accounts start active with the
    /// email already trusted.
    pub async fn register_admin(&self, request: RegisterAdminRequest) -> DomainResult<AuthResult> {
        let profile = RoleProfile::Admin(AdminProfile {
            employee_id: request.employee_id.trim().to_string(),
            department: request.department.trim().to_string(),
            job_title: normalize_optional(request.job_title),
        });
        self.register(request.common, profile).await
    }

    /// Register a generic identity with no role payload.
    pub async fn register_generic(&self, request: RegisterRequest) -> DomainResult<AuthResult> {
        self.register(request, RoleProfile::Generic).await
    }

    async fn register(
        &self,
        request: RegisterRequest,
        profile: RoleProfile,
    ) -> DomainResult<AuthResult> {
        let (email, phone) = self.validator.validate_common(&request).await?;
        self.validator.validate_profile(&profile).await?;

        let password_hash = self.credentials.hash_password(&request.password)?;
        let mut identity = Identity::new(
            request.first_name.trim().to_string(),
            request.last_name.trim().to_string(),
            email,
            phone,
            password_hash,
            profile,
        );
        identity.record_consent();

        let identity = self
            .store
            .partition(identity.role())
            .create(identity)
            .await?;
        info!(identity_id = %identity.id, role = identity.role().code(), "Identity registered");

        self.issue(&identity)
    }

    /// Log in with an email or phone identifier.
    pub async fn login(&self, identifier: &str, password: &str) -> DomainResult<AuthResult> {
        let identity = match self.resolver.resolve(identifier).await? {
            Some(identity) => identity,
            None => {
                warn!(identifier = %mask_phone_number(identifier), "Login failed: unknown identifier");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if identity.is_account_locked() {
            warn!(identity_id = %identity.id, "Login rejected: account locked");
            return Err(AuthError::AccountLocked.into());
        }
        if matches!(
            identity.status,
            UserStatus::Suspended | UserStatus::Inactive
        ) {
            warn!(identity_id = %identity.id, status = ?identity.status, "Login rejected: account not usable");
            return Err(AuthError::AccountLocked.into());
        }

        if !self
            .credentials
            .verify_password(password, &identity.password_hash)
        {
            let updated = self
                .store
                .partition(identity.role())
                .increment_failed_login(identity.id)
                .await?;
            if updated.is_account_locked() {
                warn!(identity_id = %identity.id, "Account locked after repeated failures");
            }
            // The attempt that crosses the threshold still reports a
            // mismatch; the lock bites from the next attempt on.
            return Err(AuthError::InvalidCredentials.into());
        }

        let identity = self
            .store
            .partition(identity.role())
            .record_login_success(identity.id)
            .await?;
        info!(identity_id = %identity.id, "Login succeeded");

        self.issue(&identity)
    }

    /// Exchange a refresh token for a fresh pair.
    ///
    /// Stateless rotation: the old refresh token stays decodable until it
    /// expires, nothing is revoked here.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<AuthResult> {
        let claims = self.tokens.validate_refresh_token(refresh_token)?;
        let identity_id = claims
            .identity_id()
            .map_err(|_| TokenError::TokenInvalid)?;

        let identity = match self.resolver.resolve_by_id(identity_id).await? {
            Some(identity) => identity,
            None => {
                warn!(identity_id = %identity_id, "Refresh rejected: identity gone");
                return Err(AuthError::IdentityNotFound.into());
            }
        };

        if identity.is_account_locked()
            || matches!(
                identity.status,
                UserStatus::Suspended | UserStatus::Inactive
            )
        {
            return Err(AuthError::AccountLocked.into());
        }

        self.issue(&identity)
    }

    /// Change the password after re-proving the current one.
    pub async fn change_password(
        &self,
        role: UserRole,
        identity_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let partition = self.store.partition(role);
        let mut identity = partition
            .find_by_id(identity_id)
            .await?
            .ok_or(AuthError::IdentityNotFound)?;

        if !self
            .credentials
            .verify_password(current_password, &identity.password_hash)
        {
            return Err(AuthError::InvalidCredentials.into());
        }

        self.credentials.set_password(&mut identity, new_password)?;
        partition.update(identity).await?;
        info!(identity_id = %identity_id, "Password changed");
        Ok(())
    }

    /// Tombstone an account; it stops resolving immediately.
    pub async fn mark_deleted(
        &self,
        role: UserRole,
        identity_id: Uuid,
        deleted_by: Uuid,
    ) -> DomainResult<bool> {
        let removed = self
            .store
            .partition(role)
            .mark_deleted(identity_id, deleted_by)
            .await?;
        if removed {
            info!(identity_id = %identity_id, actor = %deleted_by, "Identity tombstoned");
        }
        Ok(removed)
    }

    /// Physically remove a row, GDPR erasure and test cleanup only.
    pub async fn delete_permanently(
        &self,
        role: UserRole,
        identity_id: Uuid,
    ) -> DomainResult<bool> {
        self.store.partition(role).delete(identity_id).await
    }

    /// Lock state snapshot for an identifier, if it resolves.
    pub async fn lock_info(&self, identifier: &str) -> DomainResult<Option<AccountLockInfo>> {
        Ok(self
            .resolver
            .resolve(identifier)
            .await?
            .map(|identity| self.locks.lock_info(&identity)))
    }

    /// Whether the identity is currently inside a lock window.
    pub async fn is_locked(&self, identity_id: Uuid) -> DomainResult<bool> {
        let identity = self
            .resolver
            .resolve_by_id(identity_id)
            .await?
            .ok_or(AuthError::IdentityNotFound)?;
        Ok(identity.is_account_locked())
    }

    /// Support-driven unlock.
    pub async fn unlock(&self, identity_id: Uuid) -> DomainResult<Identity> {
        let identity = self
            .resolver
            .resolve_by_id(identity_id)
            .await?
            .ok_or(AuthError::IdentityNotFound)?;
        self.locks.unlock(&identity).await
    }

    /// Clears expired lock windows across all partitions.
    pub async fn cleanup_expired_locks(&self) -> DomainResult<u64> {
        self.locks.cleanup_expired_locks().await
    }

    fn issue(&self, identity: &Identity) -> DomainResult<AuthResult> {
        let pair = self.tokens.generate_token_pair(
            identity.id,
            identity.role().code(),
            &identity.email,
        )?;
        Ok(AuthResult::from_identity(identity, pair))
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
