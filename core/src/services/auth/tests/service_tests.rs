//! Login, lockout, refresh and account lifecycle tests.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::identity::{UserRole, UserStatus};
use crate::errors::{AuthError, DomainError, TokenError, ValidationError};

use super::{auth_service, common_request, patient_request, PASSWORD};

#[tokio::test]
async fn test_login_with_email() {
    let (service, _) = auth_service();
    let registered = service
        .register_patient(patient_request("login@example.com", "+905551112233"))
        .await
        .unwrap();

    let result = service.login("login@example.com", PASSWORD).await.unwrap();
    assert_eq!(result.id, registered.id);
    assert_eq!(result.role, UserRole::Patient);
    assert!(result.last_login_date.is_some());
}

#[tokio::test]
async fn test_login_with_phone_identifier() {
    let (service, _) = auth_service();
    service
        .register_patient(patient_request("phone@example.com", "+905551112233"))
        .await
        .unwrap();

    // Different spelling of the same number resolves after normalization
    let result = service.login("+90 555 111 22 33", PASSWORD).await.unwrap();
    assert_eq!(result.email, "phone@example.com");
}

#[tokio::test]
async fn test_login_unknown_identifier() {
    let (service, _) = auth_service();

    let result = service.login("nobody@example.com", PASSWORD).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_login_wrong_password_counts_up() {
    let (service, store) = auth_service();
    let registered = service
        .register_patient(patient_request("count@example.com", "+905551112233"))
        .await
        .unwrap();

    for _ in 0..4 {
        let result = service.login("count@example.com", "Wr0ng@Pass1").await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::InvalidCredentials))
        ));
    }

    let stored = store
        .partition(UserRole::Patient)
        .find_by_id(registered.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.failed_login_count, 4);
    assert!(!stored.is_account_locked());

    let info = service.lock_info(&stored.email).await.unwrap().unwrap();
    assert!(!info.is_locked);
    assert_eq!(info.remaining_attempts, 1);
    assert!(info.remaining_seconds.is_none());
}

#[tokio::test]
async fn test_fifth_failure_locks_then_correct_password_is_refused() {
    let (service, _) = auth_service();
    service
        .register_patient(patient_request("lock@example.com", "+905551112233"))
        .await
        .unwrap();

    // Every mismatch reports invalid credentials, the threshold-crossing
    // fifth included; the lock only bites from the next attempt on
    for _ in 0..5 {
        let result = service.login("lock@example.com", "Wr0ng@Pass1").await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::InvalidCredentials))
        ));
    }

    // Correct password, still inside the lock window
    let result = service.login("lock@example.com", PASSWORD).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::AccountLocked))
    ));

    let info = service.lock_info("lock@example.com").await.unwrap().unwrap();
    assert!(info.is_locked);
    assert_eq!(info.failed_attempts, 5);
    assert_eq!(info.remaining_attempts, 0);
    assert!(info.remaining_seconds.unwrap() > 0);
}

#[tokio::test]
async fn test_successful_login_resets_counter() {
    let (service, store) = auth_service();
    let registered = service
        .register_patient(patient_request("reset@example.com", "+905551112233"))
        .await
        .unwrap();

    for _ in 0..3 {
        let _ = service.login("reset@example.com", "Wr0ng@Pass1").await;
    }
    service.login("reset@example.com", PASSWORD).await.unwrap();

    let stored = store
        .partition(UserRole::Patient)
        .find_by_id(registered.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.failed_login_count, 0);
    assert!(stored.lock_until.is_none());
}

#[tokio::test]
async fn test_expired_lock_no_longer_blocks_login() {
    let (service, store) = auth_service();
    let registered = service
        .register_patient(patient_request("stale@example.com", "+905551112233"))
        .await
        .unwrap();

    let partition = store.partition(UserRole::Patient);
    let mut identity = partition.find_by_id(registered.id).await.unwrap().unwrap();
    identity.failed_login_count = 5;
    identity.lock_until = Some(Utc::now() - Duration::minutes(1));
    partition.update(identity).await.unwrap();

    let result = service.login("stale@example.com", PASSWORD).await.unwrap();
    assert_eq!(result.id, registered.id);

    let stored = partition.find_by_id(registered.id).await.unwrap().unwrap();
    assert_eq!(stored.failed_login_count, 0);
    assert!(stored.lock_until.is_none());
}

#[tokio::test]
async fn test_suspended_account_reads_as_locked() {
    let (service, store) = auth_service();
    let registered = service
        .register_patient(patient_request("susp@example.com", "+905551112233"))
        .await
        .unwrap();

    let partition = store.partition(UserRole::Patient);
    let mut identity = partition.find_by_id(registered.id).await.unwrap().unwrap();
    identity.status = UserStatus::Suspended;
    partition.update(identity).await.unwrap();

    let result = service.login("susp@example.com", PASSWORD).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::AccountLocked))
    ));
}

#[tokio::test]
async fn test_inactive_account_reads_as_locked() {
    let (service, store) = auth_service();
    let registered = service
        .register_patient(patient_request("inactive@example.com", "+905551112233"))
        .await
        .unwrap();

    let partition = store.partition(UserRole::Patient);
    let mut identity = partition.find_by_id(registered.id).await.unwrap().unwrap();
    identity.status = UserStatus::Inactive;
    partition.update(identity).await.unwrap();

    // Administratively disabled accounts answer like locked ones
    let result = service.login("inactive@example.com", PASSWORD).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::AccountLocked))
    ));
}

#[tokio::test]
async fn test_unlock_clears_the_window() {
    let (service, _) = auth_service();
    let registered = service
        .register_patient(patient_request("unlock@example.com", "+905551112233"))
        .await
        .unwrap();

    for _ in 0..5 {
        let _ = service.login("unlock@example.com", "Wr0ng@Pass1").await;
    }

    assert!(service.is_locked(registered.id).await.unwrap());
    service.unlock(registered.id).await.unwrap();
    assert!(!service.is_locked(registered.id).await.unwrap());
    service.login("unlock@example.com", PASSWORD).await.unwrap();
}

#[tokio::test]
async fn test_cleanup_expired_locks_is_idempotent() {
    let (service, store) = auth_service();
    let expired = service
        .register_generic(common_request("old@example.com", "+905551112233"))
        .await
        .unwrap();
    let fresh = service
        .register_generic(common_request("new@example.com", "+905559998877"))
        .await
        .unwrap();

    let partition = store.partition(UserRole::Generic);
    let mut identity = partition.find_by_id(expired.id).await.unwrap().unwrap();
    identity.failed_login_count = 5;
    identity.lock_until = Some(Utc::now() - Duration::minutes(5));
    partition.update(identity).await.unwrap();

    let mut identity = partition.find_by_id(fresh.id).await.unwrap().unwrap();
    identity.failed_login_count = 5;
    identity.lock_until = Some(Utc::now() + Duration::minutes(25));
    partition.update(identity).await.unwrap();

    assert_eq!(service.cleanup_expired_locks().await.unwrap(), 1);
    assert_eq!(service.cleanup_expired_locks().await.unwrap(), 0);

    // The live lock stayed in place
    let still_locked = partition.find_by_id(fresh.id).await.unwrap().unwrap();
    assert!(still_locked.is_account_locked());
}

#[tokio::test]
async fn test_refresh_round_trip() {
    let (service, _) = auth_service();
    let registered = service
        .register_patient(patient_request("fresh@example.com", "+905551112233"))
        .await
        .unwrap();

    let refreshed = service.refresh(&registered.refresh_token).await.unwrap();
    assert_eq!(refreshed.id, registered.id);
    assert_eq!(refreshed.role, UserRole::Patient);
    assert!(!refreshed.access_token.is_empty());
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let (service, _) = auth_service();
    let registered = service
        .register_patient(patient_request("swap@example.com", "+905551112233"))
        .await
        .unwrap();

    let result = service.refresh(&registered.access_token).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenInvalid))
    ));
}

#[tokio::test]
async fn test_refresh_after_tombstone_fails() {
    let (service, _) = auth_service();
    let registered = service
        .register_patient(patient_request("gone@example.com", "+905551112233"))
        .await
        .unwrap();

    service
        .mark_deleted(UserRole::Patient, registered.id, Uuid::new_v4())
        .await
        .unwrap();

    let result = service.refresh(&registered.refresh_token).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::IdentityNotFound))
    ));
}

#[tokio::test]
async fn test_change_password() {
    let (service, _) = auth_service();
    let registered = service
        .register_patient(patient_request("chg@example.com", "+905551112233"))
        .await
        .unwrap();

    service
        .change_password(UserRole::Patient, registered.id, PASSWORD, "N3w@Secret99")
        .await
        .unwrap();

    // Old password no longer works, new one does
    let result = service.login("chg@example.com", PASSWORD).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
    service.login("chg@example.com", "N3w@Secret99").await.unwrap();
}

#[tokio::test]
async fn test_change_password_requires_current() {
    let (service, _) = auth_service();
    let registered = service
        .register_patient(patient_request("cur@example.com", "+905551112233"))
        .await
        .unwrap();

    let result = service
        .change_password(UserRole::Patient, registered.id, "Wr0ng@Pass1", "N3w@Secret99")
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_change_password_enforces_strength() {
    let (service, _) = auth_service();
    let registered = service
        .register_patient(patient_request("weak@example.com", "+905551112233"))
        .await
        .unwrap();

    let result = service
        .change_password(UserRole::Patient, registered.id, PASSWORD, "weak")
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Validation(ValidationError::WeakPassword))
    ));
}

#[tokio::test]
async fn test_delete_permanently_removes_row() {
    let (service, store) = auth_service();
    let registered = service
        .register_patient(patient_request("purge@example.com", "+905551112233"))
        .await
        .unwrap();

    service
        .mark_deleted(UserRole::Patient, registered.id, Uuid::new_v4())
        .await
        .unwrap();
    assert!(service
        .delete_permanently(UserRole::Patient, registered.id)
        .await
        .unwrap());

    let partition = store.partition(UserRole::Patient);
    assert!(partition.find_by_id(registered.id).await.unwrap().is_none());
    assert!(!service
        .delete_permanently(UserRole::Patient, registered.id)
        .await
        .unwrap());
}
