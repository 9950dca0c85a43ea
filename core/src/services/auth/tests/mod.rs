mod service_tests;

use std::sync::Arc;

use crate::repositories::IdentityStore;
use crate::services::credential::CredentialService;
use crate::services::token::{TokenService, TokenServiceConfig};

use super::registration::{
    RegisterAdminRequest, RegisterDoctorRequest, RegisterPatientRequest, RegisterRequest,
};
use super::service::AuthService;

pub(crate) const PASSWORD: &str = "Sup3r@Secret";

// bcrypt's minimum cost; keeps the hashing in tests fast
pub(crate) const TEST_COST: u32 = 4;

pub(crate) fn auth_service() -> (AuthService, IdentityStore) {
    let store = IdentityStore::in_memory();
    let tokens = Arc::new(TokenService::new(TokenServiceConfig {
        jwt_secret: "auth-test-secret".to_string(),
        ..TokenServiceConfig::default()
    }));
    let service = AuthService::new(
        store.clone(),
        CredentialService::with_cost(TEST_COST),
        tokens,
    );
    (service, store)
}

pub(crate) fn common_request(email: &str, phone: &str) -> RegisterRequest {
    RegisterRequest {
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        password: PASSWORD.to_string(),
        gdpr_consent: true,
    }
}

pub(crate) fn patient_request(email: &str, phone: &str) -> RegisterPatientRequest {
    RegisterPatientRequest {
        common: common_request(email, phone),
        national_id: Some("12345678901".to_string()),
        passport_no: None,
        birth_place: Some("Ankara".to_string()),
    }
}

pub(crate) fn doctor_request(email: &str, phone: &str, license_no: &str) -> RegisterDoctorRequest {
    RegisterDoctorRequest {
        common: common_request(email, phone),
        diploma_no: format!("DIP-{license_no}"),
        license_no: license_no.to_string(),
        specialty: "cardiology".to_string(),
    }
}

pub(crate) fn admin_request(email: &str, phone: &str, employee_id: &str) -> RegisterAdminRequest {
    RegisterAdminRequest {
        common: common_request(email, phone),
        employee_id: employee_id.to_string(),
        department: "operations".to_string(),
        job_title: None,
    }
}
