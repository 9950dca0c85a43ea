//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Accepts national and international formats, e.g. +905551112233,
// (555) 111-2233, 555.111.2233
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+]?[(]?[0-9]{3}[)]?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$").unwrap()
});

/// Check whether a phone number matches the accepted format
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// Normalize a phone number by removing formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Mask a phone number for logging (e.g. +9055****2233)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 8 {
        format!(
            "{}****{}",
            &normalized[0..normalized.len() - 8],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
