//! Password strength utilities

/// Symbols accepted by the password policy
pub const ALLOWED_SYMBOLS: &str = "@#$%^&+=";

/// Minimum password length accepted by the policy
pub const MIN_LENGTH: usize = 8;

/// Check password strength: at least 8 characters with one uppercase letter,
/// one lowercase letter, one digit and one symbol from [`ALLOWED_SYMBOLS`],
/// and no whitespace anywhere.
pub fn is_strong(password: &str) -> bool {
    if password.chars().count() < MIN_LENGTH {
        return false;
    }
    if password.chars().any(char::is_whitespace) {
        return false;
    }

    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| ALLOWED_SYMBOLS.contains(c));

    has_upper && has_lower && has_digit && has_symbol
}
