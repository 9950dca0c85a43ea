//! Shared utility functions

pub mod password;
pub mod phone;
pub mod validation;
