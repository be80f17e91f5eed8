//! Credential handling: Argon2id password hashing and verification.

mod password;

pub use password::{hash_password, verify_password, PasswordError, MIN_PASSWORD_LEN};
