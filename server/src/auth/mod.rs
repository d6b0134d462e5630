//! Authentication Service
//!
//! Password hashing and the password reset flow:
//! - `request_password_reset` - issue a token for an email address
//! - `reset_password` - consume a token and set a new password
//! - `cleanup_expired_reset_tokens` - periodic purge

mod error;
pub mod password;
pub mod queries;
pub mod reset;

pub use error::{AuthError, AuthResult};
pub use password::{hash_password, validate_new_password, verify_password};
pub use queries::cleanup_expired_reset_tokens;
pub use reset::{
    generate_reset_token, hash_token, request_password_reset, reset_password, IssuedResetToken,
    PasswordResetToken,
};
