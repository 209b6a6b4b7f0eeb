//! User-facing error taxonomy for the session and signup flows.

use std::fmt;

/// Errors surfaced to callers of the auth core.
///
/// Every variant carries a human-readable message via `Display`; none of them
/// abort the process. `CorruptSessionRecord` is recovered inside `restore`
/// and is never shown to the user.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuthError {
    /// No credential matched the submitted email/password pair.
    InvalidCredentials,
    /// Login could not complete for a reason other than bad credentials.
    LoginFailed,
    /// The signup email field is missing or malformed.
    InvalidEmail,
    /// The one-time code is not exactly six ASCII digits.
    InvalidCode,
    /// The password confirmation does not match the password.
    SecretMismatch,
    /// A signup step was invoked out of order.
    WrongStage,
    /// The persisted session record could not be decoded.
    CorruptSessionRecord,
}

impl fmt::Display for AuthError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(formatter, "Invalid email or password"),
            AuthError::LoginFailed => write!(formatter, "Login failed"),
            AuthError::InvalidEmail => write!(formatter, "Enter a valid email address"),
            AuthError::InvalidCode => write!(formatter, "Please enter a valid 6-digit code"),
            AuthError::SecretMismatch => write!(formatter, "Passwords do not match"),
            AuthError::WrongStage => write!(formatter, "This step is not available yet"),
            AuthError::CorruptSessionRecord => {
                write!(formatter, "Saved session record was unreadable")
            }
        }
    }
}

impl std::error::Error for AuthError {}
