//! Session and identity management with role-based access control.
//!
//! Leaf-first: the credential [`store`] seeds known identities, the
//! [`authenticator`] verifies pairs against it, the [`token`] issuer mints
//! opaque session tokens, and the [`session`] manager owns the single live
//! session plus its persisted record in a [`vault`]. The [`guard`] reads
//! manager snapshots to allow or redirect page entries, and [`signup`] is the
//! staged flow feeding the authentication entry point.

pub mod authenticator;
pub mod errors;
pub mod guard;
pub mod session;
pub mod signup;
pub mod store;
pub mod token;
pub mod types;
pub mod vault;

pub use authenticator::Authenticator;
pub use errors::AuthError;
pub use guard::{PageAccess, RouteDecision};
pub use session::{SessionConfig, SessionManager};
pub use signup::{SignupFlow, SignupStage};
pub use store::CredentialStore;
pub use token::{Token, TokenIssuer};
pub use types::{Identity, Role, Session, SessionState};
pub use vault::{FileVault, MemoryVault, SessionVault};
