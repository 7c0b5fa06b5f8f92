//! Accounts: registration, sign-in and bearer sessions.

mod password;
mod session;
mod signup;

pub use password::{hash_password, verify_password};
pub use session::{Role, SessionStore, SessionUser};
pub use signup::{register, sign_in, sign_up_errors, validate_sign_up};
