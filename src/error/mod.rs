mod accounts;
mod attendance;
mod jamboree;

pub use accounts::SignUpError;
pub use attendance::{AttendanceError, MembershipAction};
pub use jamboree::{ApiErrorBody, ApiErrorObject, JamboreeError};
