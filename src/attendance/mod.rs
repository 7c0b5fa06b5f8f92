//! Attendance join model.
//!
//! - `store.rs`: membership lookup and the mutation surface over the membership collection
//! - `control.rs`: one actor per gig card that owns the join/leave button state
//! - `registry.rs`: live controls keyed by (session, gig), with idle eviction

mod control;
mod registry;
mod store;

pub use control::{ButtonLabel, ButtonState, JoinControlArgs, JoinControlHandle};
pub use registry::{CardKey, JoinControls};
pub use store::{Membership, MembershipStore, compute_membership};
