//! Card view composition.
//!
//! Views are pure functions of a [`ReadModel`] snapshot, the viewer, and the join button
//! states the caller already resolved. Nothing here touches the database.

mod artist_card;
mod browse;
mod gig_card;
mod image;
mod profile;
mod read_model;

pub use artist_card::artist_card;
pub use browse::{artist_list, facets_view, gig_list};
pub use gig_card::gig_card;
pub use image::ImageSource;
pub use profile::profile_view;
pub use read_model::ReadModel;

use ahash::AHashMap;
use url::form_urlencoded;

use crate::accounts::SessionUser;
use crate::attendance::{ButtonState, Membership};

/// Join button state per gig id, for the gigs on one page.
pub type ButtonStates = AHashMap<i64, ButtonState>;

/// Who is looking at a page.
#[derive(Debug, Clone, Copy, Default)]
pub struct Viewer<'a> {
    pub email: Option<&'a str>,
    pub is_admin: bool,
}

impl<'a> Viewer<'a> {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn from_session(user: Option<&'a SessionUser>) -> Self {
        user.map_or_else(Self::anonymous, |user| Self {
            email: Some(user.email.as_str()),
            is_admin: user.is_admin(),
        })
    }
}

/// Gigs without a resolved control render as a plain "Join".
pub(crate) fn button_for(buttons: &ButtonStates, gig_id: i64) -> ButtonState {
    buttons
        .get(&gig_id)
        .copied()
        .unwrap_or_else(|| ButtonState::steady(Membership::Absent))
}

/// Client route of an artist's profile, with the email as one percent-encoded path segment.
pub fn profile_path(email: &str) -> String {
    // `byte_serialize` is form encoding: a literal `+` is already `%2B`, so any `+` left
    // stands for a space, which a path segment spells `%20`.
    let encoded = form_urlencoded::byte_serialize(email.as_bytes())
        .collect::<String>()
        .replace('+', "%20");
    format!("/viewProfile/{encoded}")
}
