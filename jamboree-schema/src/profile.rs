use crate::cards::{GigCardView, ImageView};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub image: ImageView,
    /// `Instrument Played` or `Instruments Played`.
    pub instrument_label: String,
    pub instruments: String,
    pub skill_level: String,
    pub genres: String,
    pub influences: String,
    pub bio: String,
    /// Viewer owns this profile and may open `/editProfile`.
    pub can_edit: bool,
    pub joined_gigs: Vec<GigCardView>,
}

/// Partial profile update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub instruments: Option<Vec<String>>,
    pub genres: Option<Vec<String>>,
    pub skill_level: Option<String>,
    pub influences: Option<Vec<String>>,
    pub bio: Option<String>,
    pub image: Option<String>,
}
