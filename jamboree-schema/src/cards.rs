use serde::{Deserialize, Serialize};

/// Image with a fixed placeholder. Clients switch to `fallback` on a load error and never retry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImageView {
    pub src: String,
    pub fallback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeView {
    pub id: i64,
    pub first_name: String,
    pub profile_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct JoinButtonView {
    pub label: String,
    pub disabled: bool,
    pub class: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AdminActions {
    /// `DELETE` target for the destructive admin action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GigCardView {
    pub id: i64,
    pub title: String,
    pub image: ImageView,
    pub attendees: Vec<AttendeeView>,
    /// Attendees beyond the displayed ones.
    pub more_attendees: usize,
    pub date: String,
    pub skill_level: String,
    pub genres: String,
    pub instruments: String,
    pub venue: String,
    pub about: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_actions: Option<AdminActions>,
    pub join_button: JoinButtonView,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistCardView {
    pub id: i64,
    pub name: String,
    pub profile_path: String,
    pub image: ImageView,
    pub instruments: String,
    pub genres: String,
    pub skill_level: String,
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_actions: Option<AdminActions>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetsView {
    pub instruments: Vec<String>,
    pub genres: Vec<String>,
    pub skill_levels: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GigListResponse {
    pub facets: FacetsView,
    pub cards: Vec<GigCardView>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistListResponse {
    pub facets: FacetsView,
    pub cards: Vec<ArtistCardView>,
}
