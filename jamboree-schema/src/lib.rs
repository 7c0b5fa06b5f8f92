pub mod accounts;
pub mod cards;
pub mod page;
pub mod profile;

pub use accounts::{SessionResponse, SignInRequest, SignUpRequest};
pub use cards::{
    AdminActions, ArtistCardView, ArtistListResponse, AttendeeView, FacetsView, GigCardView,
    GigListResponse, ImageView, JoinButtonView,
};
pub use page::Page;
pub use profile::{ProfileUpdateRequest, ProfileView};
