use jamboree_cards::{CardBudget, join_for_display, truncate_to};
use jamboree_schema::{AdminActions, ArtistCardView};

use super::image::ImageSource;
use super::{Viewer, profile_path};
use crate::config::CardsConfig;
use crate::db::DbArtist;

pub fn artist_card(artist: &DbArtist, viewer: Viewer<'_>, cards: &CardsConfig) -> ArtistCardView {
    ArtistCardView {
        id: artist.id,
        name: artist.full_name(),
        profile_path: profile_path(&artist.email),
        image: ImageSource::new(artist.image.as_deref(), &cards.profile_placeholder).to_view(),
        instruments: truncate_to(&join_for_display(&artist.instruments), CardBudget::INSTRUMENTS)
            .into_owned(),
        genres: truncate_to(&join_for_display(&artist.genres), CardBudget::GENRES).into_owned(),
        skill_level: artist.skill_level.clone(),
        bio: truncate_to(&artist.bio, CardBudget::BIO).into_owned(),
        admin_actions: viewer.is_admin.then(|| AdminActions {
            delete: Some(format!("/api/artists/{}", artist.id)),
        }),
    }
}
