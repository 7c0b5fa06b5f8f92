use jamboree_cards::join_for_display;
use jamboree_schema::{Page, ProfileView};

use super::gig_card::gig_card;
use super::image::ImageSource;
use super::read_model::ReadModel;
use super::{ButtonStates, Viewer, button_for};
use crate::config::CardsConfig;

/// Profile page for `email`. A missing profile renders as loading, never as an error.
pub fn profile_view(
    model: &ReadModel,
    email: &str,
    viewer: Viewer<'_>,
    buttons: &ButtonStates,
    cards: &CardsConfig,
) -> Page<ProfileView> {
    if !model.ready {
        return Page::Loading;
    }
    let Some(artist) = model.artist_by_email(email) else {
        return Page::Loading;
    };

    let joined_gigs = model
        .joined_gigs(artist.id)
        .into_iter()
        .map(|gig| gig_card(model, gig, viewer, button_for(buttons, gig.id), cards))
        .collect();

    let can_edit = viewer
        .email
        .is_some_and(|own| own.trim().eq_ignore_ascii_case(&artist.email));

    Page::Ready(ProfileView {
        id: artist.id,
        email: artist.email.clone(),
        first_name: artist.first_name.clone(),
        last_name: artist.last_name.clone(),
        image: ImageSource::new(artist.image.as_deref(), &cards.profile_placeholder).to_view(),
        instrument_label: instrument_label(artist.instruments.len()).to_string(),
        instruments: join_for_display(&artist.instruments),
        skill_level: artist.skill_level.clone(),
        genres: join_for_display(&artist.genres),
        influences: join_for_display(&artist.influences),
        bio: artist.bio.clone(),
        can_edit,
        joined_gigs,
    })
}

fn instrument_label(count: usize) -> &'static str {
    if count > 1 {
        "Instruments Played"
    } else {
        "Instrument Played"
    }
}
