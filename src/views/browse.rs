use jamboree_cards::{FacetFilter, Facets, apply_filter};
use jamboree_schema::{ArtistListResponse, FacetsView, GigListResponse, Page};
use rand::Rng;
use rand::seq::SliceRandom;

use super::artist_card::artist_card;
use super::gig_card::gig_card;
use super::read_model::ReadModel;
use super::{ButtonStates, Viewer, button_for};
use crate::config::CardsConfig;
use crate::db::DbArtist;

/// Facet choices offered by a browse page, sorted for a stable response.
pub fn facets_view(facets: &Facets) -> FacetsView {
    FacetsView {
        instruments: facets.sorted_instruments(),
        genres: facets.sorted_genres(),
        skill_levels: facets.sorted_skill_levels(),
    }
}

/// Gig browse page: every gig passing the filter, by date.
pub fn gig_list(
    model: &ReadModel,
    filter: &FacetFilter,
    viewer: Viewer<'_>,
    buttons: &ButtonStates,
    cards: &CardsConfig,
) -> Page<GigListResponse> {
    if !model.ready {
        return Page::Loading;
    }

    let facets = facets_view(&Facets::collect(&model.gigs));
    let mut gigs = apply_filter(&model.gigs, filter, |_| true);
    gigs.sort_by_key(|g| (g.date, g.id));

    let cards = gigs
        .into_iter()
        .map(|gig| gig_card(model, gig, viewer, button_for(buttons, gig.id), cards))
        .collect();

    Page::Ready(GigListResponse { facets, cards })
}

/// Artist browse page: complete profiles passing the filter, in no particular order.
pub fn artist_list<R: Rng + ?Sized>(
    model: &ReadModel,
    filter: &FacetFilter,
    viewer: Viewer<'_>,
    cards: &CardsConfig,
    rng: &mut R,
) -> Page<ArtistListResponse> {
    if !model.ready {
        return Page::Loading;
    }

    let valid: Vec<&DbArtist> = model.artists.iter().filter(|a| a.is_valid()).collect();
    let facets = facets_view(&Facets::collect(&valid));

    let mut artists = apply_filter(&model.artists, filter, DbArtist::is_valid);
    artists.shuffle(rng);

    let cards = artists
        .into_iter()
        .map(|artist| artist_card(artist, viewer, cards))
        .collect();

    Page::Ready(ArtistListResponse { facets, cards })
}
