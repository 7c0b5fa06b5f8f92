use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
};
use jamboree_cards::FacetFilter;
use jamboree_schema::{ArtistListResponse, Page};
use tracing::info;

use super::shared::load_model;
use crate::error::JamboreeError;
use crate::server::guards::auth::{OptionalSession, RequireAdmin};
use crate::server::router::JamboreeState;
use crate::views::{self, Viewer};

pub fn router() -> Router<JamboreeState> {
    Router::new()
        .route("/api/artists", get(list_artists))
        .route("/api/artists/{id}", delete(delete_artist))
}

/// GET /api/artists?instrument=&genre=&skillLevel=
///
/// Complete profiles only, shuffled on every request.
async fn list_artists(
    State(state): State<JamboreeState>,
    OptionalSession(user): OptionalSession,
    Query(filter): Query<FacetFilter>,
) -> Result<Json<Page<ArtistListResponse>>, JamboreeError> {
    let model = load_model(&state).await?;
    let page = views::artist_list(
        &model,
        &filter,
        Viewer::from_session(user.as_ref()),
        &state.config.cards,
        &mut rand::rng(),
    );
    Ok(Json(page))
}

/// DELETE /api/artists/{id}
async fn delete_artist(
    State(state): State<JamboreeState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<StatusCode, JamboreeError> {
    let email = state.db.delete_artist_and_links(id).await?;
    for token in state.sessions.tokens_for(&email) {
        state.controls.drop_session(&token);
    }
    info!(artist_id = id, admin = %admin.email, "artist deleted");
    Ok(StatusCode::NO_CONTENT)
}
