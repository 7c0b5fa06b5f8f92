use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use jamboree_cards::{FacetFilter, apply_filter};
use jamboree_schema::{GigCardView, GigListResponse, JoinButtonView, Page};
use tracing::{debug, info};

use super::shared::{load_model, resolve_buttons};
use crate::error::JamboreeError;
use crate::server::guards::auth::{OptionalSession, RequireAdmin, RequireSession};
use crate::server::router::JamboreeState;
use crate::utils::logging::with_view_debug;
use crate::views::{self, Viewer, button_for};

pub fn router() -> Router<JamboreeState> {
    Router::new()
        .route("/api/gigs", get(list_gigs))
        .route("/api/gigs/{id}", get(get_gig).delete(delete_gig))
        .route("/api/gigs/{id}/toggle", post(toggle_membership))
}

/// GET /api/gigs?instrument=&genre=&skillLevel=
async fn list_gigs(
    State(state): State<JamboreeState>,
    OptionalSession(user): OptionalSession,
    Query(filter): Query<FacetFilter>,
) -> Result<Json<Page<GigListResponse>>, JamboreeError> {
    let model = load_model(&state).await?;
    let gig_ids: Vec<i64> = apply_filter(&model.gigs, &filter, |_| true)
        .into_iter()
        .map(|g| g.id)
        .collect();
    let buttons = resolve_buttons(&state, user.as_ref(), &model, gig_ids).await;

    let page = views::gig_list(
        &model,
        &filter,
        Viewer::from_session(user.as_ref()),
        &buttons,
        &state.config.cards,
    );
    with_view_debug(&page, |page| debug!(?filter, page = %page, "gig list rendered"));
    Ok(Json(page))
}

/// GET /api/gigs/{id}
async fn get_gig(
    State(state): State<JamboreeState>,
    OptionalSession(user): OptionalSession,
    Path(id): Path<i64>,
) -> Result<Json<GigCardView>, JamboreeError> {
    let model = load_model(&state).await?;
    let gig = model
        .gig(id)
        .ok_or_else(|| JamboreeError::NotFound(format!("Gig {id}")))?;
    let buttons = resolve_buttons(&state, user.as_ref(), &model, [id]).await;

    let card = views::gig_card(
        &model,
        gig,
        Viewer::from_session(user.as_ref()),
        button_for(&buttons, id),
        &state.config.cards,
    );
    with_view_debug(&card, |card| debug!(gig_id = id, card = %card, "gig card rendered"));
    Ok(Json(card))
}

/// POST /api/gigs/{id}/toggle
///
/// Joins when absent, leaves when present. Answers with the card's new join button.
async fn toggle_membership(
    State(state): State<JamboreeState>,
    RequireSession(user): RequireSession,
    Path(id): Path<i64>,
) -> Result<Json<JoinButtonView>, JamboreeError> {
    if state.db.get_gig(id).await?.is_none() {
        return Err(JamboreeError::NotFound(format!("Gig {id}")));
    }
    let artist_id = state
        .db
        .get_artist_by_email(user.email.as_str())
        .await?
        .map(|a| a.id);

    let control = state
        .controls
        .get_or_spawn(&user.token, artist_id, id)
        .await?;
    let button = control.toggle(artist_id).await?;

    debug!(
        gig_id = id,
        ?artist_id,
        label = button.label.as_str(),
        disabled = button.disabled,
        "join control toggled"
    );
    Ok(Json(button.into()))
}

/// DELETE /api/gigs/{id}
async fn delete_gig(
    State(state): State<JamboreeState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<StatusCode, JamboreeError> {
    state.db.delete_gig_and_links(id).await?;
    state.controls.drop_gig(id);
    info!(gig_id = id, admin = %admin.email, "gig deleted");
    Ok(StatusCode::NO_CONTENT)
}
