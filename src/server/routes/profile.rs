use axum::extract::rejection::JsonRejection;
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use jamboree_schema::{Page, ProfileUpdateRequest, ProfileView};
use tracing::{debug, info};

use super::shared::{json_body, load_model, resolve_buttons};
use crate::accounts::SessionUser;
use crate::db::{ArtistFields, ArtistPatch};
use crate::error::JamboreeError;
use crate::server::guards::auth::{OptionalSession, RequireSession};
use crate::server::router::JamboreeState;
use crate::utils::logging::with_view_debug;
use crate::views::{self, Viewer};

pub fn router() -> Router<JamboreeState> {
    Router::new()
        .route("/api/profiles/{email}", get(view_profile))
        .route("/api/profile", put(update_profile))
}

async fn render_profile(
    state: &JamboreeState,
    email: &str,
    user: Option<&SessionUser>,
) -> Result<Page<ProfileView>, JamboreeError> {
    let model = load_model(state).await?;
    let gig_ids: Vec<i64> = model
        .artist_by_email(email)
        .map(|artist| model.joined_gigs(artist.id).iter().map(|g| g.id).collect())
        .unwrap_or_default();
    let buttons = resolve_buttons(state, user, &model, gig_ids).await;

    Ok(views::profile_view(
        &model,
        email,
        Viewer::from_session(user),
        &buttons,
        &state.config.cards,
    ))
}

/// GET /api/profiles/{email}
///
/// An unknown email renders as loading, never as an error.
async fn view_profile(
    State(state): State<JamboreeState>,
    OptionalSession(user): OptionalSession,
    Path(email): Path<String>,
) -> Result<Json<Page<ProfileView>>, JamboreeError> {
    let page = render_profile(&state, &email, user.as_ref()).await?;
    with_view_debug(&page, |page| debug!(email = %email, page = %page, "profile rendered"));
    Ok(Json(page))
}

/// PUT /api/profile
///
/// Updates the caller's own artist profile and answers with the refreshed view.
async fn update_profile(
    State(state): State<JamboreeState>,
    RequireSession(user): RequireSession,
    payload: Result<Json<ProfileUpdateRequest>, JsonRejection>,
) -> Result<Json<Page<ProfileView>>, JamboreeError> {
    let update = json_body(payload)?;
    let ProfileUpdateRequest {
        first_name,
        last_name,
        instruments,
        genres,
        skill_level,
        influences,
        bio,
        image,
    } = update;

    state
        .db
        .patch_artist(ArtistPatch {
            email: user.email.clone(),
            fields: ArtistFields {
                first_name,
                last_name,
                instruments,
                genres,
                skill_level,
                influences,
                bio,
                image,
            },
        })
        .await?;
    info!(account_id = user.account_id, "profile updated");

    let page = render_profile(&state, &user.email, Some(&user)).await?;
    Ok(Json(page))
}
