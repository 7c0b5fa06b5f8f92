use axum::Json;
use axum::extract::rejection::JsonRejection;
use tracing::warn;

use crate::accounts::SessionUser;
use crate::attendance::{ButtonState, Membership};
use crate::error::JamboreeError;
use crate::server::router::JamboreeState;
use crate::views::{ButtonStates, ReadModel};

pub(super) async fn load_model(state: &JamboreeState) -> Result<ReadModel, JamboreeError> {
    state.db.load_collections().await.map(ReadModel::from)
}

pub(super) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, JamboreeError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| JamboreeError::BadRequest(rejection.body_text()))
}

/// Join button states for `gig_ids` as seen by `user`. Anonymous viewers get none.
///
/// Cards the session has already toggled ask their live join control, which may still be
/// acknowledging. Every other card is answered from the snapshot, so browsing spawns nothing.
pub(super) async fn resolve_buttons(
    state: &JamboreeState,
    user: Option<&SessionUser>,
    model: &ReadModel,
    gig_ids: impl IntoIterator<Item = i64>,
) -> ButtonStates {
    let mut buttons = ButtonStates::default();
    let Some(user) = user else {
        return buttons;
    };
    let artist_id = model.artist_by_email(&user.email).map(|a| a.id);

    for gig_id in gig_ids {
        let snapshot = artist_id.is_some_and(|artist_id| {
            model
                .memberships
                .iter()
                .any(|m| m.artist_id == artist_id && m.gig_id == gig_id)
        });
        let fallback = ButtonState::steady(Membership::from(snapshot));

        let button = match state.controls.get(&user.token, gig_id) {
            Some(control) => control.view(artist_id).await.unwrap_or_else(|e| {
                warn!(gig_id, error = %e, "join control view failed; using snapshot");
                fallback
            }),
            None => fallback,
        };
        buttons.insert(gig_id, button);
    }
    buttons
}
