use axum::extract::rejection::JsonRejection;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use jamboree_schema::{SessionResponse, SignInRequest, SignUpRequest};
use tracing::info;

use super::shared::json_body;
use crate::accounts::{self, SessionUser};
use crate::error::JamboreeError;
use crate::server::guards::auth::RequireSession;
use crate::server::router::JamboreeState;

const AFTER_SIGN_UP: &str = "/editProfile";

pub fn router() -> Router<JamboreeState> {
    Router::new()
        .route("/api/signup", post(sign_up))
        .route("/api/signin", post(sign_in))
        .route("/api/signout", post(sign_out))
}

fn session_response(user: &SessionUser, redirect: Option<&str>) -> SessionResponse {
    SessionResponse {
        token: user.token.to_string(),
        email: user.email.clone(),
        role: user.role.to_string(),
        redirect: redirect.map(str::to_string),
    }
}

/// POST /api/signup
async fn sign_up(
    State(state): State<JamboreeState>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<Response, JamboreeError> {
    let form = json_body(payload)?;
    let user = accounts::register(&state.db, &state.sessions, &state.config.basic, &form).await?;
    let body = session_response(&user, Some(AFTER_SIGN_UP));
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

/// POST /api/signin
async fn sign_in(
    State(state): State<JamboreeState>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, JamboreeError> {
    let form = json_body(payload)?;
    let user = accounts::sign_in(&state.db, &state.sessions, &state.config.basic, &form).await?;
    Ok(Json(session_response(&user, None)))
}

/// POST /api/signout
async fn sign_out(
    State(state): State<JamboreeState>,
    RequireSession(user): RequireSession,
) -> StatusCode {
    state.sessions.close(&user.token);
    state.controls.drop_session(&user.token);
    info!(account_id = user.account_id, "signed out");
    StatusCode::NO_CONTENT
}
