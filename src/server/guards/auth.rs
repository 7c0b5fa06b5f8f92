use crate::accounts::SessionUser;
use crate::error::JamboreeError;
use crate::server::router::JamboreeState;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};

fn extract_bearer(headers: &axum::http::HeaderMap) -> Option<String> {
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
}

fn session_from_parts(parts: &Parts, state: &JamboreeState) -> Option<SessionUser> {
    extract_bearer(&parts.headers).and_then(|token| state.sessions.get(&token))
}

/// The signed-in user, if any. Unknown or expired tokens count as anonymous.
#[derive(Debug, Clone)]
pub struct OptionalSession(pub Option<SessionUser>);

impl FromRequestParts<JamboreeState> for OptionalSession {
    type Rejection = JamboreeError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &JamboreeState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalSession(session_from_parts(parts, state)))
    }
}

#[derive(Debug, Clone)]
pub struct RequireSession(pub SessionUser);

impl FromRequestParts<JamboreeState> for RequireSession {
    type Rejection = JamboreeError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &JamboreeState,
    ) -> Result<Self, Self::Rejection> {
        session_from_parts(parts, state)
            .map(RequireSession)
            .ok_or(JamboreeError::Unauthenticated)
    }
}

#[derive(Debug, Clone)]
pub struct RequireAdmin(pub SessionUser);

impl FromRequestParts<JamboreeState> for RequireAdmin {
    type Rejection = JamboreeError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &JamboreeState,
    ) -> Result<Self, Self::Rejection> {
        let RequireSession(user) = RequireSession::from_request_parts(parts, state).await?;
        if user.is_admin() {
            Ok(RequireAdmin(user))
        } else {
            Err(JamboreeError::Forbidden)
        }
    }
}
