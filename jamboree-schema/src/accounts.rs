use serde::{Deserialize, Serialize};

/// Registration form. Fields arrive as typed; validation happens server side.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub verify_password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub email: String,
    pub role: String,
    /// Where the client should go next (`/editProfile` right after sign-up).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}
