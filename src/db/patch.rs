use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::error::JamboreeError;

/// Abstraction for applying a patch payload/envelope to the database.
#[async_trait]
pub trait DbPatchable {
    async fn apply_patch(&self, pool: &SqlitePool) -> Result<(), JamboreeError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountCreate {
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GigCreate {
    pub title: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub skill_level: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub instruments: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtistFields {
    /// `None` => do not change; `Some(v)` => update
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub instruments: Option<Vec<String>>,
    pub genres: Option<Vec<String>>,
    pub skill_level: Option<String>,
    pub influences: Option<Vec<String>>,
    pub bio: Option<String>,
    /// `Some("")` clears the image.
    pub image: Option<String>,
}

/// Profile update addressed by the artist's lookup key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistPatch {
    pub email: String,
    pub fields: ArtistFields,
}
