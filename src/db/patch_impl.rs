//! ArtistPatch -> DbPatchable implementation.
//!
//! This sits in the `db` module because it contains SQL/table knowledge.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::types::Json;
use tracing::debug;

use crate::db::patch::{ArtistFields, ArtistPatch, DbPatchable};
use crate::error::JamboreeError;

#[async_trait]
impl DbPatchable for ArtistPatch {
    async fn apply_patch(&self, pool: &SqlitePool) -> Result<(), JamboreeError> {
        let ArtistFields {
            first_name,
            last_name,
            instruments,
            genres,
            skill_level,
            influences,
            bio,
            image,
        } = self.fields.clone();

        let image_set = image.is_some();
        let image_clear = image.as_deref().is_some_and(|v| v.trim().is_empty());
        let image = image.filter(|v| !v.trim().is_empty());
        let updated_at = Utc::now();

        let res = sqlx::query(
            r#"
            UPDATE artists
            SET
                first_name = COALESCE(?, first_name),
                last_name = COALESCE(?, last_name),
                instruments = COALESCE(?, instruments),
                genres = COALESCE(?, genres),
                skill_level = COALESCE(?, skill_level),
                influences = COALESCE(?, influences),
                bio = COALESCE(?, bio),
                image = CASE WHEN ? THEN NULL ELSE COALESCE(?, image) END,
                updated_at = ?
            WHERE email = ?
            "#,
        )
        .bind(first_name.map(|v| v.trim().to_string()))
        .bind(last_name.map(|v| v.trim().to_string()))
        .bind(instruments.map(|v| Json(clean_list(v))))
        .bind(genres.map(|v| Json(clean_list(v))))
        .bind(skill_level.map(|v| v.trim().to_string()))
        .bind(influences.map(|v| Json(clean_list(v))))
        .bind(bio)
        .bind(image_clear)
        .bind(image)
        .bind(updated_at)
        .bind(&self.email)
        .execute(pool)
        .await?;

        let affected = res.rows_affected();
        debug!(
            email = %self.email,
            affected,
            updated_at = %updated_at,
            image_set,
            image_clear,
            "artist patch applied"
        );

        if affected == 0 {
            return Err(JamboreeError::NotFound(format!("Artist {}", self.email)));
        }
        Ok(())
    }
}

/// Trims entries and drops blanks while keeping the submitted order.
fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::clean_list;

    #[test]
    fn clean_list_keeps_order_and_drops_blanks() {
        let cleaned = clean_list(vec![" Drums ".into(), "".into(), "Bass".into(), "  ".into()]);
        assert_eq!(cleaned, vec!["Drums", "Bass"]);
    }
}
