use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use crate::db::{DbActorHandle, GigCreate};
use crate::error::JamboreeError;

/// Reads a JSON array of gigs. Entries that do not parse are skipped with a warning.
pub fn load_gigs(path: &Path) -> Result<Vec<GigCreate>, JamboreeError> {
    if !path.exists() {
        info!(path = %path.display(), "seed file not found; skipping load");
        return Ok(Vec::new());
    }
    let contents = fs::read_to_string(path)?;
    let entries: Vec<Value> = serde_json::from_str(&contents)?;

    let gigs = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<GigCreate>(value) {
            Ok(gig) if !gig.title.trim().is_empty() => Some(gig),
            Ok(_) => {
                warn!(path = %path.display(), index, "seed gig without a title; skipped");
                None
            }
            Err(e) => {
                warn!(path = %path.display(), index, error = %e, "failed to parse seed gig");
                None
            }
        })
        .collect();
    Ok(gigs)
}

/// Inserts every gig from `path`. Already-present gigs (same title and date) are left alone.
pub async fn seed_gigs(db: &DbActorHandle, path: &Path) -> Result<usize, JamboreeError> {
    let gigs = load_gigs(path)?;
    let total = gigs.len();
    let mut inserted = 0;
    for gig in gigs {
        let title = gig.title.clone();
        match db.create_gig(gig).await {
            Ok(id) => {
                inserted += 1;
                info!(gig_id = id, title = %title, "seed gig ready");
            }
            Err(e) => warn!(title = %title, error = %e, "failed to seed gig"),
        }
    }
    info!(path = %path.display(), total, inserted, "gig seeding finished");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("jamboree-seed-{name}-{}-{nanos}.json", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_loads_nothing() {
        let gigs = load_gigs(Path::new("/definitely/not/here.json")).unwrap();
        assert!(gigs.is_empty());
    }

    #[test]
    fn bad_entries_are_skipped() {
        let path = temp_file(
            "mixed",
            r#"[
                {"title": "Harbor Jam", "date": "2025-03-03T19:30:00Z", "genres": ["Jazz"]},
                {"title": "No date"},
                {"title": "  ", "date": "2025-03-04T19:30:00Z"}
            ]"#,
        );
        let gigs = load_gigs(&path).unwrap();
        assert_eq!(gigs.len(), 1);
        assert_eq!(gigs[0].title, "Harbor Jam");
        assert_eq!(gigs[0].genres, ["Jazz"]);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn non_array_file_is_an_error() {
        let path = temp_file("object", r#"{"title": "x"}"#);
        assert!(matches!(load_gigs(&path), Err(JamboreeError::JsonError(_))));
        let _ = fs::remove_file(path);
    }
}
