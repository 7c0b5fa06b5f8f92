use crate::db::{Collections, DbArtist, DbGig, DbMembership};

/// Snapshot of the three collections a page is rendered from.
///
/// `ready == false` means the data has not arrived yet; every view built from such a
/// snapshot is `Page::Loading`.
#[derive(Debug, Clone, Default)]
pub struct ReadModel {
    pub ready: bool,
    pub artists: Vec<DbArtist>,
    pub gigs: Vec<DbGig>,
    pub memberships: Vec<DbMembership>,
}

impl From<Collections> for ReadModel {
    fn from(collections: Collections) -> Self {
        let Collections {
            artists,
            gigs,
            memberships,
        } = collections;
        Self {
            ready: true,
            artists,
            gigs,
            memberships,
        }
    }
}

impl ReadModel {
    pub fn loading() -> Self {
        Self::default()
    }

    pub fn gig(&self, gig_id: i64) -> Option<&DbGig> {
        self.gigs.iter().find(|g| g.id == gig_id)
    }

    pub fn artist(&self, artist_id: i64) -> Option<&DbArtist> {
        self.artists.iter().find(|a| a.id == artist_id)
    }

    pub fn artist_by_email(&self, email: &str) -> Option<&DbArtist> {
        let email = email.trim();
        self.artists
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
    }

    /// Artists attending a gig, in join order.
    pub fn attendees_of(&self, gig_id: i64) -> Vec<&DbArtist> {
        self.memberships
            .iter()
            .filter(|m| m.gig_id == gig_id)
            .filter_map(|m| self.artist(m.artist_id))
            .collect()
    }

    /// Gigs an artist has joined, ordered by date.
    pub fn joined_gigs(&self, artist_id: i64) -> Vec<&DbGig> {
        let mut gigs: Vec<&DbGig> = self
            .memberships
            .iter()
            .filter(|m| m.artist_id == artist_id)
            .filter_map(|m| self.gig(m.gig_id))
            .collect();
        gigs.sort_by_key(|g| (g.date, g.id));
        gigs
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::{TimeZone, Utc};

    pub fn artist(
        id: i64,
        email: &str,
        first: &str,
        instruments: &[&str],
        genres: &[&str],
    ) -> DbArtist {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        DbArtist {
            id,
            email: email.to_string(),
            first_name: first.to_string(),
            last_name: "Player".to_string(),
            instruments: instruments.iter().map(|s| s.to_string()).collect(),
            genres: genres.iter().map(|s| s.to_string()).collect(),
            skill_level: "Intermediate".to_string(),
            influences: Vec::new(),
            bio: String::new(),
            image: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn gig(id: i64, title: &str, day: u32, genres: &[&str]) -> DbGig {
        DbGig {
            id,
            title: title.to_string(),
            date: Utc.with_ymd_and_hms(2025, 3, day, 19, 30, 0).unwrap(),
            venue: "The Dock".to_string(),
            about: "Open jam".to_string(),
            skill_level: "Beginner".to_string(),
            genres: genres.iter().map(|s| s.to_string()).collect(),
            instruments: vec!["Guitar".to_string()],
            image: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    pub fn membership(id: i64, artist_id: i64, gig_id: i64) -> DbMembership {
        DbMembership {
            id,
            artist_id,
            gig_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    fn model() -> ReadModel {
        ReadModel::from(Collections {
            artists: vec![
                artist(1, "ada@example.com", "Ada", &["Bass"], &["Jazz"]),
                artist(2, "kai@example.com", "Kai", &["Drums"], &["Rock"]),
            ],
            gigs: vec![gig(10, "Late", 20, &["Jazz"]), gig(11, "Early", 2, &["Rock"])],
            memberships: vec![membership(1, 2, 10), membership(2, 1, 10), membership(3, 1, 11)],
        })
    }

    #[test]
    fn loading_snapshot_is_not_ready() {
        assert!(!ReadModel::loading().ready);
        assert!(model().ready);
    }

    #[test]
    fn attendees_follow_join_order() {
        let model = model();
        let names: Vec<_> = model.attendees_of(10).iter().map(|a| a.first_name.as_str()).collect();
        assert_eq!(names, ["Kai", "Ada"]);
        assert!(model.attendees_of(99).is_empty());
    }

    #[test]
    fn joined_gigs_are_ordered_by_date() {
        let model = model();
        let titles: Vec<_> = model.joined_gigs(1).iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, ["Early", "Late"]);
    }

    #[test]
    fn email_lookup_ignores_case() {
        assert_eq!(model().artist_by_email(" ADA@example.com").map(|a| a.id), Some(1));
    }
}
