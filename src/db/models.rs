use chrono::{DateTime, Utc};
use jamboree_cards::Faceted;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbAccount {
    pub id: i64,
    pub email: String,
    /// `pbkdf2-sha256$<rounds>$<salt>$<hex key>`
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbArtist {
    pub id: i64,
    /// Profile lookup key; unique.
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[sqlx(json)]
    pub instruments: Vec<String>,
    #[sqlx(json)]
    pub genres: Vec<String>,
    pub skill_level: String,
    #[sqlx(json)]
    pub influences: Vec<String>,
    pub bio: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbArtist {
    /// Browse views only show artists whose card has something to render.
    pub fn is_valid(&self) -> bool {
        !self.first_name.trim().is_empty()
            && !self.last_name.trim().is_empty()
            && !self.skill_level.trim().is_empty()
            && !self.instruments.is_empty()
            && !self.genres.is_empty()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbGig {
    pub id: i64,
    pub title: String,
    pub date: DateTime<Utc>,
    pub venue: String,
    pub about: String,
    pub skill_level: String,
    #[sqlx(json)]
    pub genres: Vec<String>,
    #[sqlx(json)]
    pub instruments: Vec<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Join record: one artist attending one gig.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct DbMembership {
    pub id: i64,
    pub artist_id: i64,
    pub gig_id: i64,
}

impl Faceted for DbArtist {
    fn instruments(&self) -> &[String] {
        &self.instruments
    }

    fn genres(&self) -> &[String] {
        &self.genres
    }

    fn skill_level(&self) -> &str {
        &self.skill_level
    }
}

impl Faceted for DbGig {
    fn instruments(&self) -> &[String] {
        &self.instruments
    }

    fn genres(&self) -> &[String] {
        &self.genres
    }

    fn skill_level(&self) -> &str {
        &self.skill_level
    }
}
