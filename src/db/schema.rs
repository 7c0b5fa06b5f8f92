//! SQL DDL for initializing the database schema.
//! SQLite-first design; sequence fields are JSON arrays stored as TEXT.

/// SQLite schema includes:
/// - `accounts` table (sign-in identities, one per email)
/// - `artists` table (musician profiles, one per email)
/// - `gigs` table (jam sessions, one per (title, date))
/// - `memberships` table (artist ↔ gig attendance, one per (artist_id, gig_id))
pub const SQLITE_INIT: &str = r#"
-- ---------------------------------------------------------------------------
-- Accounts
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS accounts (
    id INTEGER PRIMARY KEY NOT NULL,
    email TEXT NOT NULL UNIQUE COLLATE NOCASE,
    password_hash TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT 'user',
    created_at TEXT NOT NULL -- RFC3339
);

-- ---------------------------------------------------------------------------
-- Artists (profile lookup key: email)
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS artists (
    id INTEGER PRIMARY KEY NOT NULL,
    email TEXT NOT NULL UNIQUE COLLATE NOCASE,
    first_name TEXT NOT NULL DEFAULT '',
    last_name TEXT NOT NULL DEFAULT '',
    instruments TEXT NOT NULL DEFAULT '[]', -- JSON array
    genres TEXT NOT NULL DEFAULT '[]', -- JSON array
    skill_level TEXT NOT NULL DEFAULT '',
    influences TEXT NOT NULL DEFAULT '[]', -- JSON array
    bio TEXT NOT NULL DEFAULT '',
    image TEXT NULL,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

-- ---------------------------------------------------------------------------
-- Gigs (one (title, date) per row)
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS gigs (
    id INTEGER PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    date TEXT NOT NULL, -- RFC3339
    venue TEXT NOT NULL DEFAULT '',
    about TEXT NOT NULL DEFAULT '',
    skill_level TEXT NOT NULL DEFAULT '',
    genres TEXT NOT NULL DEFAULT '[]', -- JSON array
    instruments TEXT NOT NULL DEFAULT '[]', -- JSON array
    image TEXT NULL,
    created_at TEXT NOT NULL, -- RFC3339
    UNIQUE(title, date)
);

CREATE INDEX IF NOT EXISTS idx_gigs_date ON gigs(date);

-- ---------------------------------------------------------------------------
-- Memberships (one (artist_id, gig_id) per row)
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS memberships (
    id INTEGER PRIMARY KEY NOT NULL,
    artist_id INTEGER NOT NULL REFERENCES artists(id) ON DELETE CASCADE,
    gig_id INTEGER NOT NULL REFERENCES gigs(id) ON DELETE CASCADE,
    created_at TEXT NOT NULL, -- RFC3339
    UNIQUE(artist_id, gig_id)
);

CREATE INDEX IF NOT EXISTS idx_memberships_gig ON memberships(gig_id);
"#;
