use crate::db::models::{DbAccount, DbArtist, DbGig, DbMembership};
use crate::db::patch::{AccountCreate, ArtistPatch, DbPatchable, GigCreate};
use crate::db::schema::SQLITE_INIT;
use crate::error::JamboreeError;
use chrono::Utc;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::types::Json;
use sqlx::{SqlitePool, Transaction};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info};

const ARTIST_COLUMNS: &str = "id, email, first_name, last_name, instruments, genres, \
     skill_level, influences, bio, image, created_at, updated_at";
const GIG_COLUMNS: &str =
    "id, title, date, venue, about, skill_level, genres, instruments, image, created_at";

/// All three collections read in one pass.
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub artists: Vec<DbArtist>,
    pub gigs: Vec<DbGig>,
    pub memberships: Vec<DbMembership>,
}

#[derive(Debug)]
pub enum DbActorMessage {
    /// Create an account; fails with `EmailTaken` when the email is registered.
    CreateAccount(AccountCreate, RpcReplyPort<Result<DbAccount, JamboreeError>>),

    /// Look up an account by email.
    GetAccountByEmail(String, RpcReplyPort<Result<Option<DbAccount>, JamboreeError>>),

    /// Create an empty artist profile for an email (idempotent) and return its id.
    CreateArtist(String, RpcReplyPort<Result<i64, JamboreeError>>),

    /// Look up an artist by profile key.
    GetArtistByEmail(String, RpcReplyPort<Result<Option<DbArtist>, JamboreeError>>),

    /// Patch an artist profile by email.
    PatchArtist(ArtistPatch, RpcReplyPort<Result<(), JamboreeError>>),

    /// Create a gig (idempotent on title + date) and return its id.
    CreateGig(GigCreate, RpcReplyPort<Result<i64, JamboreeError>>),

    /// Get a gig by id.
    GetGig(i64, RpcReplyPort<Result<Option<DbGig>, JamboreeError>>),

    /// Read artists, gigs and memberships together.
    LoadCollections(RpcReplyPort<Result<Collections, JamboreeError>>),

    /// Does a membership exist for (artist_id, gig_id)?
    MembershipExists(i64, i64, RpcReplyPort<Result<bool, JamboreeError>>),

    /// Insert a membership; fails with `DuplicateMembership` when the pair exists.
    InsertMembership(i64, i64, RpcReplyPort<Result<i64, JamboreeError>>),

    /// Remove a membership. Returns whether a row was removed.
    RemoveMembership(i64, i64, RpcReplyPort<Result<bool, JamboreeError>>),

    /// Remove a gig and every membership pointing at it.
    DeleteGigAndLinks(i64, RpcReplyPort<Result<(), JamboreeError>>),

    /// Remove an artist and every membership pointing at it. Returns the artist's email.
    DeleteArtistAndLinks(i64, RpcReplyPort<Result<String, JamboreeError>>),
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn create_account(&self, create: AccountCreate) -> Result<DbAccount, JamboreeError> {
        ractor::call!(self.actor, DbActorMessage::CreateAccount, create).map_err(|e| {
            JamboreeError::RactorError(format!("DbActor CreateAccount RPC failed: {e}"))
        })?
    }

    pub async fn get_account_by_email(
        &self,
        email: impl Into<String>,
    ) -> Result<Option<DbAccount>, JamboreeError> {
        ractor::call!(self.actor, DbActorMessage::GetAccountByEmail, email.into()).map_err(|e| {
            JamboreeError::RactorError(format!("DbActor GetAccountByEmail RPC failed: {e}"))
        })?
    }

    pub async fn create_artist(&self, email: impl Into<String>) -> Result<i64, JamboreeError> {
        ractor::call!(self.actor, DbActorMessage::CreateArtist, email.into()).map_err(|e| {
            JamboreeError::RactorError(format!("DbActor CreateArtist RPC failed: {e}"))
        })?
    }

    pub async fn get_artist_by_email(
        &self,
        email: impl Into<String>,
    ) -> Result<Option<DbArtist>, JamboreeError> {
        ractor::call!(self.actor, DbActorMessage::GetArtistByEmail, email.into()).map_err(|e| {
            JamboreeError::RactorError(format!("DbActor GetArtistByEmail RPC failed: {e}"))
        })?
    }

    pub async fn patch_artist(&self, patch: ArtistPatch) -> Result<(), JamboreeError> {
        ractor::call!(self.actor, DbActorMessage::PatchArtist, patch).map_err(|e| {
            JamboreeError::RactorError(format!("DbActor PatchArtist RPC failed: {e}"))
        })?
    }

    pub async fn create_gig(&self, create: GigCreate) -> Result<i64, JamboreeError> {
        ractor::call!(self.actor, DbActorMessage::CreateGig, create)
            .map_err(|e| JamboreeError::RactorError(format!("DbActor CreateGig RPC failed: {e}")))?
    }

    pub async fn get_gig(&self, id: i64) -> Result<Option<DbGig>, JamboreeError> {
        ractor::call!(self.actor, DbActorMessage::GetGig, id)
            .map_err(|e| JamboreeError::RactorError(format!("DbActor GetGig RPC failed: {e}")))?
    }

    pub async fn load_collections(&self) -> Result<Collections, JamboreeError> {
        ractor::call!(self.actor, DbActorMessage::LoadCollections).map_err(|e| {
            JamboreeError::RactorError(format!("DbActor LoadCollections RPC failed: {e}"))
        })?
    }

    pub async fn membership_exists(
        &self,
        artist_id: i64,
        gig_id: i64,
    ) -> Result<bool, JamboreeError> {
        ractor::call!(
            self.actor,
            DbActorMessage::MembershipExists,
            artist_id,
            gig_id
        )
        .map_err(|e| {
            JamboreeError::RactorError(format!("DbActor MembershipExists RPC failed: {e}"))
        })?
    }

    pub async fn insert_membership(
        &self,
        artist_id: i64,
        gig_id: i64,
    ) -> Result<i64, JamboreeError> {
        ractor::call!(
            self.actor,
            DbActorMessage::InsertMembership,
            artist_id,
            gig_id
        )
        .map_err(|e| {
            JamboreeError::RactorError(format!("DbActor InsertMembership RPC failed: {e}"))
        })?
    }

    pub async fn remove_membership(
        &self,
        artist_id: i64,
        gig_id: i64,
    ) -> Result<bool, JamboreeError> {
        ractor::call!(
            self.actor,
            DbActorMessage::RemoveMembership,
            artist_id,
            gig_id
        )
        .map_err(|e| {
            JamboreeError::RactorError(format!("DbActor RemoveMembership RPC failed: {e}"))
        })?
    }

    pub async fn delete_gig_and_links(&self, gig_id: i64) -> Result<(), JamboreeError> {
        ractor::call!(self.actor, DbActorMessage::DeleteGigAndLinks, gig_id).map_err(|e| {
            JamboreeError::RactorError(format!("DbActor DeleteGigAndLinks RPC failed: {e}"))
        })?
    }

    pub async fn delete_artist_and_links(&self, artist_id: i64) -> Result<String, JamboreeError> {
        ractor::call!(self.actor, DbActorMessage::DeleteArtistAndLinks, artist_id).map_err(
            |e| JamboreeError::RactorError(format!("DbActor DeleteArtistAndLinks RPC failed: {e}")),
        )?
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        apply_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!("DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        let pool = &state.pool;
        match message {
            DbActorMessage::CreateAccount(create, reply) => {
                let _ = reply.send(self.create_account(pool, create).await);
            }
            DbActorMessage::GetAccountByEmail(email, reply) => {
                let _ = reply.send(self.get_account_by_email(pool, &email).await);
            }
            DbActorMessage::CreateArtist(email, reply) => {
                let _ = reply.send(self.create_artist(pool, &email).await);
            }
            DbActorMessage::GetArtistByEmail(email, reply) => {
                let _ = reply.send(self.get_artist_by_email(pool, &email).await);
            }
            DbActorMessage::PatchArtist(patch, reply) => {
                let _ = reply.send(patch.apply_patch(pool).await);
            }
            DbActorMessage::CreateGig(create, reply) => {
                let _ = reply.send(self.create_gig(pool, create).await);
            }
            DbActorMessage::GetGig(id, reply) => {
                let _ = reply.send(self.get_gig(pool, id).await);
            }
            DbActorMessage::LoadCollections(reply) => {
                let _ = reply.send(self.load_collections(pool).await);
            }
            DbActorMessage::MembershipExists(artist_id, gig_id, reply) => {
                let _ = reply.send(self.membership_exists(pool, artist_id, gig_id).await);
            }
            DbActorMessage::InsertMembership(artist_id, gig_id, reply) => {
                let _ = reply.send(self.insert_membership(pool, artist_id, gig_id).await);
            }
            DbActorMessage::RemoveMembership(artist_id, gig_id, reply) => {
                let _ = reply.send(self.remove_membership(pool, artist_id, gig_id).await);
            }
            DbActorMessage::DeleteGigAndLinks(gig_id, reply) => {
                let _ = reply.send(self.delete_gig_and_links(pool, gig_id).await);
            }
            DbActorMessage::DeleteArtistAndLinks(artist_id, reply) => {
                let _ = reply.send(self.delete_artist_and_links(pool, artist_id).await);
            }
        }
        Ok(())
    }
}

impl DbActor {
    async fn create_account(
        &self,
        pool: &SqlitePool,
        create: AccountCreate,
    ) -> Result<DbAccount, JamboreeError> {
        let email = normalize_email(&create.email);
        let now = Utc::now();
        let res = sqlx::query_as::<_, DbAccount>(
            r#"
        INSERT INTO accounts (email, password_hash, role, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, email, password_hash, role, created_at
        "#,
        )
        .bind(&email)
        .bind(create.password_hash)
        .bind(create.role)
        .bind(now)
        .fetch_one(pool)
        .await;

        match res {
            Ok(account) => Ok(account),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(JamboreeError::EmailTaken(email))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_account_by_email(
        &self,
        pool: &SqlitePool,
        email: &str,
    ) -> Result<Option<DbAccount>, JamboreeError> {
        let row = sqlx::query_as::<_, DbAccount>(
            r#"
        SELECT id, email, password_hash, role, created_at
        FROM accounts
        WHERE email = ?
        "#,
        )
        .bind(normalize_email(email))
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    async fn create_artist(&self, pool: &SqlitePool, email: &str) -> Result<i64, JamboreeError> {
        let email = normalize_email(email);
        let now = Utc::now();
        let id: i64 = sqlx::query_scalar(
            r#"
        INSERT INTO artists (email, created_at, updated_at)
        VALUES (?, ?, ?)
        ON CONFLICT(email) DO UPDATE SET email = excluded.email
        RETURNING id
        "#,
        )
        .bind(&email)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;

        debug!(%email, id, "artist profile created");
        Ok(id)
    }

    async fn get_artist_by_email(
        &self,
        pool: &SqlitePool,
        email: &str,
    ) -> Result<Option<DbArtist>, JamboreeError> {
        let row = sqlx::query_as::<_, DbArtist>(&format!(
            "SELECT {ARTIST_COLUMNS} FROM artists WHERE email = ?"
        ))
        .bind(normalize_email(email))
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    async fn create_gig(&self, pool: &SqlitePool, create: GigCreate) -> Result<i64, JamboreeError> {
        let now = Utc::now();
        let id: i64 = sqlx::query_scalar(
            r#"
        INSERT INTO gigs (
            title, date, venue, about, skill_level, genres, instruments, image, created_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(title, date) DO UPDATE SET title = excluded.title
        RETURNING id
        "#,
        )
        .bind(create.title)
        .bind(create.date)
        .bind(create.venue)
        .bind(create.about)
        .bind(create.skill_level)
        .bind(Json(create.genres))
        .bind(Json(create.instruments))
        .bind(create.image)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(id)
    }

    async fn get_gig(&self, pool: &SqlitePool, id: i64) -> Result<Option<DbGig>, JamboreeError> {
        let sql = format!("SELECT {GIG_COLUMNS} FROM gigs WHERE id = ?");
        let row = sqlx::query_as::<_, DbGig>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row)
    }

    async fn load_collections(&self, pool: &SqlitePool) -> Result<Collections, JamboreeError> {
        let sql = format!("SELECT {ARTIST_COLUMNS} FROM artists ORDER BY id");
        let artists = sqlx::query_as::<_, DbArtist>(&sql).fetch_all(pool).await?;

        let sql = format!("SELECT {GIG_COLUMNS} FROM gigs ORDER BY date, id");
        let gigs = sqlx::query_as::<_, DbGig>(&sql).fetch_all(pool).await?;

        let memberships = sqlx::query_as::<_, DbMembership>(
            r#"
        SELECT id, artist_id, gig_id
        FROM memberships
        ORDER BY id
        "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(Collections {
            artists,
            gigs,
            memberships,
        })
    }

    async fn membership_exists(
        &self,
        pool: &SqlitePool,
        artist_id: i64,
        gig_id: i64,
    ) -> Result<bool, JamboreeError> {
        let count: i64 = sqlx::query_scalar(
            r#"
        SELECT COUNT(*) FROM memberships WHERE artist_id = ? AND gig_id = ?
        "#,
        )
        .bind(artist_id)
        .bind(gig_id)
        .fetch_one(pool)
        .await?;

        Ok(count > 0)
    }

    async fn insert_membership(
        &self,
        pool: &SqlitePool,
        artist_id: i64,
        gig_id: i64,
    ) -> Result<i64, JamboreeError> {
        let res = sqlx::query_scalar::<_, i64>(
            r#"
        INSERT INTO memberships (artist_id, gig_id, created_at)
        VALUES (?, ?, ?)
        RETURNING id
        "#,
        )
        .bind(artist_id)
        .bind(gig_id)
        .bind(Utc::now())
        .fetch_one(pool)
        .await;

        match res {
            Ok(id) => {
                debug!(artist_id, gig_id, id, "membership inserted");
                Ok(id)
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(JamboreeError::DuplicateMembership { artist_id, gig_id })
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => Err(
                JamboreeError::NotFound(format!("Artist {artist_id} or gig {gig_id}")),
            ),
            Err(e) => Err(e.into()),
        }
    }

    async fn remove_membership(
        &self,
        pool: &SqlitePool,
        artist_id: i64,
        gig_id: i64,
    ) -> Result<bool, JamboreeError> {
        let res = sqlx::query(
            r#"
        DELETE FROM memberships WHERE artist_id = ? AND gig_id = ?
        "#,
        )
        .bind(artist_id)
        .bind(gig_id)
        .execute(pool)
        .await?;

        let removed = res.rows_affected() > 0;
        debug!(artist_id, gig_id, removed, "membership removed");
        Ok(removed)
    }

    async fn delete_gig_and_links(
        &self,
        pool: &SqlitePool,
        gig_id: i64,
    ) -> Result<(), JamboreeError> {
        let mut tx = pool.begin().await?;
        let links = delete_links(&mut tx, "gig_id", gig_id).await?;
        let res = sqlx::query("DELETE FROM gigs WHERE id = ?")
            .bind(gig_id)
            .execute(&mut *tx)
            .await?;

        if res.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(JamboreeError::NotFound(format!("Gig {gig_id}")));
        }
        tx.commit().await?;

        info!(gig_id, links, "gig deleted with its memberships");
        Ok(())
    }

    async fn delete_artist_and_links(
        &self,
        pool: &SqlitePool,
        artist_id: i64,
    ) -> Result<String, JamboreeError> {
        let mut tx = pool.begin().await?;
        let links = delete_links(&mut tx, "artist_id", artist_id).await?;
        let email: Option<String> =
            sqlx::query_scalar("DELETE FROM artists WHERE id = ? RETURNING email")
                .bind(artist_id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(email) = email else {
            tx.rollback().await?;
            return Err(JamboreeError::NotFound(format!("Artist {artist_id}")));
        };
        tx.commit().await?;

        info!(artist_id, links, email = %email, "artist deleted with its memberships");
        Ok(email)
    }
}

async fn delete_links(
    tx: &mut Transaction<'_, sqlx::Sqlite>,
    column: &'static str,
    id: i64,
) -> Result<u64, JamboreeError> {
    let res = sqlx::query(&format!("DELETE FROM memberships WHERE {column} = ?"))
        .bind(id)
        .execute(&mut **tx)
        .await?;
    Ok(res.rows_affected())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Spawn the database actor and return a cloneable handle.
pub async fn spawn(database_url: &str) -> DbActorHandle {
    let (actor, _jh) = ractor::Actor::spawn(
        Some(format!("DbActor:{database_url}")),
        DbActor,
        database_url.to_string(),
    )
    .await
    .expect("failed to spawn DbActor");

    DbActorHandle { actor }
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), JamboreeError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
