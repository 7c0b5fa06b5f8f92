use async_trait::async_trait;
use serde::Serialize;

use crate::db::DbActorHandle;
use crate::error::JamboreeError;

/// Whether an artist currently attends a gig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Membership {
    Present,
    Absent,
}

impl From<bool> for Membership {
    fn from(exists: bool) -> Self {
        if exists {
            Membership::Present
        } else {
            Membership::Absent
        }
    }
}

/// The mutation surface the join model needs from the membership collection.
#[async_trait]
pub trait MembershipStore: Send + Sync + 'static {
    async fn exists(&self, artist_id: i64, gig_id: i64) -> Result<bool, JamboreeError>;

    async fn insert(&self, artist_id: i64, gig_id: i64) -> Result<(), JamboreeError>;

    /// Removing an absent membership succeeds.
    async fn remove(&self, artist_id: i64, gig_id: i64) -> Result<(), JamboreeError>;
}

#[async_trait]
impl MembershipStore for DbActorHandle {
    async fn exists(&self, artist_id: i64, gig_id: i64) -> Result<bool, JamboreeError> {
        self.membership_exists(artist_id, gig_id).await
    }

    async fn insert(&self, artist_id: i64, gig_id: i64) -> Result<(), JamboreeError> {
        self.insert_membership(artist_id, gig_id).await.map(|_| ())
    }

    async fn remove(&self, artist_id: i64, gig_id: i64) -> Result<(), JamboreeError> {
        self.remove_membership(artist_id, gig_id).await.map(|_| ())
    }
}

/// Pure lookup: no side effects on the store.
pub async fn compute_membership(
    store: &dyn MembershipStore,
    artist_id: i64,
    gig_id: i64,
) -> Result<Membership, JamboreeError> {
    store.exists(artist_id, gig_id).await.map(Membership::from)
}
