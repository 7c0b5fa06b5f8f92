use moka::notification::RemovalCause;
use moka::sync::Cache;
use std::{sync::Arc, time::Duration};
use tracing::debug;

use super::control::{JoinControlArgs, JoinControlHandle};
use super::store::MembershipStore;
use crate::error::JamboreeError;

/// One live card: a viewer's session looking at one gig.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardKey {
    pub session: Arc<str>,
    pub gig_id: i64,
}

pub type JoinControlCache = Cache<CardKey, JoinControlHandle>;

/// Live join controls, keyed by card. Idle cards are evicted and their actors stopped.
#[derive(Clone)]
pub struct JoinControls {
    cache: JoinControlCache,
    store: Arc<dyn MembershipStore>,
    ack_window: Duration,
}

impl JoinControls {
    pub fn new(
        store: Arc<dyn MembershipStore>,
        ack_window: Duration,
        idle: Duration,
        max_capacity: u64,
    ) -> Self {
        let cache = JoinControlCache::builder()
            .time_to_idle(idle.max(Duration::from_secs(1)))
            .max_capacity(max_capacity.max(1))
            .eviction_listener(|key: Arc<CardKey>, handle: JoinControlHandle, cause| {
                if cause != RemovalCause::Replaced {
                    debug!(gig_id = key.gig_id, ?cause, "join control evicted");
                }
                handle.stop();
            })
            .build();

        Self {
            cache,
            store,
            ack_window,
        }
    }

    /// The card's control if one is live. Never spawns.
    pub fn get(&self, session: &Arc<str>, gig_id: i64) -> Option<JoinControlHandle> {
        self.cache.get(&CardKey {
            session: session.clone(),
            gig_id,
        })
    }

    /// Returns the card's control, spawning it on first sight.
    ///
    /// `artist_id` only seeds a new control; callers pass the current artist with every
    /// toggle and view.
    pub async fn get_or_spawn(
        &self,
        session: &Arc<str>,
        artist_id: Option<i64>,
        gig_id: i64,
    ) -> Result<JoinControlHandle, JamboreeError> {
        let key = CardKey {
            session: session.clone(),
            gig_id,
        };
        if let Some(handle) = self.cache.get(&key) {
            return Ok(handle);
        }

        let spawned = JoinControlHandle::spawn(JoinControlArgs {
            store: self.store.clone(),
            artist_id,
            gig_id,
            ack_window: self.ack_window,
        })
        .await?;

        let entry = self.cache.entry(key).or_insert_with(|| spawned.clone());
        if !entry.is_fresh() {
            // Lost a race with another request for the same card.
            spawned.stop();
        }
        Ok(entry.into_value())
    }

    /// Drops every card belonging to a session, e.g. on sign-out.
    pub fn drop_session(&self, session: &str) {
        for (key, _) in self.cache.iter() {
            if &*key.session == session {
                self.cache.invalidate(&*key);
            }
        }
    }

    /// Drops every card showing a gig, e.g. after the gig was deleted.
    pub fn drop_gig(&self, gig_id: i64) {
        for (key, _) in self.cache.iter() {
            if key.gig_id == gig_id {
                self.cache.invalidate(&*key);
            }
        }
    }

    #[cfg(test)]
    fn live_cards(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}
