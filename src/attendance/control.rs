//! Per-card join control.
//!
//! One actor per rendered gig card. The actor owns the card's membership state and the
//! acknowledgment timer, and handles one message at a time: a toggle that is waiting on the
//! store holds back every later toggle for the same card, and those then find the control
//! disabled.
//!
//! The viewer's artist is resolved per request and travels with every message. When it
//! differs from the one the control last saw (profile deleted, say), the control rebinds:
//! a pending acknowledgment is cancelled and membership is read again.

use super::store::{Membership, MembershipStore, compute_membership};
use crate::error::{AttendanceError, JamboreeError, MembershipAction};
use jamboree_schema::JoinButtonView;
use ractor::concurrency::JoinHandle;
use ractor::{Actor, ActorProcessingErr, ActorRef, MessagingErr, RpcReplyPort};
use serde::Serialize;
use std::{sync::Arc, time::Duration};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ButtonLabel {
    Join,
    Joined,
    Leave,
}

impl ButtonLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            ButtonLabel::Join => "Join",
            ButtonLabel::Joined => "Joined",
            ButtonLabel::Leave => "Leave",
        }
    }
}

/// What the card's join/leave button shows right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ButtonState {
    pub membership: Membership,
    pub label: ButtonLabel,
    pub disabled: bool,
}

impl ButtonState {
    /// Steady state for a membership, with no acknowledgment showing.
    pub fn steady(membership: Membership) -> Self {
        let label = match membership {
            Membership::Present => ButtonLabel::Leave,
            Membership::Absent => ButtonLabel::Join,
        };
        Self {
            membership,
            label,
            disabled: false,
        }
    }

    fn acknowledging() -> Self {
        Self {
            membership: Membership::Present,
            label: ButtonLabel::Joined,
            disabled: true,
        }
    }
}

impl From<ButtonState> for JoinButtonView {
    fn from(state: ButtonState) -> Self {
        let class = match state.membership {
            Membership::Present => "leaveButton",
            Membership::Absent => "joinButton",
        };
        JoinButtonView {
            label: state.label.as_str().to_string(),
            disabled: state.disabled,
            class: class.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum JoinControlMessage {
    /// Join when absent, leave when present, on behalf of the given artist.
    Toggle(Option<i64>, RpcReplyPort<Result<ButtonState, AttendanceError>>),

    /// Current button state; a steady control re-reads membership from the store first.
    View(Option<i64>, RpcReplyPort<ButtonState>),

    // Internal message (scheduled by the actor itself)
    /// The acknowledgment window for `generation` has elapsed.
    AckExpired { generation: u64 },
}

/// Everything a join control needs to start.
pub struct JoinControlArgs {
    pub store: Arc<dyn MembershipStore>,
    /// `None` when the viewer has no linked artist profile.
    pub artist_id: Option<i64>,
    pub gig_id: i64,
    pub ack_window: Duration,
}

#[derive(Clone)]
pub struct JoinControlHandle {
    actor: ActorRef<JoinControlMessage>,
}

impl JoinControlHandle {
    pub async fn spawn(args: JoinControlArgs) -> Result<Self, JamboreeError> {
        let (actor, _jh) = Actor::spawn(None, JoinControl, args)
            .await
            .map_err(|e| JamboreeError::RactorError(format!("JoinControl spawn failed: {e}")))?;
        Ok(Self { actor })
    }

    /// `artist_id` is the viewer's artist as of this request; `None` is rejected.
    pub async fn toggle(&self, artist_id: Option<i64>) -> Result<ButtonState, AttendanceError> {
        ractor::call!(self.actor, JoinControlMessage::Toggle, artist_id).map_err(|e| {
            AttendanceError::ControlUnavailable(format!("Toggle RPC failed: {e}"))
        })?
    }

    pub async fn view(&self, artist_id: Option<i64>) -> Result<ButtonState, AttendanceError> {
        ractor::call!(self.actor, JoinControlMessage::View, artist_id)
            .map_err(|e| AttendanceError::ControlUnavailable(format!("View RPC failed: {e}")))
    }

    /// Ends the card's lifetime; a pending acknowledgment timer is cancelled.
    pub fn stop(&self) {
        self.actor.stop(None);
    }
}

enum Phase {
    Steady,
    Acknowledging {
        generation: u64,
        timer: JoinHandle<Result<(), MessagingErr<JoinControlMessage>>>,
    },
}

struct JoinControlState {
    store: Arc<dyn MembershipStore>,
    artist_id: Option<i64>,
    gig_id: i64,
    ack_window: Duration,
    membership: Membership,
    phase: Phase,
    generation: u64,
}

impl JoinControlState {
    fn button(&self) -> ButtonState {
        match self.phase {
            Phase::Steady => ButtonState::steady(self.membership),
            Phase::Acknowledging { .. } => ButtonState::acknowledging(),
        }
    }

    fn cancel_ack(&mut self) {
        if let Phase::Acknowledging { timer, .. } =
            std::mem::replace(&mut self.phase, Phase::Steady)
        {
            timer.abort();
        }
    }

    /// Switches the control to `artist_id`. Returns whether anything changed.
    async fn rebind(&mut self, artist_id: Option<i64>) -> bool {
        if artist_id == self.artist_id {
            return false;
        }
        debug!(
            gig_id = self.gig_id,
            from = ?self.artist_id,
            to = ?artist_id,
            "join control rebound"
        );
        self.artist_id = artist_id;
        self.cancel_ack();
        self.membership = Membership::Absent;
        self.refresh().await;
        true
    }

    async fn refresh(&mut self) {
        let Some(artist_id) = self.artist_id else {
            return;
        };
        match compute_membership(self.store.as_ref(), artist_id, self.gig_id).await {
            Ok(membership) => self.membership = membership,
            Err(e) => warn!(
                artist_id,
                gig_id = self.gig_id,
                error = %e,
                "membership lookup failed; keeping last known state"
            ),
        }
    }
}

struct JoinControl;

#[ractor::async_trait]
impl Actor for JoinControl {
    type Msg = JoinControlMessage;
    type State = JoinControlState;
    type Arguments = JoinControlArgs;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let mut state = JoinControlState {
            store: args.store,
            artist_id: args.artist_id,
            gig_id: args.gig_id,
            ack_window: args.ack_window,
            membership: Membership::Absent,
            phase: Phase::Steady,
            generation: 0,
        };
        state.refresh().await;

        debug!(
            artist_id = ?state.artist_id,
            gig_id = state.gig_id,
            membership = ?state.membership,
            "JoinControl started"
        );
        Ok(state)
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        state.cancel_ack();
        debug!(gig_id = state.gig_id, "JoinControl stopped");
        Ok(())
    }

    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            JoinControlMessage::Toggle(artist_id, reply) => {
                state.rebind(artist_id).await;
                let res = self.toggle(&myself, state).await;
                let _ = reply.send(res);
            }
            JoinControlMessage::View(artist_id, reply) => {
                let rebound = state.rebind(artist_id).await;
                if !rebound && matches!(state.phase, Phase::Steady) {
                    state.refresh().await;
                }
                let _ = reply.send(state.button());
            }
            JoinControlMessage::AckExpired { generation } => {
                let current = matches!(
                    state.phase,
                    Phase::Acknowledging { generation: g, .. } if g == generation
                );
                if current {
                    state.phase = Phase::Steady;
                    debug!(gig_id = state.gig_id, generation, "join acknowledgment settled");
                }
            }
        }
        Ok(())
    }
}

impl JoinControl {
    async fn toggle(
        &self,
        myself: &ActorRef<JoinControlMessage>,
        state: &mut JoinControlState,
    ) -> Result<ButtonState, AttendanceError> {
        let Some(artist_id) = state.artist_id else {
            return Err(AttendanceError::Unauthenticated);
        };
        if matches!(state.phase, Phase::Acknowledging { .. }) {
            return Err(AttendanceError::ControlDisabled);
        }

        let gig_id = state.gig_id;
        match state.membership {
            Membership::Absent => {
                state
                    .store
                    .insert(artist_id, gig_id)
                    .await
                    .map_err(|e| mutation_failed(MembershipAction::Join, artist_id, gig_id, &e))?;

                state.membership = Membership::Present;
                state.generation += 1;
                let generation = state.generation;
                let timer = myself.send_after(state.ack_window, move || {
                    JoinControlMessage::AckExpired { generation }
                });
                state.phase = Phase::Acknowledging { generation, timer };

                info!(artist_id, gig_id, "artist joined gig");
            }
            Membership::Present => {
                state
                    .store
                    .remove(artist_id, gig_id)
                    .await
                    .map_err(|e| mutation_failed(MembershipAction::Leave, artist_id, gig_id, &e))?;

                state.membership = Membership::Absent;
                info!(artist_id, gig_id, "artist left gig");
            }
        }
        Ok(state.button())
    }
}

fn mutation_failed(
    action: MembershipAction,
    artist_id: i64,
    gig_id: i64,
    err: &JamboreeError,
) -> AttendanceError {
    warn!(artist_id, gig_id, %action, error = %err, "membership mutation failed");
    AttendanceError::MutationFailed {
        action,
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use tokio::time::sleep;

    const ACK: Duration = Duration::from_millis(80);

    /// In-memory membership collection with failure injection and an optional insert delay.
    #[derive(Default)]
    struct MemoryStore {
        rows: Mutex<HashSet<(i64, i64)>>,
        inserts: Mutex<u32>,
        fail_with: Mutex<Option<String>>,
        insert_delay: Option<Duration>,
    }

    impl MemoryStore {
        fn with_rows(rows: &[(i64, i64)]) -> Self {
            Self {
                rows: Mutex::new(rows.iter().copied().collect()),
                ..Default::default()
            }
        }

        fn fail_next(&self, reason: &str) {
            *self.fail_with.lock().unwrap() = Some(reason.to_string());
        }

        fn take_failure(&self) -> Result<(), JamboreeError> {
            match self.fail_with.lock().unwrap().take() {
                Some(reason) => Err(JamboreeError::DatabaseError(sqlx::Error::Protocol(reason))),
                None => Ok(()),
            }
        }

        fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl MembershipStore for MemoryStore {
        async fn exists(&self, artist_id: i64, gig_id: i64) -> Result<bool, JamboreeError> {
            Ok(self.rows.lock().unwrap().contains(&(artist_id, gig_id)))
        }

        async fn insert(&self, artist_id: i64, gig_id: i64) -> Result<(), JamboreeError> {
            if let Some(delay) = self.insert_delay {
                sleep(delay).await;
            }
            self.take_failure()?;
            *self.inserts.lock().unwrap() += 1;
            if self.rows.lock().unwrap().insert((artist_id, gig_id)) {
                Ok(())
            } else {
                Err(JamboreeError::DuplicateMembership { artist_id, gig_id })
            }
        }

        async fn remove(&self, artist_id: i64, gig_id: i64) -> Result<(), JamboreeError> {
            self.take_failure()?;
            self.rows.lock().unwrap().remove(&(artist_id, gig_id));
            Ok(())
        }
    }

    async fn control(store: Arc<MemoryStore>, artist_id: Option<i64>) -> JoinControlHandle {
        JoinControlHandle::spawn(JoinControlArgs {
            store,
            artist_id,
            gig_id: 7,
            ack_window: ACK,
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn absent_membership_shows_enabled_join() {
        let store = Arc::new(MemoryStore::default());
        let handle = control(store, Some(1)).await;

        let state = handle.view(Some(1)).await.unwrap();
        assert_eq!(state, ButtonState::steady(Membership::Absent));
        assert_eq!(state.label, ButtonLabel::Join);
        assert!(!state.disabled);
        handle.stop();
    }

    #[tokio::test]
    async fn existing_membership_shows_leave() {
        let store = Arc::new(MemoryStore::with_rows(&[(1, 7)]));
        let handle = control(store, Some(1)).await;

        assert_eq!(handle.view(Some(1)).await.unwrap().label, ButtonLabel::Leave);
        handle.stop();
    }

    #[tokio::test]
    async fn join_acknowledges_then_settles_on_leave() {
        let store = Arc::new(MemoryStore::default());
        let handle = control(store.clone(), Some(1)).await;

        let state = handle.toggle(Some(1)).await.unwrap();
        assert_eq!(state.label, ButtonLabel::Joined);
        assert!(state.disabled);
        assert_eq!(state.membership, Membership::Present);
        assert_eq!(store.len(), 1);

        sleep(ACK * 3).await;
        let state = handle.view(Some(1)).await.unwrap();
        assert_eq!(state, ButtonState::steady(Membership::Present));
        handle.stop();
    }

    #[tokio::test]
    async fn toggle_during_acknowledgment_is_rejected_without_store_call() {
        let store = Arc::new(MemoryStore::default());
        let handle = control(store.clone(), Some(1)).await;

        handle.toggle(Some(1)).await.unwrap();
        assert_eq!(
            handle.toggle(Some(1)).await.unwrap_err(),
            AttendanceError::ControlDisabled
        );
        assert_eq!(store.len(), 1);
        assert_eq!(*store.inserts.lock().unwrap(), 1);
        handle.stop();
    }

    #[tokio::test]
    async fn leave_goes_straight_to_join() {
        let store = Arc::new(MemoryStore::with_rows(&[(1, 7)]));
        let handle = control(store.clone(), Some(1)).await;

        let state = handle.toggle(Some(1)).await.unwrap();
        assert_eq!(state, ButtonState::steady(Membership::Absent));
        assert_eq!(store.len(), 0);
        handle.stop();
    }

    #[tokio::test]
    async fn missing_artist_is_unauthenticated_and_touches_nothing() {
        let store = Arc::new(MemoryStore::default());
        let handle = control(store.clone(), None).await;

        assert_eq!(
            handle.toggle(None).await.unwrap_err(),
            AttendanceError::Unauthenticated
        );
        assert_eq!(*store.inserts.lock().unwrap(), 0);
        handle.stop();
    }

    #[tokio::test]
    async fn failed_join_reports_reason_and_keeps_join() {
        let store = Arc::new(MemoryStore::default());
        let handle = control(store.clone(), Some(1)).await;

        store.fail_next("duplicate");
        let err = handle.toggle(Some(1)).await.unwrap_err();
        match &err {
            AttendanceError::MutationFailed { action, reason } => {
                assert_eq!(*action, MembershipAction::Join);
                assert!(reason.contains("duplicate"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("duplicate"));

        let state = handle.view(Some(1)).await.unwrap();
        assert_eq!(state, ButtonState::steady(Membership::Absent));
        handle.stop();
    }

    #[tokio::test]
    async fn failed_leave_keeps_present() {
        let store = Arc::new(MemoryStore::with_rows(&[(1, 7)]));
        let handle = control(store.clone(), Some(1)).await;

        store.fail_next("network down");
        let err = handle.toggle(Some(1)).await.unwrap_err();
        assert!(matches!(
            err,
            AttendanceError::MutationFailed {
                action: MembershipAction::Leave,
                ..
            }
        ));
        assert_eq!(handle.view(Some(1)).await.unwrap().label, ButtonLabel::Leave);
        assert_eq!(store.len(), 1);
        handle.stop();
    }

    #[tokio::test]
    async fn rapid_toggles_create_one_membership() {
        let store = Arc::new(MemoryStore {
            insert_delay: Some(Duration::from_millis(30)),
            ..Default::default()
        });
        let handle = control(store.clone(), Some(1)).await;

        let (a, b) = tokio::join!(handle.toggle(Some(1)), handle.toggle(Some(1)));
        let outcomes = [a, b];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(
            outcomes
                .iter()
                .any(|r| matches!(r, Err(AttendanceError::ControlDisabled)))
        );
        assert_eq!(store.len(), 1);
        assert_eq!(*store.inserts.lock().unwrap(), 1);
        handle.stop();
    }

    #[tokio::test]
    async fn view_picks_up_external_changes_when_steady() {
        let store = Arc::new(MemoryStore::with_rows(&[(1, 7)]));
        let handle = control(store.clone(), Some(1)).await;
        assert_eq!(handle.view(Some(1)).await.unwrap().label, ButtonLabel::Leave);

        // e.g. an admin removed the gig's memberships
        store.rows.lock().unwrap().clear();
        assert_eq!(handle.view(Some(1)).await.unwrap().label, ButtonLabel::Join);
        handle.stop();
    }

    #[tokio::test]
    async fn stopping_during_acknowledgment_cancels_timer() {
        let store = Arc::new(MemoryStore::default());
        let handle = control(store, Some(1)).await;

        handle.toggle(Some(1)).await.unwrap();
        handle.stop();
        sleep(ACK * 2).await;

        assert!(matches!(
            handle.view(Some(1)).await,
            Err(AttendanceError::ControlUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn deleted_artist_is_unauthenticated_even_on_a_live_control() {
        let store = Arc::new(MemoryStore::with_rows(&[(1, 7)]));
        let handle = control(store.clone(), Some(1)).await;
        assert_eq!(handle.view(Some(1)).await.unwrap().label, ButtonLabel::Leave);

        // the profile behind the session is gone
        assert_eq!(
            handle.toggle(None).await.unwrap_err(),
            AttendanceError::Unauthenticated
        );
        assert_eq!(handle.view(None).await.unwrap(), ButtonState::steady(Membership::Absent));
        assert_eq!(store.len(), 1);
        assert_eq!(*store.inserts.lock().unwrap(), 0);
        handle.stop();
    }

    #[tokio::test]
    async fn rebinding_cancels_a_pending_acknowledgment() {
        let store = Arc::new(MemoryStore::default());
        let handle = control(store.clone(), Some(1)).await;

        assert_eq!(handle.toggle(Some(1)).await.unwrap().label, ButtonLabel::Joined);
        let state = handle.view(Some(2)).await.unwrap();
        assert_eq!(state, ButtonState::steady(Membership::Absent));

        // the new artist can act right away
        assert_eq!(handle.toggle(Some(2)).await.unwrap().label, ButtonLabel::Joined);
        assert_eq!(store.len(), 2);
        handle.stop();
    }

    #[tokio::test]
    async fn stale_expiry_does_not_end_a_newer_acknowledgment() {
        let store = Arc::new(MemoryStore::default());
        let handle = control(store, Some(1)).await;

        handle.toggle(Some(1)).await.unwrap();
        handle
            .actor
            .cast(JoinControlMessage::AckExpired { generation: 0 })
            .unwrap();
        let state = handle.view(Some(1)).await.unwrap();
        assert_eq!(state.label, ButtonLabel::Joined);
        assert!(state.disabled);

        sleep(ACK * 3).await;
        assert_eq!(handle.view(Some(1)).await.unwrap().label, ButtonLabel::Leave);
        handle.stop();
    }

    #[tokio::test]
    async fn cancelling_the_acknowledgment_aborts_its_timer() {
        let timer: JoinHandle<Result<(), MessagingErr<JoinControlMessage>>> =
            tokio::spawn(async {
                sleep(Duration::from_secs(60)).await;
                Ok(())
            });
        let abort = timer.abort_handle();
        let mut state = JoinControlState {
            store: Arc::new(MemoryStore::default()),
            artist_id: Some(1),
            gig_id: 7,
            ack_window: ACK,
            membership: Membership::Present,
            phase: Phase::Acknowledging {
                generation: 1,
                timer,
            },
            generation: 1,
        };

        state.cancel_ack();
        sleep(Duration::from_millis(10)).await;
        assert!(abort.is_finished());
        assert_eq!(state.button(), ButtonState::steady(Membership::Present));
    }

    #[test]
    fn button_view_classes_follow_membership() {
        let view: JoinButtonView = ButtonState::steady(Membership::Present).into();
        assert_eq!(view.label, "Leave");
        assert_eq!(view.class, "leaveButton");

        let view: JoinButtonView = ButtonState::steady(Membership::Absent).into();
        assert_eq!(view.label, "Join");
        assert_eq!(view.class, "joinButton");
        assert!(!view.disabled);
    }
}
