use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use callsync_config::EngineSettings;
use callsync_types::{
    CallId, CallSettingsChange, MemberEvent, MuteState, ParticipantsPage, ParticipantsState,
    PeerId, Ssrc, Update, UpdateBatch,
};
use futures::{Stream, StreamExt};
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::directory::PeerDirectory;
use crate::error::{EngineError, EngineResult};
use crate::ordering::merge_participants;
use crate::overlay::OverlayState;
use crate::processor::{self, BatchOutcome};
use crate::resolver::MissingSsrcTracker;
use crate::state::{can_manage, decay_activity_ranks, effective_state};
use crate::transport::CallTransport;

/// Everything a call's sync engine needs besides its initial snapshot.
pub struct CallContextParams {
    pub call_id: CallId,
    /// The local user, for the capability projection.
    pub my_peer_id: PeerId,
    pub is_creator: bool,
    pub settings: EngineSettings,
    pub transport: Arc<dyn CallTransport>,
    pub directory: Arc<dyn PeerDirectory>,
    pub clock: Arc<dyn Clock>,
}

enum Command {
    AddUpdates(Vec<Update>),
    UpdateAdminIds(HashSet<PeerId>),
    ReportSpeaking(Vec<(Ssrc, f64)>),
    EnsureHaveParticipants(Vec<Ssrc>),
    UpdateMuteState {
        peer_id: PeerId,
        mute_state: Option<MuteState>,
        volume: Option<i64>,
        raise_hand: Option<bool>,
    },
    UpdateShouldBeRecording(bool),
    UpdateDefaultParticipantsAreMuted(bool),
    LoadMore(String),
    // Completions of spawned collaborator calls, re-delivered onto the
    // worker so all state mutation stays on one task.
    ResyncDone(anyhow::Result<ParticipantsPage>),
    BackfillDone {
        ssrcs: Vec<Ssrc>,
        result: anyhow::Result<ParticipantsPage>,
    },
    LoadMoreDone {
        result: anyhow::Result<ParticipantsPage>,
    },
    MutationDone {
        peer_id: PeerId,
        seq: u64,
        result: anyhow::Result<Option<UpdateBatch>>,
    },
    SettingsEditDone(anyhow::Result<()>),
    Shutdown,
}

/// Handle to one call's participant synchronization engine.
///
/// All operations are commands delivered to a single worker task, so
/// consumers never observe a partially applied update. The handle is cheap
/// to clone; dropping every clone shuts the worker down.
#[derive(Clone)]
pub struct CallContext {
    cmd_tx: mpsc::Sender<Command>,
    state_rx: watch::Receiver<ParticipantsState>,
    speakers_rx: watch::Receiver<Vec<PeerId>>,
    events_tx: broadcast::Sender<MemberEvent>,
}

impl CallContext {
    /// Fetches the initial roster snapshot and starts the engine.
    pub async fn connect(params: CallContextParams) -> EngineResult<Self> {
        let page = params
            .transport
            .fetch_participants(
                params.call_id,
                None,
                Vec::new(),
                params.settings.fetch_limit,
                None,
            )
            .await?;
        Ok(Self::spawn(params, page))
    }

    /// Starts the engine from an already-fetched snapshot.
    pub fn spawn(params: CallContextParams, initial: ParticipantsPage) -> Self {
        let mut state = initial.into_state();
        state.is_creator = params.is_creator;
        let overlay = OverlayState::default();

        let (cmd_tx, cmd_rx) = mpsc::channel(params.settings.command_channel_capacity);
        let initial_view = effective_state(
            &state,
            &overlay,
            can_manage(&state, &params.my_peer_id),
        );
        let (state_tx, state_rx) = watch::channel(initial_view);
        let (speakers_tx, speakers_rx) = watch::channel(Vec::new());
        let (events_tx, _) = broadcast::channel(params.settings.member_event_capacity);

        let worker = Worker {
            call_id: params.call_id,
            my_peer_id: params.my_peer_id,
            settings: params.settings,
            transport: params.transport,
            directory: params.directory,
            clock: params.clock,
            cmd_tx: cmd_tx.downgrade(),
            cmd_rx,
            state,
            overlay,
            queue: VecDeque::new(),
            resyncing: false,
            resync_requested: false,
            missing: MissingSsrcTracker::default(),
            loading_more: false,
            next_activity_rank: 0,
            mutation_seq: 0,
            state_tx,
            speakers_tx,
            events_tx: events_tx.clone(),
        };
        tokio::spawn(worker.run());

        Self {
            cmd_tx,
            state_rx,
            speakers_rx,
            events_tx,
        }
    }

    /// Feeds a batch of push-stream events through the version state
    /// machine.
    pub async fn add_updates(&self, updates: Vec<Update>) -> EngineResult<()> {
        self.send(Command::AddUpdates(updates)).await
    }

    pub async fn update_admin_ids(&self, admin_ids: HashSet<PeerId>) -> EngineResult<()> {
        self.send(Command::UpdateAdminIds(admin_ids)).await
    }

    /// Reports speaking activity as `(source, seconds)` pairs. Sources not
    /// yet in the roster are backfilled from the server.
    pub async fn report_speaking_participants(
        &self,
        reports: Vec<(Ssrc, f64)>,
    ) -> EngineResult<()> {
        self.send(Command::ReportSpeaking(reports)).await
    }

    /// Backfills participants for media sources the roster does not cover.
    pub async fn ensure_have_participants(&self, ssrcs: Vec<Ssrc>) -> EngineResult<()> {
        self.send(Command::EnsureHaveParticipants(ssrcs)).await
    }

    /// Requests a mute/volume/raise-hand change for a participant. The
    /// change shows optimistically in the effective view until the server
    /// confirms; on failure it silently rolls back.
    pub async fn update_mute_state(
        &self,
        peer_id: PeerId,
        mute_state: Option<MuteState>,
        volume: Option<i64>,
        raise_hand: Option<bool>,
    ) -> EngineResult<()> {
        self.send(Command::UpdateMuteState {
            peer_id,
            mute_state,
            volume,
            raise_hand,
        })
        .await
    }

    pub async fn raise_hand(&self, peer_id: PeerId) -> EngineResult<()> {
        self.update_mute_state(peer_id, None, None, Some(true)).await
    }

    pub async fn lower_hand(&self, peer_id: PeerId) -> EngineResult<()> {
        self.update_mute_state(peer_id, None, None, Some(false)).await
    }

    pub async fn update_should_be_recording(&self, recording: bool) -> EngineResult<()> {
        self.send(Command::UpdateShouldBeRecording(recording)).await
    }

    pub async fn update_default_participants_are_muted(
        &self,
        is_muted: bool,
    ) -> EngineResult<()> {
        self.send(Command::UpdateDefaultParticipantsAreMuted(is_muted))
            .await
    }

    /// Fetches the next roster page. `token` must equal the current
    /// pagination cursor; anything else is ignored with a diagnostic.
    pub async fn load_more(&self, token: String) -> EngineResult<()> {
        self.send(Command::LoadMore(token)).await
    }

    pub async fn shutdown(&self) -> EngineResult<()> {
        self.send(Command::Shutdown).await
    }

    /// The effective (overlay- and capability-projected) roster view.
    pub fn state(&self) -> watch::Receiver<ParticipantsState> {
        self.state_rx.clone()
    }

    /// Peers currently holding a speaking rank, most recent first.
    pub fn active_speakers(&self) -> watch::Receiver<Vec<PeerId>> {
        self.speakers_rx.clone()
    }

    pub fn member_events(&self) -> broadcast::Receiver<MemberEvent> {
        self.events_tx.subscribe()
    }

    /// Pumps a push-update stream into the engine until it ends.
    pub fn drive_updates(
        &self,
        stream: impl Stream<Item = Update> + Send + 'static,
    ) -> JoinHandle<()> {
        let context = self.clone();
        tokio::spawn(async move {
            futures::pin_mut!(stream);
            while let Some(update) = stream.next().await {
                if context.add_updates(vec![update]).await.is_err() {
                    break;
                }
            }
        })
    }

    /// Pumps an audio-activity stream into the engine until it ends.
    pub fn drive_audio_levels(
        &self,
        stream: impl Stream<Item = (Ssrc, f64)> + Send + 'static,
    ) -> JoinHandle<()> {
        let context = self.clone();
        tokio::spawn(async move {
            futures::pin_mut!(stream);
            while let Some((ssrc, timestamp)) = stream.next().await {
                if context
                    .report_speaking_participants(vec![(ssrc, timestamp)])
                    .await
                    .is_err()
                {
                    break;
                }
            }
        })
    }

    async fn send(&self, command: Command) -> EngineResult<()> {
        self.cmd_tx
            .send(command)
            .await
            .map_err(|_| EngineError::ContextClosed)
    }
}

/// The serialization point: owns the state pair and is the only task that
/// mutates it. Collaborator calls are spawned and their completions come
/// back as commands, so at most one version transition is in flight by
/// construction.
struct Worker {
    call_id: CallId,
    my_peer_id: PeerId,
    settings: EngineSettings,
    transport: Arc<dyn CallTransport>,
    directory: Arc<dyn PeerDirectory>,
    clock: Arc<dyn Clock>,
    /// Weak, so the worker's own re-delivery path never keeps the channel
    /// (and therefore itself) alive after the last handle is dropped.
    cmd_tx: mpsc::WeakSender<Command>,
    cmd_rx: mpsc::Receiver<Command>,
    state: ParticipantsState,
    overlay: OverlayState,
    queue: VecDeque<UpdateBatch>,
    resyncing: bool,
    /// Resync wanted while another fetch was outstanding; runs when that
    /// fetch drains.
    resync_requested: bool,
    missing: MissingSsrcTracker,
    loading_more: bool,
    /// Decreasing, so fresher speakers sort ahead of older ones.
    next_activity_rank: i64,
    mutation_seq: u64,
    state_tx: watch::Sender<ParticipantsState>,
    speakers_tx: watch::Sender<Vec<PeerId>>,
    events_tx: broadcast::Sender<MemberEvent>,
}

impl Worker {
    async fn run(mut self) {
        let mut decay =
            tokio::time::interval(Duration::from_secs(self.settings.decay_interval_secs));
        decay.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of a tokio interval fires immediately.
        decay.tick().await;

        self.publish();
        info!(call_id = self.call_id.0, version = self.state.version, "call context started");

        loop {
            tokio::select! {
                command = self.cmd_rx.recv() => {
                    match command {
                        None | Some(Command::Shutdown) => break,
                        Some(command) => self.handle(command),
                    }
                }
                _ = decay.tick() => self.sweep_activity(),
            }
        }

        debug!(call_id = self.call_id.0, "call context stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::AddUpdates(updates) => {
                for update in updates {
                    match update {
                        Update::State(batch) => self.queue.push_back(batch),
                        Update::Call(change) => self.apply_call_settings(change),
                    }
                }
                self.drain_queue();
            }
            Command::UpdateAdminIds(admin_ids) => {
                self.state.admin_ids = admin_ids;
                self.publish();
            }
            Command::ReportSpeaking(reports) => self.report_speaking(reports),
            Command::EnsureHaveParticipants(ssrcs) => {
                for ssrc in ssrcs {
                    self.note_missing(ssrc);
                }
                self.kick_backfill();
            }
            Command::UpdateMuteState {
                peer_id,
                mute_state,
                volume,
                raise_hand,
            } => self.update_mute_state(peer_id, mute_state, volume, raise_hand),
            Command::UpdateShouldBeRecording(recording) => {
                self.update_should_be_recording(recording)
            }
            Command::UpdateDefaultParticipantsAreMuted(is_muted) => {
                self.update_default_participants_are_muted(is_muted)
            }
            Command::LoadMore(token) => self.load_more(token),
            Command::ResyncDone(result) => self.finish_resync(result),
            Command::BackfillDone { ssrcs, result } => self.finish_backfill(ssrcs, result),
            Command::LoadMoreDone { result } => self.finish_load_more(result),
            Command::MutationDone {
                peer_id,
                seq,
                result,
            } => self.finish_mutation(peer_id, seq, result),
            Command::SettingsEditDone(result) => {
                if let Err(e) = result {
                    warn!(call_id = self.call_id.0, error = %e, "call settings edit failed");
                }
            }
            Command::Shutdown => unreachable!("handled in run"),
        }
    }

    /// Applies queued batches in FIFO order until the queue is dry or a
    /// version gap abandons it.
    fn drain_queue(&mut self) {
        if self.resyncing {
            // Buffered batches are superseded by the snapshot in flight;
            // resync completion clears the queue.
            return;
        }
        let mut processed = false;
        while let Some(batch) = self.queue.pop_front() {
            processed = true;
            match processor::apply_batch(
                &mut self.state,
                &mut self.overlay,
                self.directory.as_ref(),
                &batch,
            ) {
                BatchOutcome::Applied(events) => {
                    for event in events {
                        let _ = self.events_tx.send(event);
                    }
                }
                BatchOutcome::Stale => {}
                BatchOutcome::Gap => {
                    self.queue.clear();
                    self.request_resync();
                    break;
                }
            }
        }
        if processed {
            self.publish();
        }
    }

    fn apply_call_settings(&mut self, change: CallSettingsChange) {
        if let Some(title) = change.title {
            self.state.title = Some(title);
        }
        if let Some(recording) = change.recording_start_timestamp {
            self.state.recording_start_timestamp = recording;
        }
        if let Some(defaults) = change.default_participants_are_muted {
            self.state.default_participants_are_muted = defaults;
        }
        self.publish();
    }

    fn report_speaking(&mut self, reports: Vec<(Ssrc, f64)>) {
        let mut changed = false;
        let mut unknown = Vec::new();
        for (ssrc, timestamp) in reports {
            match self
                .state
                .participants
                .iter_mut()
                .find(|p| p.ssrc == Some(ssrc))
            {
                Some(participant) => {
                    participant.activity_timestamp =
                        processor::max_activity(participant.activity_timestamp, Some(timestamp));
                    if participant.activity_rank.is_none() {
                        participant.activity_rank = Some(self.next_activity_rank);
                        self.next_activity_rank -= 1;
                    }
                    changed = true;
                }
                None => unknown.push(ssrc),
            }
        }
        for ssrc in unknown {
            self.missing.note(ssrc);
        }
        if changed {
            crate::ordering::sort_participants(
                &mut self.state.participants,
                self.state.sort_ascending,
            );
            self.publish();
        }
        self.kick_backfill();
    }

    fn sweep_activity(&mut self) {
        let now = self.clock.now();
        if decay_activity_ranks(&mut self.state, now, self.settings.activity_window_secs) {
            self.publish();
        }
    }

    // --- resync ---

    fn request_resync(&mut self) {
        if self.resyncing {
            return;
        }
        if self.missing.is_fetching() || self.loading_more {
            self.resync_requested = true;
            return;
        }
        self.begin_resync();
    }

    fn begin_resync(&mut self) {
        let Some(cmd_tx) = self.cmd_tx.upgrade() else {
            return;
        };
        self.resyncing = true;
        self.resync_requested = false;
        info!(
            call_id = self.call_id.0,
            version = self.state.version,
            "resyncing roster from server"
        );
        let transport = self.transport.clone();
        let call_id = self.call_id;
        let limit = self.settings.fetch_limit;
        let sort_ascending = self.state.sort_ascending;
        tokio::spawn(async move {
            let result = transport
                .fetch_participants(call_id, None, Vec::new(), limit, Some(sort_ascending))
                .await;
            let _ = cmd_tx.send(Command::ResyncDone(result)).await;
        });
    }

    fn finish_resync(&mut self, result: anyhow::Result<ParticipantsPage>) {
        self.resyncing = false;
        self.queue.clear();
        match result {
            Ok(page) => {
                self.state = processor::state_from_resync(&self.state, page);
                self.missing.dedupe_against(&self.state);
                self.publish();
            }
            Err(e) => {
                // Stay on last known good; the next push with a gap
                // requests resync again.
                warn!(call_id = self.call_id.0, error = %e, "resync fetch failed");
            }
        }
        if self.missing.has_pending() {
            self.kick_backfill();
        }
    }

    // --- missing-participant backfill ---

    fn note_missing(&mut self, ssrc: Ssrc) {
        if self
            .state
            .participants
            .iter()
            .any(|p| p.ssrc == Some(ssrc))
        {
            return;
        }
        self.missing.note(ssrc);
    }

    fn kick_backfill(&mut self) {
        if self.resyncing {
            return;
        }
        let Some(cmd_tx) = self.cmd_tx.upgrade() else {
            return;
        };
        let Some(ssrcs) = self.missing.take_batch() else {
            return;
        };
        debug!(
            call_id = self.call_id.0,
            count = ssrcs.len(),
            "fetching participants for unknown audio sources"
        );
        let transport = self.transport.clone();
        let call_id = self.call_id;
        let limit = self.settings.fetch_limit;
        let batch = ssrcs.clone();
        tokio::spawn(async move {
            let result = transport
                .fetch_participants(call_id, None, batch.clone(), limit, None)
                .await;
            let _ = cmd_tx
                .send(Command::BackfillDone {
                    ssrcs: batch,
                    result,
                })
                .await;
        });
    }

    fn finish_backfill(&mut self, ssrcs: Vec<Ssrc>, result: anyhow::Result<ParticipantsPage>) {
        match result {
            Ok(page) => {
                self.missing.complete(&ssrcs, true);
                self.state.participants = merge_participants(
                    std::mem::take(&mut self.state.participants),
                    page.participants,
                    self.state.sort_ascending,
                );
                self.state.total_count = self
                    .state
                    .total_count
                    .max(self.state.participants.len() as i64);
                self.state.version = self.state.version.max(page.version);
                self.missing.dedupe_against(&self.state);
                self.publish();
                if self.resync_requested {
                    self.begin_resync();
                } else {
                    // Sources reported while the fetch was in flight.
                    self.kick_backfill();
                }
            }
            Err(e) => {
                self.missing.complete(&ssrcs, false);
                warn!(call_id = self.call_id.0, error = %e, "backfill fetch failed");
                if self.resync_requested {
                    self.begin_resync();
                }
            }
        }
    }

    // --- pagination ---

    fn load_more(&mut self, token: String) {
        if self.state.next_fetch_offset.as_deref() != Some(token.as_str()) {
            warn!(
                call_id = self.call_id.0,
                token = %token,
                "ignoring load_more with a token that is not the current cursor"
            );
            return;
        }
        if self.loading_more {
            debug!(call_id = self.call_id.0, "page fetch already in flight");
            return;
        }
        let Some(cmd_tx) = self.cmd_tx.upgrade() else {
            return;
        };
        self.loading_more = true;
        let transport = self.transport.clone();
        let call_id = self.call_id;
        let limit = self.settings.fetch_limit;
        let sort_ascending = self.state.sort_ascending;
        tokio::spawn(async move {
            let result = transport
                .fetch_participants(call_id, Some(token), Vec::new(), limit, Some(sort_ascending))
                .await;
            let _ = cmd_tx.send(Command::LoadMoreDone { result }).await;
        });
    }

    fn finish_load_more(&mut self, result: anyhow::Result<ParticipantsPage>) {
        self.loading_more = false;
        match result {
            Ok(page) => {
                self.state.next_fetch_offset = page.next_offset.clone();
                self.state.participants = merge_participants(
                    std::mem::take(&mut self.state.participants),
                    page.participants,
                    self.state.sort_ascending,
                );
                self.state.total_count = page
                    .total_count
                    .max(self.state.participants.len() as i64);
                self.state.version = self.state.version.max(page.version);
                self.missing.dedupe_against(&self.state);
                self.publish();
            }
            Err(e) => {
                warn!(call_id = self.call_id.0, error = %e, "page fetch failed");
            }
        }
        if self.resync_requested && !self.missing.is_fetching() {
            self.begin_resync();
        }
    }

    // --- mutations ---

    fn update_mute_state(
        &mut self,
        peer_id: PeerId,
        mute_state: Option<MuteState>,
        volume: Option<i64>,
        raise_hand: Option<bool>,
    ) {
        let current = self.state.participant(&peer_id);

        // No-op check against the effective (overlay-aware) view.
        match raise_hand {
            Some(raise) => {
                let raised = current.is_some_and(|p| p.raise_hand_rating.is_some());
                if raise == raised {
                    return;
                }
            }
            None => {
                let (effective_mute, effective_volume) = match self.overlay.get(&peer_id) {
                    Some(pending) => (
                        pending.mute_state.clone(),
                        pending.volume.or(current.and_then(|p| p.volume)),
                    ),
                    None => (
                        current.and_then(|p| p.mute_state.clone()),
                        current.and_then(|p| p.volume),
                    ),
                };
                let volume_matches = volume.is_none() || volume == effective_volume;
                if effective_mute == mute_state && volume_matches {
                    debug!(peer_id = %peer_id, "mute state change is a no-op");
                    return;
                }
            }
        }

        let Some(cmd_tx) = self.cmd_tx.upgrade() else {
            return;
        };

        // Cancel-and-replace: a peer never has two outstanding requests.
        self.overlay.remove(&peer_id);

        self.mutation_seq += 1;
        let seq = self.mutation_seq;
        let transport = self.transport.clone();
        let call_id = self.call_id;
        let task_peer = peer_id.clone();
        let task_mute = mute_state.clone();
        let task = tokio::spawn(async move {
            let result = transport
                .edit_participant(call_id, task_peer.clone(), task_mute, volume, raise_hand)
                .await;
            let _ = cmd_tx
                .send(Command::MutationDone {
                    peer_id: task_peer,
                    seq,
                    result,
                })
                .await;
        });

        if raise_hand.is_none() {
            // Hand state is not locally overlaid; everything else shows
            // optimistically until the server answers.
            self.overlay
                .begin(peer_id, mute_state, volume, seq, Some(task.abort_handle()));
        }
        self.publish();
    }

    fn finish_mutation(
        &mut self,
        peer_id: PeerId,
        seq: u64,
        result: anyhow::Result<Option<UpdateBatch>>,
    ) {
        // A completion only owns the overlay entry it created; a stale one
        // (superseded while its abort raced) must not touch the successor.
        let owns_overlay = self
            .overlay
            .get(&peer_id)
            .is_some_and(|pending| pending.seq == seq);

        match result {
            Ok(Some(mut batch)) => {
                if owns_overlay && !batch.remove_pending_mute_states.contains(&peer_id) {
                    batch.remove_pending_mute_states.push(peer_id);
                }
                self.queue.push_back(batch);
                self.drain_queue();
            }
            Ok(None) => {
                if owns_overlay && self.overlay.remove(&peer_id) {
                    self.publish();
                }
            }
            Err(e) => {
                warn!(peer_id = %peer_id, error = %e, "participant mutation failed; rolling back");
                if owns_overlay && self.overlay.remove(&peer_id) {
                    self.publish();
                }
            }
        }
    }

    fn update_should_be_recording(&mut self, recording: bool) {
        if self.state.recording_start_timestamp.is_some() == recording {
            return;
        }
        // The recording timestamp is authoritative; it arrives on the push
        // stream as a call settings change.
        self.spawn_settings_edit(Some(recording), None);
    }

    fn update_default_participants_are_muted(&mut self, is_muted: bool) {
        if self.state.default_participants_are_muted.is_muted == is_muted {
            return;
        }
        self.state.default_participants_are_muted.is_muted = is_muted;
        self.publish();
        self.spawn_settings_edit(None, Some(is_muted));
    }

    fn spawn_settings_edit(
        &self,
        should_be_recording: Option<bool>,
        default_join_muted: Option<bool>,
    ) {
        let Some(cmd_tx) = self.cmd_tx.upgrade() else {
            return;
        };
        let transport = self.transport.clone();
        let call_id = self.call_id;
        tokio::spawn(async move {
            let result = transport
                .edit_call_settings(call_id, should_be_recording, default_join_muted)
                .await;
            let _ = cmd_tx.send(Command::SettingsEditDone(result)).await;
        });
    }

    // --- outputs ---

    fn publish(&mut self) {
        let manage = can_manage(&self.state, &self.my_peer_id);
        let view = effective_state(&self.state, &self.overlay, manage);
        self.state_tx.send_replace(view);

        // Base participants are kept sorted, and ranked speakers sort
        // first, so the filtered order is already rank order.
        let speakers: Vec<PeerId> = self
            .state
            .participants
            .iter()
            .filter(|p| p.activity_rank.is_some())
            .map(|p| p.peer_id.clone())
            .collect();
        self.speakers_tx.send_if_modified(|current| {
            if *current != speakers {
                *current = speakers;
                true
            } else {
                false
            }
        });
    }
}
