use callsync_types::{
    MemberEvent, Participant, ParticipantsPage, ParticipantsState, ParticipationStatusChange,
    UpdateBatch,
};
use tracing::{debug, warn};

use crate::directory::PeerDirectory;
use crate::ordering::sort_participants;
use crate::overlay::OverlayState;

/// How one versioned batch related to the current state.
#[derive(Debug)]
pub enum BatchOutcome {
    /// Advanced (or re-confirmed) the state; carries membership events.
    Applied(Vec<MemberEvent>),
    /// Older than the current version; payload discarded.
    Stale,
    /// Ahead of the current version by more than one; a resync is required
    /// and nothing was applied.
    Gap,
}

/// Applies one delta batch to the state, per the version rules:
///
/// * `version < current` — stale. The payload is dropped, but overlay
///   entries the batch names are still cleared so a server-confirmed
///   conflicting mutation never leaves optimistic state behind.
/// * `version > current + 1` — gap. Untouched; the caller resyncs.
/// * otherwise — applied entry by entry, count and order restored, version
///   advanced, named overlay entries cleared.
pub fn apply_batch(
    state: &mut ParticipantsState,
    overlay: &mut OverlayState,
    directory: &dyn PeerDirectory,
    batch: &UpdateBatch,
) -> BatchOutcome {
    if batch.version < state.version {
        debug!(
            version = batch.version,
            current = state.version,
            "discarding stale update batch"
        );
        overlay.remove_named(&batch.remove_pending_mute_states);
        return BatchOutcome::Stale;
    }
    if batch.version > state.version + 1 {
        warn!(
            version = batch.version,
            current = state.version,
            "version gap in update stream"
        );
        return BatchOutcome::Gap;
    }

    let version_advance = batch.version == state.version + 1;
    let mut events = Vec::new();
    for update in &batch.participant_updates {
        match update.participation_status_change {
            ParticipationStatusChange::Left => {
                let before = state.participants.len();
                state.participants.retain(|p| p.peer_id != update.peer_id);
                if state.participants.len() < before {
                    events.push(MemberEvent::Left(update.peer_id.clone()));
                    state.total_count = (state.total_count - 1).max(0);
                } else if version_advance {
                    // On a version-carrying delta the server already
                    // counted the departure even when the peer never made
                    // it into our (possibly paginated) page.
                    state.total_count = (state.total_count - 1).max(0);
                }
            }
            ParticipationStatusChange::Joined | ParticipationStatusChange::None => {
                if directory.resolve(&update.peer_id).is_none() {
                    debug_assert!(
                        false,
                        "update batch names unresolvable peer {}",
                        update.peer_id
                    );
                    warn!(peer_id = %update.peer_id, "skipping update for unresolvable peer");
                    continue;
                }

                let mut entry = Participant {
                    peer_id: update.peer_id.clone(),
                    ssrc: update.ssrc,
                    join_timestamp: update.join_timestamp,
                    activity_timestamp: update.activity_timestamp,
                    activity_rank: None,
                    raise_hand_rating: update.raise_hand_rating,
                    mute_state: update.mute_state.clone(),
                    volume: update.volume,
                    about: update.about.clone(),
                };

                match state
                    .participants
                    .iter()
                    .position(|p| p.peer_id == update.peer_id)
                {
                    Some(index) => {
                        let previous = &state.participants[index];
                        entry.join_timestamp = previous.join_timestamp;
                        entry.activity_rank = previous.activity_rank;
                        entry.activity_timestamp =
                            max_activity(previous.activity_timestamp, update.activity_timestamp);
                        if entry.ssrc.is_none() {
                            entry.ssrc = previous.ssrc;
                        }
                        if update.is_min {
                            // A minimal projection omits locally mutable
                            // fields; keep what the user set.
                            if previous
                                .mute_state
                                .as_ref()
                                .is_some_and(|m| m.muted_by_you)
                            {
                                entry.mute_state = previous.mute_state.clone();
                            }
                            entry.volume = previous.volume.or(update.volume);
                        }
                        state.participants[index] = entry;
                    }
                    None => {
                        let joined = update.participation_status_change
                            == ParticipationStatusChange::Joined;
                        state.participants.push(entry);
                        if joined {
                            state.total_count += 1;
                            events.push(MemberEvent::Joined(update.peer_id.clone()));
                        }
                    }
                }
            }
        }
    }

    state.total_count = state.total_count.max(state.participants.len() as i64);
    sort_participants(&mut state.participants, state.sort_ascending);
    state.version = batch.version;
    overlay.remove_named(&batch.remove_pending_mute_states);
    BatchOutcome::Applied(events)
}

/// Builds the replacement state from a resync snapshot, preserving the
/// local-only speaking annotations the server has no notion of, along with
/// call-level settings the fetch interface does not carry.
pub fn state_from_resync(
    previous: &ParticipantsState,
    page: ParticipantsPage,
) -> ParticipantsState {
    let mut participants = page.participants;
    for participant in &mut participants {
        if let Some(known) = previous.participant(&participant.peer_id) {
            participant.activity_rank = known.activity_rank;
            participant.activity_timestamp =
                max_activity(known.activity_timestamp, participant.activity_timestamp);
        }
    }

    let total_count = page.total_count.max(participants.len() as i64);
    let mut state = ParticipantsState {
        participants,
        next_fetch_offset: page.next_offset,
        admin_ids: previous.admin_ids.clone(),
        is_creator: previous.is_creator,
        default_participants_are_muted: previous.default_participants_are_muted,
        sort_ascending: page.sort_ascending,
        recording_start_timestamp: previous.recording_start_timestamp,
        title: previous.title.clone(),
        total_count,
        version: page.version,
    };
    sort_participants(&mut state.participants, state.sort_ascending);
    state
}

/// Speaking times are monotonic per peer within a session; merges never
/// regress them.
pub fn max_activity(previous: Option<f64>, incoming: Option<f64>) -> Option<f64> {
    match (previous, incoming) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (Some(a), None) => Some(a),
        (None, incoming) => incoming,
    }
}
