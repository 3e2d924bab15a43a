use callsync_types::{ParticipantsState, PeerId};

use crate::ordering::sort_participants;
use crate::overlay::OverlayState;

/// Whether the viewer can act on hand-raise and mute requests.
pub fn can_manage(state: &ParticipantsState, viewer: &PeerId) -> bool {
    state.is_creator || state.admin_ids.contains(viewer)
}

/// The view consumers observe: authoritative state with the optimistic
/// overlay and the viewer's capabilities projected over it. Computed on
/// read; the base state is never mutated.
///
/// Overlay entries replace `mute_state` wholesale (a pending `None` means
/// an unmute in flight) and override `volume` when they carry one. Viewers
/// without admin/creator rights never see hand-raise ordering they cannot
/// act on, so `raise_hand_rating` is cleared and the list re-sorted.
pub fn effective_state(
    state: &ParticipantsState,
    overlay: &OverlayState,
    can_manage: bool,
) -> ParticipantsState {
    let mut view = state.clone();
    let mut changed = false;
    for participant in &mut view.participants {
        if let Some(pending) = overlay.get(&participant.peer_id) {
            participant.mute_state = pending.mute_state.clone();
            if pending.volume.is_some() {
                participant.volume = pending.volume;
            }
        }
        if !can_manage && participant.raise_hand_rating.take().is_some() {
            changed = true;
        }
    }
    if changed {
        sort_participants(&mut view.participants, view.sort_ascending);
    }
    view
}

/// Clears speaking ranks whose activity signal went stale: rank holders
/// with no activity timestamp, or one older than `window_secs`, drop back
/// into join order. Returns whether anything changed (the list is re-sorted
/// if so).
pub fn decay_activity_ranks(
    state: &mut ParticipantsState,
    now: f64,
    window_secs: u64,
) -> bool {
    let mut changed = false;
    for participant in &mut state.participants {
        if participant.activity_rank.is_none() {
            continue;
        }
        let expired = match participant.activity_timestamp {
            None => true,
            Some(ts) => now - ts > window_secs as f64,
        };
        if expired {
            participant.activity_rank = None;
            changed = true;
        }
    }
    if changed {
        sort_participants(&mut state.participants, state.sort_ascending);
    }
    changed
}
