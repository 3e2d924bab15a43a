use std::collections::HashMap;

use callsync_types::{MuteState, PeerId};
use tokio::task::AbortHandle;

/// One in-flight local mutation, layered over the authoritative state at
/// read time until the server confirms or the request fails.
pub struct PendingMuteStateChange {
    pub mute_state: Option<MuteState>,
    pub volume: Option<i64>,
    /// Ties the entry to the request that created it, so a superseded
    /// completion that raced past its abort cannot touch the successor.
    pub(crate) seq: u64,
    abort: Option<AbortHandle>,
}

/// Optimistic overlay: pending mute/volume changes keyed by peer.
///
/// An entry exists only while its request is in flight. Replacing or
/// removing an entry aborts the request it carries, so a peer never has two
/// outstanding mutations.
#[derive(Default)]
pub struct OverlayState {
    pending: HashMap<PeerId, PendingMuteStateChange>,
}

impl OverlayState {
    pub fn get(&self, peer_id: &PeerId) -> Option<&PendingMuteStateChange> {
        self.pending.get(peer_id)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Records a new pending change, cancelling any predecessor for the
    /// same peer.
    pub fn begin(
        &mut self,
        peer_id: PeerId,
        mute_state: Option<MuteState>,
        volume: Option<i64>,
        seq: u64,
        abort: Option<AbortHandle>,
    ) {
        self.remove(&peer_id);
        self.pending.insert(
            peer_id,
            PendingMuteStateChange {
                mute_state,
                volume,
                seq,
                abort,
            },
        );
    }

    /// Drops the entry for a peer and aborts its request. Aborting an
    /// already-finished request is a no-op, so this is also the
    /// confirmation path.
    pub fn remove(&mut self, peer_id: &PeerId) -> bool {
        match self.pending.remove(peer_id) {
            Some(entry) => {
                if let Some(abort) = entry.abort {
                    abort.abort();
                }
                true
            }
            None => false,
        }
    }

    /// Clears entries the server named as confirmed or superseded.
    /// Returns whether anything changed.
    pub fn remove_named(&mut self, peer_ids: &[PeerId]) -> bool {
        let mut changed = false;
        for peer_id in peer_ids {
            changed |= self.remove(peer_id);
        }
        changed
    }
}
