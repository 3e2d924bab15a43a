use callsync_types::{PeerId, PeerRecord};
use dashmap::DashMap;

/// External peer store. The engine holds only stable identifiers and asks
/// the directory per access; it never owns mutable peer records.
///
/// Resolution is synchronous within the collaborator boundary.
pub trait PeerDirectory: Send + Sync {
    fn resolve(&self, peer_id: &PeerId) -> Option<PeerRecord>;
}

/// Directory backed by a concurrent in-memory map.
#[derive(Default)]
pub struct InMemoryPeerDirectory {
    records: DashMap<PeerId, PeerRecord>,
}

impl InMemoryPeerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: PeerRecord) {
        self.records.insert(record.peer_id.clone(), record);
    }

    pub fn remove(&self, peer_id: &PeerId) -> bool {
        self.records.remove(peer_id).is_some()
    }
}

impl PeerDirectory for InMemoryPeerDirectory {
    fn resolve(&self, peer_id: &PeerId) -> Option<PeerRecord> {
        self.records.get(peer_id).map(|r| r.value().clone())
    }
}
