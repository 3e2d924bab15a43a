use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::participant::{Participant, PeerId};

/// Call-level default mute policy for newly joining participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DefaultParticipantsAreMuted {
    pub is_muted: bool,
    pub can_change: bool,
}

/// Versioned mirror of the server-authoritative roster.
///
/// `version` is the sequence number of the delta stream this state has been
/// advanced to. The roster may be partially paginated, so `total_count` is
/// always at least `participants.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantsState {
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub next_fetch_offset: Option<String>,
    #[serde(default)]
    pub admin_ids: HashSet<PeerId>,
    #[serde(default)]
    pub is_creator: bool,
    #[serde(default)]
    pub default_participants_are_muted: DefaultParticipantsAreMuted,
    #[serde(default)]
    pub sort_ascending: bool,
    #[serde(default)]
    pub recording_start_timestamp: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    pub total_count: i64,
    pub version: i64,
}

impl ParticipantsState {
    pub fn participant(&self, peer_id: &PeerId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.peer_id == peer_id)
    }

    pub fn contains(&self, peer_id: &PeerId) -> bool {
        self.participant(peer_id).is_some()
    }
}

/// One page of a roster fetch (initial load, pagination, backfill, resync).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantsPage {
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub next_offset: Option<String>,
    pub total_count: i64,
    pub version: i64,
    #[serde(default)]
    pub sort_ascending: bool,
}

impl ParticipantsPage {
    /// Builds the initial state from a first-page snapshot.
    pub fn into_state(self) -> ParticipantsState {
        let total_count = self.total_count.max(self.participants.len() as i64);
        ParticipantsState {
            participants: self.participants,
            next_fetch_offset: self.next_offset,
            admin_ids: HashSet::new(),
            is_creator: false,
            default_participants_are_muted: DefaultParticipantsAreMuted::default(),
            sort_ascending: self.sort_ascending,
            recording_start_timestamp: None,
            title: None,
            total_count,
            version: self.version,
        }
    }
}
