use serde::{Deserialize, Serialize};

use crate::participant::{MuteState, PeerId, Ssrc};
use crate::state::DefaultParticipantsAreMuted;

/// Membership transition carried by a delta entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipationStatusChange {
    #[default]
    None,
    Joined,
    Left,
}

/// One participant entry inside a versioned delta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantUpdate {
    pub peer_id: PeerId,
    #[serde(default)]
    pub ssrc: Option<Ssrc>,
    pub join_timestamp: i64,
    #[serde(default)]
    pub activity_timestamp: Option<f64>,
    #[serde(default)]
    pub raise_hand_rating: Option<i64>,
    #[serde(default)]
    pub mute_state: Option<MuteState>,
    #[serde(default)]
    pub volume: Option<i64>,
    #[serde(default)]
    pub about: Option<serde_json::Value>,
    #[serde(default)]
    pub participation_status_change: ParticipationStatusChange,
    /// Minimal projection: the server omitted locally mutable fields.
    #[serde(default)]
    pub is_min: bool,
}

/// A versioned incremental change to the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBatch {
    pub version: i64,
    pub participant_updates: Vec<ParticipantUpdate>,
    /// Peers whose optimistic overlay entries are confirmed or superseded
    /// by this batch.
    #[serde(default)]
    pub remove_pending_mute_states: Vec<PeerId>,
}

/// Patch to call-level settings; carries no roster change and no version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallSettingsChange {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub recording_start_timestamp: Option<Option<i64>>,
    #[serde(default)]
    pub default_participants_are_muted: Option<DefaultParticipantsAreMuted>,
}

/// One event on the server push stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum Update {
    /// Versioned roster delta.
    State(UpdateBatch),
    /// Call settings changed out of band.
    Call(CallSettingsChange),
}

/// Membership change observed while applying a delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum MemberEvent {
    Joined(PeerId),
    Left(PeerId),
}
