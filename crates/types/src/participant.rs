use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned group call identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(pub i64);

/// Opaque participant identifier. The engine never inspects its contents;
/// it is minted by the server and resolved through the peer directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PeerId(pub String);

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PeerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Media source identifier carried by audio activity events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ssrc(pub u32);

impl fmt::Display for Ssrc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Absence of a mute state on a participant means unmuted and not muted
/// by the local user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuteState {
    pub can_unmute: bool,
    #[serde(default)]
    pub muted_by_you: bool,
}

/// One member of the call roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub peer_id: PeerId,
    /// Not yet assigned while the participant's media is unattached.
    #[serde(default)]
    pub ssrc: Option<Ssrc>,
    /// Seconds, assigned by the server; stable for a peer within a session.
    pub join_timestamp: i64,
    /// Last detected speaking time; never regresses within a session.
    #[serde(default)]
    pub activity_timestamp: Option<f64>,
    /// Local recency marker for active speakers; lower = promoted more
    /// recently. Never sent to or received from the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_rank: Option<i64>,
    /// Presence means the hand is raised; higher = raised more recently.
    #[serde(default)]
    pub raise_hand_rating: Option<i64>,
    #[serde(default)]
    pub mute_state: Option<MuteState>,
    #[serde(default)]
    pub volume: Option<i64>,
    #[serde(default)]
    pub about: Option<serde_json::Value>,
}

/// Identity record held by the external peer store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerRecord {
    pub peer_id: PeerId,
    pub display_name: String,
    #[serde(default)]
    pub username: Option<String>,
}
