use async_trait::async_trait;
use callsync_types::{CallId, MuteState, ParticipantsPage, PeerId, Ssrc, UpdateBatch};

/// Network collaborator for a single call, abstracted from the wire format.
///
/// All requests are asynchronous and may be cancelled by dropping the task
/// that awaits them; results are fed back onto the call's serialization
/// point before they touch state.
#[async_trait]
pub trait CallTransport: Send + Sync {
    /// Fetches one roster page. Used for the initial load, pagination
    /// (`offset` = the opaque cursor), missing-source backfill (`ssrcs`
    /// non-empty) and resync. `sort_ascending` is forwarded when the local
    /// state already knows the call's sort direction.
    async fn fetch_participants(
        &self,
        call_id: CallId,
        offset: Option<String>,
        ssrcs: Vec<Ssrc>,
        limit: u32,
        sort_ascending: Option<bool>,
    ) -> anyhow::Result<ParticipantsPage>;

    /// Mutates one participant. The authoritative confirmation is the
    /// returned batch (or a later push update); `None` means the server
    /// acknowledged without a delta.
    async fn edit_participant(
        &self,
        call_id: CallId,
        peer_id: PeerId,
        mute_state: Option<MuteState>,
        volume: Option<i64>,
        raise_hand: Option<bool>,
    ) -> anyhow::Result<Option<UpdateBatch>>;

    /// Mutates call-level settings; confirmation arrives on the push stream.
    async fn edit_call_settings(
        &self,
        call_id: CallId,
        should_be_recording: Option<bool>,
        default_join_muted: Option<bool>,
    ) -> anyhow::Result<()>;
}
