pub mod participant;
pub mod state;
pub mod update;

pub use participant::{CallId, MuteState, Participant, PeerId, PeerRecord, Ssrc};
pub use state::{DefaultParticipantsAreMuted, ParticipantsPage, ParticipantsState};
pub use update::{
    CallSettingsChange, MemberEvent, ParticipantUpdate, ParticipationStatusChange, Update,
    UpdateBatch,
};
