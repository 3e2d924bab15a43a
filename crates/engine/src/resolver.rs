use std::collections::HashSet;

use callsync_types::{ParticipantsState, Ssrc};

/// Tracks media sources referenced by audio activity but absent from the
/// roster, and enforces at most one outstanding backfill fetch. Sources
/// discovered while a fetch is in flight queue for the next round.
#[derive(Default)]
pub struct MissingSsrcTracker {
    missing: HashSet<Ssrc>,
    in_flight: bool,
}

impl MissingSsrcTracker {
    /// Notes a source as missing. Returns whether it was newly recorded.
    pub fn note(&mut self, ssrc: Ssrc) -> bool {
        self.missing.insert(ssrc)
    }

    /// Drops sources that the roster now covers.
    pub fn dedupe_against(&mut self, state: &ParticipantsState) {
        let known: HashSet<Ssrc> = state
            .participants
            .iter()
            .filter_map(|p| p.ssrc)
            .collect();
        self.missing.retain(|ssrc| !known.contains(ssrc));
    }

    pub fn has_pending(&self) -> bool {
        !self.missing.is_empty()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight
    }

    /// Takes the current misses as one fetch batch. Yields nothing while a
    /// fetch is already outstanding or there is nothing to fetch.
    pub fn take_batch(&mut self) -> Option<Vec<Ssrc>> {
        if self.in_flight || self.missing.is_empty() {
            return None;
        }
        self.in_flight = true;
        Some(self.missing.drain().collect())
    }

    /// Completes the outstanding fetch. On failure the attempted sources
    /// are requeued; the next activity report re-kicks the fetch.
    pub fn complete(&mut self, attempted: &[Ssrc], success: bool) {
        self.in_flight = false;
        if !success {
            self.missing.extend(attempted.iter().copied());
        }
    }
}
