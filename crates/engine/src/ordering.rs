use std::cmp::Ordering;

use callsync_types::Participant;

/// Total order over roster entries, descending priority:
///
/// 1. speaking rank (present first, lower rank first)
/// 2. last speaking time (present first, more recent first)
/// 3. raised hand (present first, higher rating first)
/// 4. join time (ascending or descending per call setting)
/// 5. peer id ascending, so the order is deterministic
pub fn compare(a: &Participant, b: &Participant, sort_ascending: bool) -> Ordering {
    match (a.activity_rank, b.activity_rank) {
        (Some(x), Some(y)) => match x.cmp(&y) {
            Ordering::Equal => {}
            ord => return ord,
        },
        (Some(_), None) => return Ordering::Less,
        (None, Some(_)) => return Ordering::Greater,
        (None, None) => {}
    }

    match (a.activity_timestamp, b.activity_timestamp) {
        (Some(x), Some(y)) => match y.total_cmp(&x) {
            Ordering::Equal => {}
            ord => return ord,
        },
        (Some(_), None) => return Ordering::Less,
        (None, Some(_)) => return Ordering::Greater,
        (None, None) => {}
    }

    match (a.raise_hand_rating, b.raise_hand_rating) {
        (Some(x), Some(y)) => match y.cmp(&x) {
            Ordering::Equal => {}
            ord => return ord,
        },
        (Some(_), None) => return Ordering::Less,
        (None, Some(_)) => return Ordering::Greater,
        (None, None) => {}
    }

    let join = if sort_ascending {
        a.join_timestamp.cmp(&b.join_timestamp)
    } else {
        b.join_timestamp.cmp(&a.join_timestamp)
    };
    match join {
        Ordering::Equal => {}
        ord => return ord,
    }

    a.peer_id.cmp(&b.peer_id)
}

/// Stable re-sort applied after every mutation that can affect ranking.
pub fn sort_participants(participants: &mut [Participant], sort_ascending: bool) {
    participants.sort_by(|a, b| compare(a, b, sort_ascending));
}

/// Union of `current` and `incoming` by peer id. Existing entries win on
/// conflict; incoming entries only add. Used by pagination and backfill so
/// a fetched page never clobbers locally richer entries.
pub fn merge_participants(
    current: Vec<Participant>,
    incoming: Vec<Participant>,
    sort_ascending: bool,
) -> Vec<Participant> {
    let mut merged = current;
    for participant in incoming {
        if !merged.iter().any(|p| p.peer_id == participant.peer_id) {
            merged.push(participant);
        }
    }
    sort_participants(&mut merged, sort_ascending);
    merged
}
