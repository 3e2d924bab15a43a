use callsync_types::{CallSettingsChange, MemberEvent, PeerId, Update};
use futures::stream;

use crate::fixtures::*;

#[tokio::test]
async fn advancing_delta_inserts_in_join_order() {
    // A(join=100), B(join=200), descending join sort: [B, A].
    let mut call = TestCall::spawn(page(
        vec![participant("a", 100), participant("b", 200)],
        1,
    ));
    call.seed_peers(&["c"]);

    call.context
        .add_updates(vec![state_update(batch(2, vec![join_update("c", 150)]))])
        .await
        .unwrap();

    let state = call.wait_for_state(|s| s.version == 2).await;
    let ids: Vec<&str> = state.participants.iter().map(|p| p.peer_id.0.as_str()).collect();
    assert_eq!(ids, vec!["b", "c", "a"]);
    assert_eq!(state.total_count, 3);
    assert_eq!(call.next_event().await, MemberEvent::Joined(PeerId::from("c")));
}

#[tokio::test]
async fn redelivered_batch_changes_nothing() {
    let mut call = TestCall::spawn(page(
        vec![participant("a", 100), participant("b", 200)],
        1,
    ));
    call.seed_peers(&["c"]);

    let delta = batch(2, vec![join_update("c", 150)]);
    call.context
        .add_updates(vec![state_update(delta.clone())])
        .await
        .unwrap();
    let first = call.wait_for_state(|s| s.version == 2).await;

    call.context
        .add_updates(vec![state_update(delta)])
        .await
        .unwrap();
    call.settle().await;

    let second = call.state();
    assert_eq!(second.version, 2);
    assert_eq!(second.total_count, first.total_count);
    assert_eq!(second.participants, first.participants);
}

#[tokio::test]
async fn stale_delta_is_discarded() {
    let mut call = TestCall::spawn(page(
        vec![participant("a", 100), participant("b", 200)],
        5,
    ));
    call.seed_peers(&["c"]);

    call.context
        .add_updates(vec![state_update(batch(3, vec![join_update("c", 150)]))])
        .await
        .unwrap();
    call.settle().await;

    let state = call.state();
    assert_eq!(state.version, 5);
    assert_eq!(state.participants.len(), 2);
    assert_eq!(state.total_count, 2);
}

#[tokio::test]
async fn version_gap_resyncs_from_a_fresh_snapshot() {
    let mut call = TestCall::spawn(page(
        vec![participant("a", 100), participant("b", 200)],
        5,
    ));

    // The snapshot the server answers the resync with.
    call.transport.script_page(page(
        vec![
            participant("a", 100),
            participant("b", 200),
            participant("c", 150),
        ],
        9,
    ));

    // v8 on top of v5 is a gap; the payload must not partially apply.
    call.context
        .add_updates(vec![state_update(batch(8, vec![join_update("x", 1)]))])
        .await
        .unwrap();

    let state = call.wait_for_state(|s| s.version == 9).await;
    assert_eq!(state.participants.len(), 3);
    assert!(state.contains(&PeerId::from("c")));
    assert!(!state.contains(&PeerId::from("x")));

    let fetches = call.transport.fetch_requests();
    assert_eq!(fetches.len(), 1);
    assert_eq!(fetches[0].offset, None);
    assert!(fetches[0].ssrcs.is_empty());
}

#[tokio::test]
async fn left_update_removes_participant_and_emits_event() {
    let mut call = TestCall::spawn(page(
        vec![participant("a", 100), participant("b", 200)],
        1,
    ));

    call.context
        .add_updates(vec![state_update(batch(2, vec![left_update("b")]))])
        .await
        .unwrap();

    let state = call.wait_for_state(|s| s.version == 2).await;
    assert_eq!(state.participants.len(), 1);
    assert_eq!(state.total_count, 1);
    assert_eq!(call.next_event().await, MemberEvent::Left(PeerId::from("b")));
}

#[tokio::test]
async fn call_settings_change_patches_without_touching_the_roster() {
    let mut call = TestCall::spawn(page(vec![participant("a", 100)], 4));

    call.context
        .add_updates(vec![Update::Call(CallSettingsChange {
            title: Some("Standup".to_string()),
            recording_start_timestamp: Some(Some(42)),
            default_participants_are_muted: None,
        })])
        .await
        .unwrap();

    let state = call
        .wait_for_state(|s| s.title.as_deref() == Some("Standup"))
        .await;
    assert_eq!(state.recording_start_timestamp, Some(42));
    assert_eq!(state.version, 4);
    assert_eq!(state.participants.len(), 1);
}

#[tokio::test]
async fn non_admin_viewer_never_sees_hand_raise_ordering() {
    let mut raised = participant("b", 200);
    raised.raise_hand_rating = Some(5);
    let mut call = TestCall::spawn_viewer(page(vec![participant("a", 100), raised], 1));

    let state = call
        .wait_for_state(|s| s.participants.iter().all(|p| p.raise_hand_rating.is_none()))
        .await;
    // Without the rating the order falls back to join time (descending).
    assert_eq!(state.participants[0].peer_id, PeerId::from("b"));

    // Granting the local user admin rights uncovers the rating again.
    call.context
        .update_admin_ids([PeerId::from("me")].into_iter().collect())
        .await
        .unwrap();
    call.wait_for_state(|s| {
        s.participant(&PeerId::from("b"))
            .is_some_and(|p| p.raise_hand_rating == Some(5))
    })
    .await;
}

#[tokio::test]
async fn default_mute_flip_is_optimistic_and_reaches_the_server() {
    let mut call = TestCall::spawn(page(vec![participant("a", 100)], 1));

    call.context
        .update_default_participants_are_muted(true)
        .await
        .unwrap();
    call.wait_for_state(|s| s.default_participants_are_muted.is_muted)
        .await;

    let transport = call.transport.clone();
    wait_until(|| transport.settings_requests() == vec![(None, Some(true))]).await;

    // Same value again is a no-op.
    call.context
        .update_default_participants_are_muted(true)
        .await
        .unwrap();
    call.settle().await;
    assert_eq!(call.transport.settings_requests().len(), 1);
}

#[tokio::test]
async fn recording_waits_for_the_authoritative_push() {
    let mut call = TestCall::spawn(page(vec![participant("a", 100)], 1));

    call.context.update_should_be_recording(true).await.unwrap();
    let transport = call.transport.clone();
    wait_until(|| transport.settings_requests() == vec![(Some(true), None)]).await;
    assert_eq!(call.state().recording_start_timestamp, None);

    call.context
        .add_updates(vec![Update::Call(CallSettingsChange {
            title: None,
            recording_start_timestamp: Some(Some(1_700_000)),
            default_participants_are_muted: None,
        })])
        .await
        .unwrap();
    call.wait_for_state(|s| s.recording_start_timestamp == Some(1_700_000))
        .await;
}

#[tokio::test]
async fn update_stream_driver_feeds_the_engine() {
    let mut call = TestCall::spawn(page(vec![participant("a", 100)], 1));
    call.seed_peers(&["b", "c"]);

    let updates = vec![
        state_update(batch(2, vec![join_update("b", 200)])),
        state_update(batch(3, vec![join_update("c", 300)])),
    ];
    call.context.drive_updates(stream::iter(updates));

    let state = call.wait_for_state(|s| s.version == 3).await;
    assert_eq!(state.participants.len(), 3);
    assert_eq!(state.total_count, 3);
}
