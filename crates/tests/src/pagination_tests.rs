use callsync_types::{ParticipantsPage, PeerId, Ssrc};

use crate::fixtures::*;

fn first_page() -> ParticipantsPage {
    let mut initial = page(
        vec![participant("a", 100), participant("b", 200)],
        1,
    );
    initial.next_offset = Some("cursor1".to_string());
    initial.total_count = 4;
    initial
}

#[tokio::test]
async fn load_more_with_a_stale_token_is_a_no_op() {
    let mut call = TestCall::spawn(first_page());

    call.context.load_more("bogus".to_string()).await.unwrap();
    call.settle().await;

    assert!(call.transport.fetch_requests().is_empty());
    let state = call.state();
    assert_eq!(state.next_fetch_offset.as_deref(), Some("cursor1"));
    assert_eq!(state.participants.len(), 2);
}

#[tokio::test]
async fn load_more_appends_the_next_page() {
    let mut call = TestCall::spawn(first_page());

    let mut next = page(
        vec![participant("c", 300), participant("d", 400)],
        1,
    );
    next.next_offset = Some("cursor2".to_string());
    next.total_count = 4;
    call.transport.script_page(next);

    call.context.load_more("cursor1".to_string()).await.unwrap();

    let state = call
        .wait_for_state(|s| s.participants.len() == 4)
        .await;
    assert_eq!(state.next_fetch_offset.as_deref(), Some("cursor2"));
    assert_eq!(state.total_count, 4);
    // Descending join order across both pages.
    let ids: Vec<&str> = state.participants.iter().map(|p| p.peer_id.0.as_str()).collect();
    assert_eq!(ids, vec!["d", "c", "b", "a"]);

    let fetches = call.transport.fetch_requests();
    assert_eq!(fetches.len(), 1);
    assert_eq!(fetches[0].offset.as_deref(), Some("cursor1"));
}

#[tokio::test]
async fn final_page_clears_the_cursor() {
    let mut call = TestCall::spawn(first_page());

    let mut last = page(vec![participant("c", 300)], 1);
    last.total_count = 3;
    call.transport.script_page(last);

    call.context.load_more("cursor1".to_string()).await.unwrap();

    let state = call
        .wait_for_state(|s| s.participants.len() == 3)
        .await;
    assert_eq!(state.next_fetch_offset, None);

    // With no cursor left, any further load_more is rejected.
    call.context.load_more("cursor1".to_string()).await.unwrap();
    call.settle().await;
    assert_eq!(call.transport.fetch_requests().len(), 1);
}

#[tokio::test]
async fn page_responses_never_regress_the_version() {
    let mut initial = first_page();
    initial.version = 5;
    let mut call = TestCall::spawn(initial);

    // A page rendered from an older snapshot than our delta position.
    let mut stale_page = page(vec![participant("c", 300)], 3);
    stale_page.total_count = 3;
    call.transport.script_page(stale_page);

    call.context.load_more("cursor1".to_string()).await.unwrap();

    let state = call
        .wait_for_state(|s| s.contains(&PeerId::from("c")))
        .await;
    assert_eq!(state.version, 5);
}

#[tokio::test]
async fn fetched_pages_do_not_clobber_local_annotations() {
    let mut initial = first_page();
    initial.participants[0].ssrc = Some(Ssrc(1));
    let mut call = TestCall::spawn(initial);

    // A starts speaking before the next page arrives.
    call.context
        .report_speaking_participants(vec![(Ssrc(1), 50.0)])
        .await
        .unwrap();
    call.wait_for_state(|s| {
        s.participant(&PeerId::from("a"))
            .is_some_and(|p| p.activity_rank.is_some())
    })
    .await;

    // The page repeats A without any speaking annotations.
    let mut next = page(
        vec![participant("a", 100), participant("c", 300)],
        1,
    );
    next.total_count = 4;
    call.transport.script_page(next);
    call.context.load_more("cursor1".to_string()).await.unwrap();

    let state = call
        .wait_for_state(|s| s.contains(&PeerId::from("c")))
        .await;
    let a = state.participant(&PeerId::from("a")).unwrap();
    assert!(a.activity_rank.is_some());
    assert_eq!(a.activity_timestamp, Some(50.0));
}
