//! Voting session behavior against an in-memory contract.

use std::sync::atomic::Ordering;

use voting_dapp::session::VotingSession;

mod common;

use common::{owner, voter, FakeVoting, NOW};

const NAMES: [&str; 3] = ["Alice", "Bob", "Charlie"];

async fn session_for(contract: FakeVoting, account: alloy::primitives::Address) -> VotingSession<FakeVoting> {
    let mut session = VotingSession::new(contract, account);
    session.initialize().await;
    session
}

#[tokio::test]
async fn test_initialize_mirrors_contract() {
    let session = session_for(FakeVoting::new(owner(), &NAMES), owner()).await;
    let view = session.view();

    assert_eq!(view.candidates.len(), 3);
    assert_eq!(view.candidates[2].id, 2);
    assert_eq!(view.candidates[2].name, "Charlie");
    assert_eq!(view.candidates[0].vote_count, "0");
    assert!(view.is_owner);
    assert_eq!(view.voting_start, NOW - 600);
    assert_eq!(view.voting_end, NOW + 3_725);
    assert!(!view.loading);
    assert_eq!(view.error, None);
}

#[tokio::test]
async fn test_time_left_from_window() {
    let mut session = session_for(FakeVoting::new(voter(), &NAMES), voter()).await;
    assert_eq!(session.tick_at(NOW), "1h 2m 5s remaining");
    assert_eq!(session.tick_at(NOW + 3_725), "Voting ended");
    assert_eq!(session.view().time_left, "Voting ended");
}

#[tokio::test]
async fn test_non_owner_cannot_add_candidate() {
    let mut session = session_for(FakeVoting::new(voter(), &NAMES), voter()).await;
    assert!(!session.view().is_owner);

    let outcome = session.add_candidate("Dave").await;
    assert!(outcome.is_none());
    assert_eq!(
        session.view().error.as_deref(),
        Some("Only contract owner can add candidates")
    );
    assert_eq!(session.view().candidates.len(), 3);
    assert!(!session.view().loading);
}

#[tokio::test]
async fn test_owner_adds_candidate() {
    let mut session = session_for(FakeVoting::new(owner(), &NAMES), owner()).await;

    let outcome = session.add_candidate("Dave").await.unwrap();
    assert_eq!(outcome.block_number, 101);

    let view = session.view();
    assert_eq!(view.candidates.len(), 4);
    assert_eq!(view.candidates[3].name, "Dave");
    assert_eq!(view.candidates[3].id, 3);
    assert_eq!(view.error, None);
}

#[tokio::test]
async fn test_blank_candidate_name_sends_nothing() {
    let mut session = session_for(FakeVoting::new(owner(), &NAMES), owner()).await;

    assert!(session.add_candidate("   ").await.is_none());
    assert_eq!(session.view().error.as_deref(), Some("Candidate name cannot be empty"));
    assert_eq!(session.contract().sent.load(Ordering::SeqCst), 0);
    assert!(!session.view().loading);
}

#[tokio::test]
async fn test_vote_once() {
    let mut session = session_for(FakeVoting::new(voter(), &NAMES), voter()).await;

    assert!(session.vote(1).await.is_some());
    assert_eq!(session.view().candidates[1].vote_count, "1");
    assert_eq!(session.view().error, None);

    assert!(session.vote(0).await.is_none());
    assert_eq!(session.view().error.as_deref(), Some("You have already voted"));
    assert_eq!(session.view().candidates[0].vote_count, "0");
    assert!(!session.view().loading);
}

#[tokio::test]
async fn test_vote_invalid_candidate() {
    let mut session = session_for(FakeVoting::new(voter(), &NAMES), voter()).await;

    assert!(session.vote(7).await.is_none());
    assert_eq!(session.view().error.as_deref(), Some("Invalid candidate selected"));
}

#[tokio::test]
async fn test_vote_after_window() {
    let mut session = session_for(FakeVoting::new(voter(), &NAMES).ended(), voter()).await;

    assert!(session.vote(0).await.is_none());
    assert_eq!(session.view().error.as_deref(), Some("Voting period has ended"));
}

#[tokio::test]
async fn test_successful_action_clears_error() {
    let mut session = session_for(FakeVoting::new(voter(), &NAMES), voter()).await;

    session.vote(9).await;
    assert!(session.view().error.is_some());

    session.vote(0).await;
    assert_eq!(session.view().error, None);
    assert_eq!(session.view().candidates[0].vote_count, "1");
}

#[tokio::test]
async fn test_failed_load_does_not_block_others() {
    let contract = FakeVoting::new(owner(), &NAMES);
    contract.fail_candidates.store(true, Ordering::SeqCst);
    let session = session_for(contract, owner()).await;

    let view = session.view();
    assert_eq!(view.error.as_deref(), Some("Failed to load candidates"));
    assert!(view.candidates.is_empty());
    assert!(view.is_owner);
    assert_eq!(view.voting_end, NOW + 3_725);
    assert!(!view.loading);
}

#[tokio::test]
async fn test_owner_check_failure() {
    let contract = FakeVoting::new(owner(), &NAMES);
    contract.fail_owner.store(true, Ordering::SeqCst);
    let session = session_for(contract, owner()).await;

    assert_eq!(session.view().error.as_deref(), Some("Failed to verify ownership"));
    assert!(!session.view().is_owner);
    assert_eq!(session.view().candidates.len(), 3);
}

#[tokio::test]
async fn test_reload_candidates() {
    let mut session = session_for(FakeVoting::new(voter(), &NAMES), voter()).await;

    session.contract().fail_candidates.store(true, Ordering::SeqCst);
    session.load_candidates().await;
    assert_eq!(session.view().error.as_deref(), Some("Failed to load candidates"));
    // The last good list stays on screen.
    assert_eq!(session.view().candidates.len(), 3);
}

#[tokio::test]
async fn test_period_failure_is_reported() {
    let contract = FakeVoting::new(voter(), &NAMES);
    contract.fail_period.store(true, Ordering::SeqCst);
    let mut session = session_for(contract, voter()).await;

    assert_eq!(session.view().error.as_deref(), Some("Failed to load voting period"));
    assert!(!session.period_loaded());
    assert_eq!(session.view().voting_end, 0);
    assert_eq!(session.view().candidates.len(), 3);

    session.contract().fail_period.store(false, Ordering::SeqCst);
    session.load_voting_period().await;
    assert!(session.period_loaded());
    assert_eq!(session.view().voting_end, NOW + 3_725);
}

#[tokio::test]
async fn test_period_loaded_after_initialize() {
    let session = session_for(FakeVoting::new(voter(), &NAMES), voter()).await;
    assert!(session.period_loaded());
}

#[tokio::test]
async fn test_confirmed_write_clears_error_when_reload_fails() {
    let mut session = session_for(FakeVoting::new(voter(), &NAMES), voter()).await;
    session.vote(9).await;
    assert!(session.view().error.is_some());

    session.contract().fail_candidates.store(true, Ordering::SeqCst);
    let outcome = session.vote(0).await;

    assert!(outcome.is_some());
    assert_eq!(session.view().error, None);
    assert!(!session.view().loading);
    // The list shown is the one from before the vote.
    assert_eq!(session.view().candidates[0].vote_count, "0");
}
