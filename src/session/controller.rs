//! Voting session: mirrors contract state and submits writes.
//!
//! # Responsibilities
//! - Load candidates, ownership and the voting window into [`VotingView`]
//! - Submit `addCandidate` / `vote`, wait for inclusion, then re-fetch
//! - Turn failures into the fixed user-facing messages
//!
//! # Design Decisions
//! - A failed load sets its own message and leaves the other loads alone
//! - `loading` is reset after every action, whatever the outcome
//! - Writes are never retried
//! - A confirmed write clears the error even if the reload after it fails

use alloy::primitives::Address;

use crate::blockchain::types::BlockchainResult;
use crate::contracts::{Candidate, TxOutcome, VotingContract};
use crate::observability::metrics;
use crate::session::countdown::{format_time_left, now_unix};
use crate::session::messages;
use crate::session::state::{CandidateView, VotingView};

/// One connected account's view of one Voting contract.
pub struct VotingSession<C> {
    contract: C,
    account: Address,
    view: VotingView,
    period_loaded: bool,
}

impl<C: VotingContract> VotingSession<C> {
    /// Create a session with an empty view.
    pub fn new(contract: C, account: Address) -> Self {
        Self {
            contract,
            account,
            view: VotingView::default(),
            period_loaded: false,
        }
    }

    /// Current view state.
    pub fn view(&self) -> &VotingView {
        &self.view
    }

    /// Connected account.
    pub fn account(&self) -> Address {
        self.account
    }

    /// Whether `voting_start` / `voting_end` hold values read from the contract.
    pub fn period_loaded(&self) -> bool {
        self.period_loaded
    }

    /// Underlying contract.
    pub fn contract(&self) -> &C {
        &self.contract
    }

    /// Load candidates, ownership and the voting period concurrently.
    pub async fn initialize(&mut self) {
        self.view.loading = true;
        let (candidates, owner, period) = tokio::join!(
            self.contract.get_candidates(),
            self.contract.owner(),
            fetch_period(&self.contract),
        );
        self.view.loading = false;

        self.apply_candidates(candidates);
        self.apply_owner(owner);
        self.apply_period(period);
    }

    /// Re-fetch the candidate list.
    pub async fn load_candidates(&mut self) {
        self.view.loading = true;
        let result = self.contract.get_candidates().await;
        self.view.loading = false;
        self.apply_candidates(result);
    }

    /// Compare the contract owner with the connected account.
    pub async fn check_owner(&mut self) {
        let result = self.contract.owner().await;
        self.apply_owner(result);
    }

    /// Load the voting window and compute the time left.
    pub async fn load_voting_period(&mut self) {
        let result = fetch_period(&self.contract).await;
        self.apply_period(result);
    }

    /// Recompute `time_left` against the wall clock.
    pub fn tick(&mut self) -> &str {
        self.tick_at(now_unix())
    }

    /// Recompute `time_left` as of `now`.
    pub fn tick_at(&mut self, now: u64) -> &str {
        self.view.time_left = format_time_left(self.view.voting_end, now);
        &self.view.time_left
    }

    /// Register a new candidate.
    pub async fn add_candidate(&mut self, name: &str) -> Option<TxOutcome> {
        if name.trim().is_empty() {
            self.view.error = Some(messages::EMPTY_CANDIDATE_NAME.to_string());
            return None;
        }

        self.view.loading = true;
        let outcome = match self.contract.add_candidate(name).await {
            Ok(outcome) => {
                self.reload_after_write().await;
                Some(outcome)
            }
            Err(e) => {
                tracing::error!(error = %e, candidate = name, "addCandidate failed");
                metrics::record_session_error("add_candidate");
                self.view.error = Some(messages::add_candidate_failure(&e.to_string()).to_string());
                None
            }
        };
        self.view.loading = false;
        outcome
    }

    /// Cast the connected account's vote for candidate `index`.
    pub async fn vote(&mut self, index: u64) -> Option<TxOutcome> {
        self.view.loading = true;
        let outcome = match self.contract.vote(index).await {
            Ok(outcome) => {
                self.reload_after_write().await;
                Some(outcome)
            }
            Err(e) => {
                tracing::error!(error = %e, index, "vote failed");
                metrics::record_session_error("vote");
                self.view.error = Some(messages::vote_failure(&e.to_string()).to_string());
                None
            }
        };
        self.view.loading = false;
        outcome
    }

    /// Re-fetch candidates after a confirmed write, then clear the error.
    ///
    /// The write went through, so a failed reload is logged and not shown.
    async fn reload_after_write(&mut self) {
        let result = self.contract.get_candidates().await;
        self.apply_candidates(result);
        self.view.error = None;
    }

    fn apply_candidates(&mut self, result: BlockchainResult<Vec<Candidate>>) {
        match result {
            Ok(candidates) => {
                tracing::debug!(count = candidates.len(), "Candidates loaded");
                self.view.candidates = CandidateView::from_candidates(candidates);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load candidates");
                metrics::record_session_error("load_candidates");
                self.view.error = Some(messages::LOAD_CANDIDATES_FAILED.to_string());
            }
        }
    }

    fn apply_owner(&mut self, result: BlockchainResult<Address>) {
        match result {
            Ok(owner) => self.view.is_owner = owner == self.account,
            Err(e) => {
                tracing::error!(error = %e, "Failed to verify ownership");
                metrics::record_session_error("check_owner");
                self.view.error = Some(messages::VERIFY_OWNER_FAILED.to_string());
            }
        }
    }

    fn apply_period(&mut self, result: BlockchainResult<(u64, u64)>) {
        match result {
            Ok((start, end)) => {
                self.view.voting_start = start;
                self.view.voting_end = end;
                self.period_loaded = true;
                self.tick();
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load voting period");
                metrics::record_session_error("load_voting_period");
                self.view.error = Some(messages::LOAD_PERIOD_FAILED.to_string());
            }
        }
    }
}

async fn fetch_period<C: VotingContract>(contract: &C) -> BlockchainResult<(u64, u64)> {
    let start = contract.voting_start().await?;
    let end = contract.voting_end().await?;
    Ok((start, end))
}
