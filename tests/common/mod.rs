//! Shared utilities for session integration tests.

use alloy::primitives::{Address, TxHash, U256};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use voting_dapp::blockchain::{BlockchainError, BlockchainResult};
use voting_dapp::contracts::{Candidate, TxOutcome, VotingContract};

pub const NOW: u64 = 1_700_000_000;

pub fn owner() -> Address {
    Address::repeat_byte(0x11)
}

pub fn voter() -> Address {
    Address::repeat_byte(0x22)
}

struct Ledger {
    candidates: Vec<Candidate>,
    voters: HashSet<Address>,
    block: u64,
}

/// In-memory stand-in for a deployed Voting contract, called by one account.
///
/// Rejections carry the revert strings a node would report.
pub struct FakeVoting {
    caller: Address,
    owner: Address,
    start: u64,
    end: u64,
    now: u64,
    ledger: Mutex<Ledger>,
    pub fail_candidates: AtomicBool,
    pub fail_owner: AtomicBool,
    pub fail_period: AtomicBool,
    pub sent: AtomicU32,
}

impl FakeVoting {
    pub fn new(caller: Address, names: &[&str]) -> Self {
        Self {
            caller,
            owner: owner(),
            start: NOW - 600,
            end: NOW + 3_725,
            now: NOW,
            ledger: Mutex::new(Ledger {
                candidates: names
                    .iter()
                    .map(|n| Candidate { name: n.to_string(), vote_count: U256::ZERO })
                    .collect(),
                voters: HashSet::new(),
                block: 100,
            }),
            fail_candidates: AtomicBool::new(false),
            fail_owner: AtomicBool::new(false),
            fail_period: AtomicBool::new(false),
            sent: AtomicU32::new(0),
        }
    }

    /// Same contract, observed after the window closed.
    pub fn ended(mut self) -> Self {
        self.now = self.end + 1;
        self
    }

    fn revert(reason: &str) -> BlockchainError {
        BlockchainError::Contract(format!(
            "server returned an error response: error code 3: execution reverted: {}",
            reason
        ))
    }

    fn mine(&self, ledger: &mut Ledger) -> TxOutcome {
        let n = self.sent.fetch_add(1, Ordering::SeqCst);
        ledger.block += 1;
        TxOutcome {
            tx_hash: TxHash::with_last_byte(n as u8 + 1),
            block_number: ledger.block,
        }
    }
}

impl VotingContract for FakeVoting {
    async fn voting_start(&self) -> BlockchainResult<u64> {
        Ok(self.start)
    }

    async fn voting_end(&self) -> BlockchainResult<u64> {
        if self.fail_period.load(Ordering::SeqCst) {
            return Err(BlockchainError::Contract("execution reverted".to_string()));
        }
        Ok(self.end)
    }

    async fn get_candidates(&self) -> BlockchainResult<Vec<Candidate>> {
        if self.fail_candidates.load(Ordering::SeqCst) {
            return Err(BlockchainError::Rpc("All RPC providers failed (eth_call)".to_string()));
        }
        Ok(self.ledger.lock().unwrap().candidates.clone())
    }

    async fn owner(&self) -> BlockchainResult<Address> {
        if self.fail_owner.load(Ordering::SeqCst) {
            return Err(BlockchainError::Timeout(10));
        }
        Ok(self.owner)
    }

    async fn add_candidate(&self, name: &str) -> BlockchainResult<TxOutcome> {
        if self.caller != self.owner {
            return Err(Self::revert("Only owner can add candidates"));
        }
        let mut ledger = self.ledger.lock().unwrap();
        ledger.candidates.push(Candidate { name: name.to_string(), vote_count: U256::ZERO });
        Ok(self.mine(&mut ledger))
    }

    async fn vote(&self, index: u64) -> BlockchainResult<TxOutcome> {
        if self.now < self.start || self.now > self.end {
            return Err(Self::revert("Voting period is not active"));
        }
        let mut ledger = self.ledger.lock().unwrap();
        if ledger.voters.contains(&self.caller) {
            return Err(Self::revert("You have already voted"));
        }
        let Some(candidate) = ledger.candidates.get_mut(index as usize) else {
            return Err(Self::revert("Invalid candidate index"));
        };
        candidate.vote_count += U256::from(1u64);
        ledger.voters.insert(self.caller);
        Ok(self.mine(&mut ledger))
    }
}
