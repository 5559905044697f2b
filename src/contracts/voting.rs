//! The Voting contract surface consumed by the session.
//!
//! [`VotingContract`] is the seam between view state and the chain:
//! [`OnchainVoting`] talks JSON-RPC through a [`SignerHandle`], tests plug
//! in an in-memory double.

use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::DynProvider;
use std::future::Future;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::transaction::TxMonitor;
use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::blockchain::wallet::SignerHandle;
use crate::contracts::bindings::Voting;
use crate::observability::metrics;

/// A candidate as stored by the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub vote_count: U256,
}

/// A write that made it into a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxOutcome {
    pub tx_hash: TxHash,
    pub block_number: u64,
}

/// Read and write surface of a deployed Voting contract.
pub trait VotingContract: Send + Sync {
    /// Start of the voting window (unix seconds).
    fn voting_start(&self) -> impl Future<Output = BlockchainResult<u64>> + Send;

    /// End of the voting window (unix seconds).
    fn voting_end(&self) -> impl Future<Output = BlockchainResult<u64>> + Send;

    /// All candidates, in index order.
    fn get_candidates(&self) -> impl Future<Output = BlockchainResult<Vec<Candidate>>> + Send;

    /// Contract owner.
    fn owner(&self) -> impl Future<Output = BlockchainResult<Address>> + Send;

    /// Register a candidate. Owner only; enforced by the contract.
    fn add_candidate(&self, name: &str) -> impl Future<Output = BlockchainResult<TxOutcome>> + Send;

    /// Vote for the candidate at `index`. One vote per account, inside the window.
    fn vote(&self, index: u64) -> impl Future<Output = BlockchainResult<TxOutcome>> + Send;
}

/// Parse and check a contract address.
///
/// Mixed-case input must carry a valid EIP-55 checksum; all-lowercase or
/// all-uppercase hex is accepted as is.
pub fn parse_contract_address(input: &str) -> BlockchainResult<Address> {
    let input = input.trim();
    let hex = input.strip_prefix("0x").unwrap_or(input);
    let invalid = || BlockchainError::InvalidAddress("Invalid contract address".to_string());

    let has_lower = hex.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex.chars().any(|c| c.is_ascii_uppercase());

    if has_lower && has_upper {
        Address::parse_checksummed(format!("0x{}", hex), None).map_err(|_| invalid())
    } else {
        hex.parse::<Address>().map_err(|_| invalid())
    }
}

fn to_timestamp(value: U256) -> BlockchainResult<u64> {
    u64::try_from(value)
        .map_err(|_| BlockchainError::Contract(format!("timestamp {} out of range", value)))
}

/// [`VotingContract`] backed by a deployed contract.
#[derive(Debug, Clone)]
pub struct OnchainVoting {
    instance: Voting::VotingInstance<DynProvider>,
    monitor: TxMonitor,
}

impl OnchainVoting {
    /// Bind to the contract at `address` through the connected account.
    pub fn new(address: Address, handle: &SignerHandle) -> Self {
        Self::from_parts(address, handle.provider().clone(), handle.client().clone())
    }

    /// Bind through an explicit signing provider and read client.
    pub fn from_parts(address: Address, provider: DynProvider, client: BlockchainClient) -> Self {
        Self {
            instance: Voting::new(address, provider),
            monitor: TxMonitor::new(client),
        }
    }

    /// Address of the bound contract.
    pub fn address(&self) -> Address {
        *self.instance.address()
    }

    async fn confirm(&self, tx_hash: TxHash, kind: &'static str) -> BlockchainResult<TxOutcome> {
        tracing::info!(tx_hash = %tx_hash, kind, "Transaction sent");
        let block_number = self.monitor.wait_for_confirmation(tx_hash, kind).await?.into_block()?;
        Ok(TxOutcome { tx_hash, block_number })
    }
}

fn rejected(kind: &'static str, e: alloy::contract::Error) -> BlockchainError {
    metrics::record_transaction(kind, "rejected");
    tracing::debug!(kind, error = %e, "Transaction rejected");
    BlockchainError::from(e)
}

impl VotingContract for OnchainVoting {
    async fn voting_start(&self) -> BlockchainResult<u64> {
        to_timestamp(self.instance.votingStart().call().await?)
    }

    async fn voting_end(&self) -> BlockchainResult<u64> {
        to_timestamp(self.instance.votingEnd().call().await?)
    }

    async fn get_candidates(&self) -> BlockchainResult<Vec<Candidate>> {
        let candidates = self.instance.getCandidates().call().await?;
        Ok(candidates
            .into_iter()
            .map(|c| Candidate {
                name: c.name,
                vote_count: c.voteCount,
            })
            .collect())
    }

    async fn owner(&self) -> BlockchainResult<Address> {
        Ok(self.instance.owner().call().await?)
    }

    async fn add_candidate(&self, name: &str) -> BlockchainResult<TxOutcome> {
        self.monitor.ensure_gas_price().await?;
        let pending = self
            .instance
            .addCandidate(name.to_string())
            .send()
            .await
            .map_err(|e| rejected("add_candidate", e))?;
        self.confirm(*pending.tx_hash(), "add_candidate").await
    }

    async fn vote(&self, index: u64) -> BlockchainResult<TxOutcome> {
        self.monitor.ensure_gas_price().await?;
        let pending = self
            .instance
            .vote(U256::from(index))
            .send()
            .await
            .map_err(|e| rejected("vote", e))?;
        self.confirm(*pending.tx_hash(), "vote").await
    }
}
