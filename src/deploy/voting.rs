//! Voting contract deployment.

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, U256};
use std::path::Path;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::blockchain::wallet::SignerHandle;
use crate::contracts::ContractFactory;

pub const CONTRACT_NAME: &str = "Voting";

/// Result of a Voting deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VotingDeployment {
    pub address: Address,
    pub candidates: Vec<String>,
    pub duration_minutes: u64,
}

/// Constructor arguments: `(string[] candidateNames, uint256 durationInMinutes)`.
pub fn constructor_args(candidates: &[String], duration_minutes: u64) -> BlockchainResult<Vec<DynSolValue>> {
    if let Some(i) = candidates.iter().position(|c| c.trim().is_empty()) {
        return Err(BlockchainError::Artifact(format!("candidate {} has an empty name", i)));
    }
    if duration_minutes == 0 {
        return Err(BlockchainError::Artifact("voting duration must be at least one minute".to_string()));
    }

    Ok(vec![
        DynSolValue::Array(candidates.iter().cloned().map(DynSolValue::String).collect()),
        DynSolValue::Uint(U256::from(duration_minutes), 256),
    ])
}

/// Deploy Voting with an initial candidate list and window length.
pub async fn deploy_voting(
    handle: &SignerHandle,
    artifacts_dir: &Path,
    candidates: &[String],
    duration_minutes: u64,
) -> BlockchainResult<VotingDeployment> {
    let args = constructor_args(candidates, duration_minutes)?;
    let factory = ContractFactory::from_artifacts_dir(artifacts_dir, CONTRACT_NAME)?;
    tracing::info!(
        account = %handle.account(),
        candidates = candidates.len(),
        duration_minutes,
        "Deploying Voting"
    );

    let address = factory.deploy(handle, &args).await?;

    Ok(VotingDeployment {
        address,
        candidates: candidates.to_vec(),
        duration_minutes,
    })
}
