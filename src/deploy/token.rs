//! FollowToken deployment.

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::utils::{parse_units, ParseUnits};
use alloy::primitives::{Address, U256};
use std::path::Path;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::blockchain::wallet::SignerHandle;
use crate::contracts::bindings::FollowToken;
use crate::contracts::ContractFactory;

pub const CONTRACT_NAME: &str = "FollowToken";

/// Result of a FollowToken deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDeployment {
    pub address: Address,
    pub initial_supply: U256,
    /// Symbol read back from the new contract, if the read succeeded.
    pub symbol: Option<String>,
}

/// Scale a whole-token amount by `decimals` (e.g. `"100000"`, 18).
///
/// Negative amounts are rejected; the constructor takes a `uint256`.
pub fn parse_supply(amount: &str, decimals: u8) -> BlockchainResult<U256> {
    let invalid = |reason: String| {
        BlockchainError::Artifact(format!("invalid initial supply '{}': {}", amount, reason))
    };

    match parse_units(amount.trim(), decimals).map_err(|e| invalid(e.to_string()))? {
        ParseUnits::U256(value) => Ok(value),
        ParseUnits::I256(value) if value.is_negative() => Err(invalid("must not be negative".to_string())),
        ParseUnits::I256(value) => Ok(value.into_raw()),
    }
}

/// Deploy FollowToken with `initial_supply` minted to the deployer.
pub async fn deploy_follow_token(
    handle: &SignerHandle,
    artifacts_dir: &Path,
    initial_supply: U256,
) -> BlockchainResult<TokenDeployment> {
    let factory = ContractFactory::from_artifacts_dir(artifacts_dir, CONTRACT_NAME)?;
    tracing::info!(
        account = %handle.account(),
        initial_supply = %initial_supply,
        "Deploying FollowToken"
    );

    let address = factory
        .deploy(handle, &[DynSolValue::Uint(initial_supply, 256)])
        .await?;

    let token = FollowToken::new(address, handle.provider().clone());
    let symbol = match token.symbol().call().await {
        Ok(symbol) => Some(symbol),
        Err(e) => {
            tracing::warn!(error = %e, "Deployed token did not answer symbol()");
            None
        }
    };
    match token.balanceOf(handle.account()).call().await {
        Ok(balance) => tracing::info!(balance = %balance, "Deployer token balance"),
        Err(e) => tracing::warn!(error = %e, "Deployed token did not answer balanceOf()"),
    }

    Ok(TokenDeployment {
        address,
        initial_supply,
        symbol,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supply() {
        let expected = U256::from(100_000u64) * U256::from(10u64).pow(U256::from(18u64));
        assert_eq!(parse_supply("100000", 18).unwrap(), expected);
        assert_eq!(parse_supply("1.5", 2).unwrap(), U256::from(150u64));
    }

    #[test]
    fn test_parse_supply_rejects_garbage() {
        assert!(parse_supply("lots", 18).is_err());
    }

    #[test]
    fn test_parse_supply_rejects_negative() {
        let err = parse_supply("-5", 18).unwrap_err();
        assert!(matches!(err, BlockchainError::Artifact(_)));
        assert!(err.to_string().contains("must not be negative"));

        assert!(parse_supply(" -0.5 ", 2).is_err());
    }
}
