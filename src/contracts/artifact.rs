//! Compiled contract artifacts and the factory that deploys them.
//!
//! Artifacts follow the Hardhat layout:
//! `<artifacts_dir>/contracts/<Name>.sol/<Name>.json`, holding
//! `contractName`, `abi` and the creation `bytecode`.

use alloy::dyn_abi::{DynSolType, DynSolValue};
use alloy::json_abi::JsonAbi;
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::blockchain::transaction::TxMonitor;
use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::blockchain::wallet::SignerHandle;
use crate::observability::metrics;

/// Hardhat compile output for one contract.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
}

impl Artifact {
    /// Location of `name`'s artifact below `artifacts_dir`.
    pub fn path_for(artifacts_dir: &Path, name: &str) -> PathBuf {
        artifacts_dir
            .join("contracts")
            .join(format!("{}.sol", name))
            .join(format!("{}.json", name))
    }

    /// Read and parse an artifact file.
    pub fn load(path: &Path) -> BlockchainResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            BlockchainError::Artifact(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Parse artifact JSON.
    pub fn from_json(json: &str) -> BlockchainResult<Self> {
        let artifact: Artifact = serde_json::from_str(json)
            .map_err(|e| BlockchainError::Artifact(format!("malformed artifact: {}", e)))?;

        if artifact.bytecode.is_empty() {
            return Err(BlockchainError::Artifact(format!(
                "{} has no creation bytecode (abstract contract or interface?)",
                artifact.contract_name
            )));
        }
        Ok(artifact)
    }

    /// Solidity types of the constructor parameters, in order.
    pub fn constructor_types(&self) -> BlockchainResult<Vec<DynSolType>> {
        let Some(constructor) = self.abi.constructor() else {
            return Ok(Vec::new());
        };
        constructor
            .inputs
            .iter()
            .map(|param| {
                DynSolType::parse(&param.selector_type()).map_err(|e| {
                    BlockchainError::Artifact(format!("constructor type '{}': {}", param.ty, e))
                })
            })
            .collect()
    }
}

/// Deploys new instances of one compiled contract.
#[derive(Debug, Clone)]
pub struct ContractFactory {
    artifact: Artifact,
}

impl ContractFactory {
    /// Create a factory from a parsed artifact.
    pub fn new(artifact: Artifact) -> Self {
        Self { artifact }
    }

    /// Load the artifact for `name` from `artifacts_dir`.
    pub fn from_artifacts_dir(artifacts_dir: &Path, name: &str) -> BlockchainResult<Self> {
        let artifact = Artifact::load(&Artifact::path_for(artifacts_dir, name))?;
        if artifact.contract_name != name {
            tracing::warn!(
                expected = name,
                found = %artifact.contract_name,
                "Artifact contract name differs from requested name"
            );
        }
        Ok(Self::new(artifact))
    }

    /// Creation code followed by the ABI-encoded constructor arguments.
    ///
    /// Arguments are checked against the artifact's constructor signature.
    pub fn deploy_code(&self, args: &[DynSolValue]) -> BlockchainResult<Bytes> {
        let types = self.artifact.constructor_types()?;
        if types.len() != args.len() {
            return Err(BlockchainError::Artifact(format!(
                "{} constructor takes {} arguments, got {}",
                self.artifact.contract_name,
                types.len(),
                args.len()
            )));
        }
        for (i, (ty, arg)) in types.iter().zip(args).enumerate() {
            if !ty.matches(arg) {
                return Err(BlockchainError::Artifact(format!(
                    "{} constructor argument {} is not a {}",
                    self.artifact.contract_name,
                    i,
                    ty.sol_type_name()
                )));
            }
        }

        let mut code = self.artifact.bytecode.to_vec();
        if !args.is_empty() {
            code.extend(DynSolValue::Tuple(args.to_vec()).abi_encode_params());
        }
        Ok(code.into())
    }

    /// Submit a creation transaction and return the new contract's address.
    pub async fn deploy(&self, handle: &SignerHandle, args: &[DynSolValue]) -> BlockchainResult<Address> {
        let code = self.deploy_code(args)?;
        let monitor = TxMonitor::new(handle.client().clone());
        monitor.ensure_gas_price().await?;

        let tx = TransactionRequest::default()
            .with_from(handle.account())
            .with_deploy_code(code);

        let pending = handle.provider().send_transaction(tx).await.map_err(|e| {
            metrics::record_transaction("deploy", "rejected");
            BlockchainError::from(e)
        })?;
        let tx_hash = *pending.tx_hash();
        tracing::info!(contract = %self.artifact.contract_name, tx_hash = %tx_hash, "Creation transaction sent");

        monitor.wait_for_confirmation(tx_hash, "deploy").await?.into_block()?;

        let receipt = handle
            .client()
            .get_transaction_receipt(tx_hash)
            .await?
            .ok_or_else(|| BlockchainError::Rpc(format!("receipt for {} disappeared", tx_hash)))?;

        receipt.contract_address.ok_or_else(|| {
            BlockchainError::Reverted(format!("{} created no contract", tx_hash))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;

    const VOTING_ARTIFACT: &str = r#"{
        "_format": "hh-sol-artifact-1",
        "contractName": "Voting",
        "sourceName": "contracts/Voting.sol",
        "abi": [
            {
                "type": "constructor",
                "stateMutability": "nonpayable",
                "inputs": [
                    { "name": "_candidateNames", "type": "string[]", "internalType": "string[]" },
                    { "name": "_durationInMinutes", "type": "uint256", "internalType": "uint256" }
                ]
            }
        ],
        "bytecode": "0x6080604052",
        "deployedBytecode": "0x6080"
    }"#;

    fn names(list: &[&str]) -> DynSolValue {
        DynSolValue::Array(list.iter().map(|n| DynSolValue::String(n.to_string())).collect())
    }

    #[test]
    fn test_path_layout() {
        let path = Artifact::path_for(Path::new("artifacts"), "Voting");
        assert_eq!(path, Path::new("artifacts/contracts/Voting.sol/Voting.json"));
    }

    #[test]
    fn test_parse_artifact() {
        let artifact = Artifact::from_json(VOTING_ARTIFACT).unwrap();
        assert_eq!(artifact.contract_name, "Voting");
        assert_eq!(artifact.bytecode.len(), 5);
        assert_eq!(artifact.constructor_types().unwrap().len(), 2);
    }

    #[test]
    fn test_reject_empty_bytecode() {
        let json = VOTING_ARTIFACT.replace("\"0x6080604052\"", "\"0x\"");
        let err = Artifact::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("no creation bytecode"));
    }

    #[test]
    fn test_deploy_code_appends_args() {
        let factory = ContractFactory::new(Artifact::from_json(VOTING_ARTIFACT).unwrap());
        let args = [names(&["Alice", "Bob"]), DynSolValue::Uint(U256::from(525_600u64), 256)];

        let code = factory.deploy_code(&args).unwrap();
        assert!(code.starts_with(&[0x60, 0x80, 0x60, 0x40, 0x52]));
        let encoded = &code[5..];
        assert_eq!(encoded.len() % 32, 0);
        // Head: offset of the dynamic array, then the duration word.
        assert_eq!(U256::from_be_slice(&encoded[0..32]), U256::from(64u64));
        assert_eq!(U256::from_be_slice(&encoded[32..64]), U256::from(525_600u64));
        // Array length.
        assert_eq!(U256::from_be_slice(&encoded[64..96]), U256::from(2u64));
    }

    #[test]
    fn test_deploy_code_checks_signature() {
        let factory = ContractFactory::new(Artifact::from_json(VOTING_ARTIFACT).unwrap());

        let err = factory.deploy_code(&[names(&["Alice"])]).unwrap_err();
        assert!(err.to_string().contains("takes 2 arguments"));

        let swapped = [DynSolValue::Uint(U256::from(1u64), 256), names(&["Alice"])];
        let err = factory.deploy_code(&swapped).unwrap_err();
        assert!(err.to_string().contains("argument 0"));
    }
}
