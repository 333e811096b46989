//! The injected-wallet boundary: account access, chain identification,
//! and the add-chain request. The concrete provider is a local signer
//! over JSON-RPC; tests substitute their own implementations.

use std::borrow::Cow;

use alloy::providers::{DynProvider, Provider};
use alloy::signers::local::PrivateKeySigner;
use alloy_primitives::Address;
use async_trait::async_trait;
use serde::Serialize;

use crate::config::ChainConfig;
use crate::error::MarketError;

/// Parameters of a `wallet_addEthereumChain` request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainParams {
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl ChainParams {
    pub fn from_chain(chain: &ChainConfig) -> Self {
        Self {
            chain_id: format!("0x{:x}", chain.chain_id),
            chain_name: chain.name.clone(),
            native_currency: NativeCurrency {
                name: chain.currency_name.clone(),
                symbol: chain.currency_symbol.clone(),
                decimals: chain.currency_decimals,
            },
            rpc_urls: vec![chain.rpc_url.clone()],
            block_explorer_urls: vec![chain.explorer_url.clone()],
        }
    }
}

#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// The account the wallet is willing to expose.
    async fn request_account(&self) -> Result<Address, MarketError>;

    /// Chain the wallet is currently on.
    async fn chain_id(&self) -> Result<u64, MarketError>;

    /// Ask the wallet to add/switch to the given chain.
    async fn request_chain(&self, params: &ChainParams) -> Result<(), MarketError>;
}

/// Wallet backed by a configured private key and an RPC endpoint.
pub struct RpcWallet {
    signer: Option<PrivateKeySigner>,
    provider: DynProvider,
}

impl RpcWallet {
    pub fn new(signer: Option<PrivateKeySigner>, provider: DynProvider) -> Self {
        Self { signer, provider }
    }
}

#[async_trait]
impl WalletProvider for RpcWallet {
    async fn request_account(&self) -> Result<Address, MarketError> {
        match &self.signer {
            Some(signer) => Ok(signer.address()),
            None => Err(MarketError::NoWalletProvider),
        }
    }

    async fn chain_id(&self) -> Result<u64, MarketError> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| MarketError::Rpc(e.to_string()))
    }

    async fn request_chain(&self, params: &ChainParams) -> Result<(), MarketError> {
        // Plain RPC nodes rarely implement this wallet method; a
        // rejection here reads as "switch unavailable" to the caller.
        let _ack: serde_json::Value = self
            .provider
            .raw_request(Cow::Borrowed("wallet_addEthereumChain"), (params.clone(),))
            .await
            .map_err(|e| MarketError::Rpc(e.to_string()))?;
        Ok(())
    }
}
