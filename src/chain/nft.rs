//! ERC-721 reads and the marketplace approval write.

use alloy::providers::DynProvider;
use alloy::sol;
use alloy_primitives::{Address, U256};
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

sol! {
    #[sol(rpc)]
    interface IERC721 {
        function ownerOf(uint256 tokenId) external view returns (address owner);
        function isApprovedForAll(address owner, address operator) external view returns (bool approved);
        function setApprovalForAll(address operator, bool approved) external;
    }
}

#[async_trait]
pub trait NftContract: Send + Sync {
    async fn owner_of(&self, token_id: u64) -> Result<Address>;

    async fn is_approved_for_all(&self, owner: Address, operator: Address) -> Result<bool>;

    /// State-changing; waits for the approval tx to land before returning.
    async fn set_approval_for_all(&self, operator: Address, approved: bool) -> Result<()>;
}

/// The collection contract over RPC. Writes require the provider to be
/// wallet-filled; reads work on any provider.
pub struct Erc721Client {
    contract: IERC721::IERC721Instance<DynProvider>,
}

impl Erc721Client {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self {
            contract: IERC721::new(address, provider),
        }
    }

    pub fn address(&self) -> Address {
        *self.contract.address()
    }
}

#[async_trait]
impl NftContract for Erc721Client {
    async fn owner_of(&self, token_id: u64) -> Result<Address> {
        let owner = self.contract.ownerOf(U256::from(token_id)).call().await?;
        Ok(owner)
    }

    async fn is_approved_for_all(&self, owner: Address, operator: Address) -> Result<bool> {
        let approved = self
            .contract
            .isApprovedForAll(owner, operator)
            .call()
            .await?;
        Ok(approved)
    }

    async fn set_approval_for_all(&self, operator: Address, approved: bool) -> Result<()> {
        let pending = self
            .contract
            .setApprovalForAll(operator, approved)
            .send()
            .await?;
        let tx_hash = pending.watch().await?;
        info!(%tx_hash, %operator, approved, "approval confirmed");
        Ok(())
    }
}
