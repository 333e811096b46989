//! The order-protocol client boundary. Workflows only see the
//! [`OrderProtocol`] trait and the [`Execution`] result shape; the
//! Seaport-against-RPC implementation lives behind it.

use alloy::providers::DynProvider;
use alloy::signers::local::PrivateKeySigner;
use alloy_primitives::{hex::encode_prefixed, Address, B256, U256};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures_util::future::BoxFuture;
use tracing::debug;

use crate::seaport::abi::ISeaport;
use crate::seaport::sign;
use crate::seaport::types::{OrderRequest, SignedOrder};

/// A protocol call either yields its value outright or hands back an
/// executor that still has work to do (transactions to mine, signatures
/// to collect). `resolve` normalizes both shapes before workflow logic
/// touches the value.
pub enum Execution<T> {
    Immediate(T),
    Deferred(BoxFuture<'static, Result<T>>),
}

impl<T> Execution<T> {
    pub async fn resolve(self) -> Result<T> {
        match self {
            Execution::Immediate(value) => Ok(value),
            Execution::Deferred(executor) => executor.await,
        }
    }
}

#[async_trait]
pub trait OrderProtocol: Send + Sync {
    /// Build and sign a listing order from the request.
    async fn create_order(&self, request: &OrderRequest) -> Result<Execution<SignedOrder>>;

    /// Fulfill a signed order on behalf of `account`. Resolving the
    /// execution awaits on-chain confirmation and yields the tx hash.
    async fn fulfill_order(&self, order: &SignedOrder, account: Address)
        -> Result<Execution<B256>>;
}

/// Seaport client bound to one marketplace contract.
pub struct RpcSeaport {
    signer: Option<PrivateKeySigner>,
    chain_id: u64,
    contract: ISeaport::ISeaportInstance<DynProvider>,
}

impl RpcSeaport {
    pub fn new(
        signer: Option<PrivateKeySigner>,
        marketplace: Address,
        chain_id: u64,
        provider: DynProvider,
    ) -> Self {
        Self {
            signer,
            chain_id,
            contract: ISeaport::new(marketplace, provider),
        }
    }

    pub fn marketplace(&self) -> Address {
        *self.contract.address()
    }
}

#[async_trait]
impl OrderProtocol for RpcSeaport {
    async fn create_order(&self, request: &OrderRequest) -> Result<Execution<SignedOrder>> {
        let signer = self
            .signer
            .as_ref()
            .ok_or_else(|| anyhow!("no signing capability"))?;

        let counter: U256 = self.contract.getCounter(request.offerer).call().await?;
        let components = sign::to_components(request, counter);
        let domain = sign::seaport_domain(self.chain_id, self.marketplace());
        let signature = sign::sign_components(signer, &components, &domain)?;
        let hash = sign::order_hash(&components);
        debug!(order_hash = %encode_prefixed(hash.as_slice()), "order signed");

        Ok(Execution::Immediate(SignedOrder {
            parameters: crate::seaport::types::OrderParameters::from_request(request, counter),
            signature,
            order_hash: Some(encode_prefixed(hash.as_slice())),
        }))
    }

    async fn fulfill_order(
        &self,
        order: &SignedOrder,
        account: Address,
    ) -> Result<Execution<B256>> {
        let abi_order = sign::to_abi_order(order);
        let value = order.parameters.native_payment();
        let contract = self.contract.clone();

        Ok(Execution::Deferred(Box::pin(async move {
            let pending = contract
                .fulfillOrder(abi_order, B256::ZERO)
                .value(value)
                .from(account)
                .send()
                .await?;
            let tx_hash = pending.watch().await?;
            Ok(tx_hash)
        })))
    }
}
