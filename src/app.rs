//! The application controller: owns session, listing store and
//! notifications, and runs the buy/list workflows against the
//! collaborator traits. No terminal or network specifics live here,
//! which is what keeps the workflows testable.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, B256, U256};
use anyhow::anyhow;
use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::api::{Backend, ListingSubmission, PurchaseReport};
use crate::chain::{ChainParams, NftContract, WalletProvider};
use crate::config::Config;
use crate::error::MarketError;
use crate::notify::Notifier;
use crate::seaport::{
    address_lower, content_hash, fallback_token, to_transport_json, wei_from_decimal,
    ConsiderationItem, OfferItem, OrderProtocol, OrderRequest, ITEM_TYPE_ERC721,
    ITEM_TYPE_NATIVE, ORDER_TYPE_FULL_OPEN,
};
use crate::state::{ListingRecord, ListingStore, Session};

pub struct App {
    config: Config,
    nft_address: Address,
    marketplace_address: Address,
    wallet: Arc<dyn WalletProvider>,
    nft: Arc<dyn NftContract>,
    seaport: Arc<dyn OrderProtocol>,
    backend: Arc<dyn Backend>,
    session: Option<Session>,
    store: ListingStore,
    notifier: Notifier,
    /// Tokens with an action in flight; the per-control disable guard.
    busy: HashSet<u64>,
}

impl App {
    pub fn new(
        config: Config,
        wallet: Arc<dyn WalletProvider>,
        nft: Arc<dyn NftContract>,
        seaport: Arc<dyn OrderProtocol>,
        backend: Arc<dyn Backend>,
    ) -> anyhow::Result<Self> {
        let nft_address: Address = config
            .contracts
            .nft
            .parse()
            .map_err(|e| anyhow!("invalid nft contract address: {e}"))?;
        let marketplace_address: Address = config
            .contracts
            .marketplace
            .parse()
            .map_err(|e| anyhow!("invalid marketplace contract address: {e}"))?;
        Ok(Self {
            config,
            nft_address,
            marketplace_address,
            wallet,
            nft,
            seaport,
            backend,
            session: None,
            store: ListingStore::new(),
            notifier: Notifier::new(),
            busy: HashSet::new(),
        })
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notifier.current()
    }

    pub fn revealed(&self) -> &[ListingRecord] {
        self.store.revealed_records()
    }

    // =========================================================================
    // WALLET CONNECTOR
    // =========================================================================

    /// Connect the wallet, verify the chain, and load the first batch.
    pub async fn connect(&mut self) -> Result<(), MarketError> {
        let address = self.wallet.request_account().await?;
        let chain_id = self.wallet.chain_id().await?;
        let expected = self.config.chain.chain_id;

        if chain_id != expected {
            let params = ChainParams::from_chain(&self.config.chain);
            return match self.wallet.request_chain(&params).await {
                Ok(()) => {
                    self.notifier.notify("Network added, reconnect to continue.");
                    Err(MarketError::ChainSwitchPending)
                }
                Err(e) => {
                    warn!(error = %e, "chain switch request failed");
                    Err(MarketError::UnsupportedChain {
                        expected,
                        actual: chain_id,
                    })
                }
            };
        }

        self.session = Some(Session {
            address,
            chain_id,
            seaport: self.seaport.clone(),
            nft: self.nft.clone(),
        });
        info!(address = %address_lower(&address), chain_id, "wallet connected");

        if let Err(e) = self.ensure_batch().await {
            warn!(error = %e, "initial listing refresh failed");
        }
        Ok(())
    }

    /// Drop the session and the listing view. No network calls.
    pub fn disconnect(&mut self) {
        self.session = None;
        self.store.invalidate();
        self.busy.clear();
        self.notifier
            .notify_for("Wallet disconnected", Duration::from_millis(2000));
        info!("wallet disconnected");
    }

    // =========================================================================
    // LISTING STORE & PAGING
    // =========================================================================

    /// Fetch the record set if needed and reveal the next batch.
    /// Re-entrant calls while a load is in flight reveal nothing.
    pub async fn ensure_batch(&mut self) -> Result<Vec<ListingRecord>, MarketError> {
        if !self.store.begin_load() {
            return Ok(Vec::new());
        }
        let result = self.fetch_and_reveal().await;
        self.store.finish_load();
        result
    }

    async fn fetch_and_reveal(&mut self) -> Result<Vec<ListingRecord>, MarketError> {
        if self.store.needs_fetch() {
            match self.backend.fetch_listings().await {
                Ok(records) => self.store.fill(records),
                Err(e) => {
                    if self.store.revealed() == 0 {
                        self.notifier.notify("Failed to load listings.");
                    }
                    return Err(MarketError::Fetch(e.to_string()));
                }
            }
        }
        let batch = self.store.reveal_next();
        if batch.is_empty() && self.store.revealed() == 0 {
            self.notifier.notify("No NFTs on this page.");
        }
        Ok(batch)
    }

    async fn refresh_after_action(&mut self) {
        self.store.invalidate();
        if let Err(e) = self.ensure_batch().await {
            warn!(error = %e, "listing refresh after action failed");
        }
    }

    // =========================================================================
    // BUY WORKFLOW
    // =========================================================================

    pub async fn buy(&mut self, token_id: u64) -> Result<(), MarketError> {
        if !self.busy.insert(token_id) {
            self.notifier
                .notify(format!("Token #{token_id} already has an action in flight"));
            return Ok(());
        }
        let result = self.buy_inner(token_id).await;
        self.busy.remove(&token_id);
        if result.is_ok() {
            self.refresh_after_action().await;
        }
        result
    }

    async fn buy_inner(&mut self, token_id: u64) -> Result<(), MarketError> {
        let session = self.session.clone().ok_or(MarketError::NotConnected)?;
        let record = self
            .store
            .find_revealed(token_id)
            .cloned()
            .ok_or(MarketError::UnknownToken(token_id))?;
        let order = record.order_payload()?;

        self.notifier.notify("Preparing purchase...");
        let execution = session
            .seaport
            .fulfill_order(&order, session.address)
            .await
            .map_err(|e| MarketError::Fulfillment(e.to_string()))?;

        self.notifier.notify("Sending transaction...");
        let tx_hash = execution
            .resolve()
            .await
            .map_err(|e| MarketError::Fulfillment(e.to_string()))?;
        info!(%tx_hash, token_id, "purchase confirmed");
        self.notifier.notify("NFT purchased");

        // The chain is canonical from here on; backend sync is best-effort.
        let report = PurchaseReport {
            tokenid: token_id,
            nft_contract: address_lower(&self.nft_address),
            marketplace_contract: address_lower(&self.marketplace_address),
            buyer_address: session.address_display(),
            seaport_order: to_transport_json(&order).unwrap_or(serde_json::Value::Null),
            order_hash: record.order_hash.clone().or_else(|| order.order_hash.clone()),
            on_chain: true,
        };
        match self.backend.report_purchase(&report).await {
            Ok(ack) if !ack.success => {
                let sync = MarketError::BackendSync(ack.error.unwrap_or_else(|| "unknown".into()));
                warn!(error = %sync, token_id, "purchase recorded on-chain only");
            }
            Err(e) => {
                let sync = MarketError::BackendSync(e.to_string());
                warn!(error = %sync, token_id, "purchase recorded on-chain only");
            }
            Ok(_) => {}
        }
        Ok(())
    }

    // =========================================================================
    // LIST WORKFLOW
    // =========================================================================

    pub async fn list(&mut self, token_id: u64, price_input: &str) -> Result<(), MarketError> {
        if !self.busy.insert(token_id) {
            self.notifier
                .notify(format!("Token #{token_id} already has an action in flight"));
            return Ok(());
        }
        let result = self.list_inner(token_id, price_input).await;
        self.busy.remove(&token_id);
        if result.is_ok() {
            self.refresh_after_action().await;
        }
        result
    }

    async fn list_inner(&mut self, token_id: u64, price_input: &str) -> Result<(), MarketError> {
        let session = self.session.clone().ok_or(MarketError::NotConnected)?;

        let trimmed = price_input.trim();
        if trimmed.is_empty() {
            return Err(MarketError::InvalidPrice("empty".into()));
        }
        let price: Decimal = trimmed
            .parse()
            .map_err(|_| MarketError::InvalidPrice(trimmed.to_string()))?;
        let price_wei = wei_from_decimal(&price)
            .map_err(|e| MarketError::InvalidPrice(e.to_string()))?;

        self.notifier.notify("Checking ownership...");
        let owner = session
            .nft
            .owner_of(token_id)
            .await
            .map_err(|e| MarketError::OwnershipCheck(e.to_string()))?;
        if owner != session.address {
            return Err(MarketError::NotOwner { token_id });
        }

        let approved = session
            .nft
            .is_approved_for_all(session.address, self.marketplace_address)
            .await
            .map_err(|e| MarketError::Approval(e.to_string()))?;
        if !approved {
            self.notifier.notify("Sending approval...");
            session
                .nft
                .set_approval_for_all(self.marketplace_address, true)
                .await
                .map_err(|e| MarketError::Approval(e.to_string()))?;
        }

        self.notifier.notify("Creating marketplace order...");
        let request = self.build_order_request(session.address, token_id, price_wei);
        let execution = session
            .seaport
            .create_order(&request)
            .await
            .map_err(|e| MarketError::OrderCreation(e.to_string()))?;
        let signed = execution
            .resolve()
            .await
            .map_err(|e| MarketError::OrderCreation(e.to_string()))?;

        let order_json = to_transport_json(&signed)
            .map_err(|e| MarketError::OrderCreation(e.to_string()))?;
        let order_hash = signed.order_hash.clone().unwrap_or_else(|| {
            match content_hash(&order_json) {
                Ok(hash) => hash,
                Err(e) => {
                    warn!(error = %e, token_id, "order hash derivation degraded to local token");
                    fallback_token()
                }
            }
        });

        let now = Utc::now().to_rfc3339();
        let submission = ListingSubmission {
            tokenid: token_id,
            price: price.normalize().to_string(),
            nft_contract: address_lower(&self.nft_address),
            marketplace_contract: address_lower(&self.marketplace_address),
            seller_address: session.address_display(),
            buyer_address: None,
            seaport_order: order_json,
            order_hash,
            on_chain: false,
            createdat: now.clone(),
            updatedat: now,
        };

        self.notifier.notify("Submitting order to backend...");
        let ack = self
            .backend
            .submit_listing(&submission)
            .await
            .map_err(|e| MarketError::BackendRejected(e.to_string()))?;
        if !ack.success {
            return Err(MarketError::BackendRejected(
                ack.error.unwrap_or_else(|| "unknown".into()),
            ));
        }

        self.notifier
            .notify(format!("NFT #{token_id} listed for {} APE", price.normalize()));
        Ok(())
    }

    /// Single ERC-721 offer against a single native payment, valid for
    /// 30 days, open to any fulfiller.
    fn build_order_request(&self, offerer: Address, token_id: u64, price_wei: U256) -> OrderRequest {
        let start = U256::from(Utc::now().timestamp() as u64);
        let end = start + U256::from(30u64 * 86_400);
        let mut salt_bytes = [0u8; 32];
        rand::thread_rng().fill(&mut salt_bytes);
        OrderRequest {
            offerer,
            zone: Address::ZERO,
            offer: vec![OfferItem {
                item_type: ITEM_TYPE_ERC721,
                token: self.nft_address,
                identifier_or_criteria: U256::from(token_id),
                start_amount: U256::from(1u8),
                end_amount: U256::from(1u8),
            }],
            consideration: vec![ConsiderationItem {
                item_type: ITEM_TYPE_NATIVE,
                token: Address::ZERO,
                identifier_or_criteria: U256::ZERO,
                start_amount: price_wei,
                end_amount: price_wei,
                recipient: offerer,
            }],
            order_type: ORDER_TYPE_FULL_OPEN,
            start_time: start,
            end_time: end,
            zone_hash: B256::ZERO,
            salt: U256::from_be_bytes(salt_bytes),
            conduit_key: B256::ZERO,
        }
    }
}
