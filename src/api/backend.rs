//! The marketplace backend REST surface. The chain is canonical; this
//! service is the discovery cache the listings are fetched from and the
//! place completed actions are reported to.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::ListingRecord;

/// Body of `POST /api/buy`, sent after a confirmed on-chain fulfillment.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseReport {
    pub tokenid: u64,
    pub nft_contract: String,
    pub marketplace_contract: String,
    pub buyer_address: String,
    pub seaport_order: Value,
    pub order_hash: Option<String>,
    pub on_chain: bool,
}

/// Body of `POST /api/order`, submitted once an order is signed.
#[derive(Debug, Clone, Serialize)]
pub struct ListingSubmission {
    pub tokenid: u64,
    pub price: String,
    pub nft_contract: String,
    pub marketplace_contract: String,
    pub seller_address: String,
    pub buyer_address: Option<String>,
    pub seaport_order: Value,
    pub order_hash: String,
    pub on_chain: bool,
    pub createdat: String,
    pub updatedat: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendAck {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[async_trait]
pub trait Backend: Send + Sync {
    async fn fetch_listings(&self) -> Result<Vec<ListingRecord>>;

    async fn report_purchase(&self, report: &PurchaseReport) -> Result<BackendAck>;

    async fn submit_listing(&self, submission: &ListingSubmission) -> Result<BackendAck>;
}

#[derive(Debug, Deserialize)]
struct NftsResponse {
    #[serde(default)]
    nfts: Vec<ListingRecord>,
}

pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn fetch_listings(&self) -> Result<Vec<ListingRecord>> {
        let url = format!("{}/api/nfts", self.base_url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("listing fetch returned {}", response.status()));
        }
        let body: NftsResponse = response.json().await?;
        Ok(body.nfts)
    }

    async fn report_purchase(&self, report: &PurchaseReport) -> Result<BackendAck> {
        let url = format!("{}/api/buy", self.base_url);
        let response = self.client.post(&url).json(report).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("buy report returned {}", response.status()));
        }
        // The buy flow does not depend on the response body.
        Ok(response.json().await.unwrap_or(BackendAck {
            success: true,
            error: None,
        }))
    }

    async fn submit_listing(&self, submission: &ListingSubmission) -> Result<BackendAck> {
        let url = format!("{}/api/order", self.base_url);
        let response = self.client.post(&url).json(submission).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("order submission returned {}", response.status()));
        }
        Ok(response.json().await?)
    }
}
