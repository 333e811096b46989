use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::error::MarketError;
use crate::seaport::SignedOrder;

/// Records revealed per batch.
pub const BATCH_SIZE: usize = 12;

/// One NFT's market state as the backend reports it. Replaced wholesale
/// on refresh, never mutated in place.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingRecord {
    pub tokenid: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub seller_address: Option<String>,
    #[serde(default)]
    pub seaport_order: Option<Value>,
    #[serde(default, rename = "seaportOrderJSON")]
    pub seaport_order_json: Option<String>,
    #[serde(default, alias = "orderHash")]
    pub order_hash: Option<String>,
}

impl ListingRecord {
    /// Extract the signed order from either the structured field or the
    /// serialized JSON fallback. Absent or empty payloads are
    /// `EmptyOrder`; present but unreadable ones are fulfillment
    /// failures.
    pub fn order_payload(&self) -> Result<SignedOrder, MarketError> {
        let value = match (&self.seaport_order, &self.seaport_order_json) {
            (Some(value), _) if !value.is_null() => value.clone(),
            (_, Some(text)) if !text.trim().is_empty() => {
                serde_json::from_str(text).map_err(|_| MarketError::EmptyOrder)?
            }
            _ => return Err(MarketError::EmptyOrder),
        };
        match &value {
            Value::Object(fields) if fields.is_empty() => return Err(MarketError::EmptyOrder),
            Value::Object(_) => {}
            _ => return Err(MarketError::EmptyOrder),
        }
        serde_json::from_value(value)
            .map_err(|e| MarketError::Fulfillment(format!("malformed order payload: {e}")))
    }
}

/// All fetched records plus the cursor for incremental batch reveal.
/// Invariant: `0 <= revealed <= records.len()`.
#[derive(Debug, Default)]
pub struct ListingStore {
    records: Vec<ListingRecord>,
    revealed: usize,
    in_flight: bool,
}

impl ListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the single-flight slot. Returns false if a load is already
    /// in progress; the caller must skip its fetch/reveal entirely.
    pub fn begin_load(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    pub fn finish_load(&mut self) {
        self.in_flight = false;
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// True when no backing records are held and a fetch is required.
    pub fn needs_fetch(&self) -> bool {
        self.records.is_empty()
    }

    pub fn fill(&mut self, records: Vec<ListingRecord>) {
        self.records = records;
        self.revealed = 0;
    }

    /// Advance the cursor by up to one batch and return the newly
    /// revealed slice. An exhausted cursor yields an empty batch.
    pub fn reveal_next(&mut self) -> Vec<ListingRecord> {
        let end = (self.revealed + BATCH_SIZE).min(self.records.len());
        let batch = self.records[self.revealed..end].to_vec();
        self.revealed = end;
        batch
    }

    pub fn revealed_records(&self) -> &[ListingRecord] {
        &self.records[..self.revealed]
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.revealed >= self.records.len()
    }

    pub fn find_revealed(&self, token_id: u64) -> Option<&ListingRecord> {
        self.revealed_records()
            .iter()
            .find(|record| record.tokenid == token_id)
    }

    /// Drop everything so the next reveal re-fetches from the backend.
    /// Called after any successful buy or list action.
    pub fn invalidate(&mut self) {
        self.records.clear();
        self.revealed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: u64) -> Vec<ListingRecord> {
        (1..=n)
            .map(|tokenid| ListingRecord {
                tokenid,
                name: None,
                image: None,
                price: None,
                seller_address: None,
                seaport_order: None,
                seaport_order_json: None,
                order_hash: None,
            })
            .collect()
    }

    #[test]
    fn test_reveal_progression_20_records() {
        let mut store = ListingStore::new();
        store.fill(records(20));

        let first = store.reveal_next();
        assert_eq!(first.len(), 12);
        assert_eq!(store.revealed(), 12);

        let second = store.reveal_next();
        assert_eq!(second.len(), 8);
        assert_eq!(store.revealed(), 20);

        let third = store.reveal_next();
        assert!(third.is_empty());
        assert_eq!(store.revealed(), 20);
        assert!(store.is_exhausted());
    }

    #[test]
    fn test_revealed_never_exceeds_len() {
        let mut store = ListingStore::new();
        store.fill(records(5));
        for _ in 0..10 {
            store.reveal_next();
            assert!(store.revealed() <= store.len());
        }
        assert_eq!(store.revealed(), 5);
    }

    #[test]
    fn test_single_flight_flag() {
        let mut store = ListingStore::new();
        assert!(store.begin_load());
        assert!(!store.begin_load());
        assert!(store.is_loading());
        store.finish_load();
        assert!(store.begin_load());
    }

    #[test]
    fn test_invalidate_resets_cursor() {
        let mut store = ListingStore::new();
        store.fill(records(20));
        store.reveal_next();
        store.invalidate();
        assert_eq!(store.revealed(), 0);
        assert_eq!(store.len(), 0);
        assert!(store.needs_fetch());
    }

    #[test]
    fn test_find_only_sees_revealed() {
        let mut store = ListingStore::new();
        store.fill(records(20));
        store.reveal_next();
        assert!(store.find_revealed(12).is_some());
        assert!(store.find_revealed(13).is_none());
    }

    #[test]
    fn test_order_payload_absent_is_empty() {
        let record = &records(1)[0];
        assert!(matches!(record.order_payload(), Err(MarketError::EmptyOrder)));
    }

    #[test]
    fn test_order_payload_empty_object_is_empty() {
        let mut record = records(1).remove(0);
        record.seaport_order = Some(serde_json::json!({}));
        assert!(matches!(record.order_payload(), Err(MarketError::EmptyOrder)));

        record.seaport_order = None;
        record.seaport_order_json = Some("{}".to_string());
        assert!(matches!(record.order_payload(), Err(MarketError::EmptyOrder)));
    }

    #[test]
    fn test_order_payload_reads_json_string_field() {
        use crate::seaport::{
            to_transport_json, ConsiderationItem, OfferItem, OrderParameters, OrderRequest,
            ITEM_TYPE_ERC721, ITEM_TYPE_NATIVE, ORDER_TYPE_FULL_OPEN,
        };
        use alloy_primitives::{Address, Bytes, B256, U256};

        let request = OrderRequest {
            offerer: Address::repeat_byte(0x11),
            zone: Address::ZERO,
            offer: vec![OfferItem {
                item_type: ITEM_TYPE_ERC721,
                token: Address::repeat_byte(0x22),
                identifier_or_criteria: U256::from(1u8),
                start_amount: U256::from(1u8),
                end_amount: U256::from(1u8),
            }],
            consideration: vec![ConsiderationItem {
                item_type: ITEM_TYPE_NATIVE,
                token: Address::ZERO,
                identifier_or_criteria: U256::ZERO,
                start_amount: U256::from(10u8),
                end_amount: U256::from(10u8),
                recipient: Address::repeat_byte(0x11),
            }],
            order_type: ORDER_TYPE_FULL_OPEN,
            start_time: U256::ZERO,
            end_time: U256::from(1u8),
            zone_hash: B256::ZERO,
            salt: U256::ZERO,
            conduit_key: B256::ZERO,
        };
        let order = SignedOrder {
            parameters: OrderParameters::from_request(&request, U256::ZERO),
            signature: Bytes::from(vec![0x01; 65]),
            order_hash: None,
        };

        let mut record = records(1).remove(0);
        record.seaport_order_json =
            Some(to_transport_json(&order).unwrap().to_string());

        assert_eq!(record.order_payload().unwrap(), order);
    }

    #[test]
    fn test_record_deserializes_backend_shape() {
        let record: ListingRecord = serde_json::from_str(
            r#"{
                "tokenid": 7,
                "name": "Bear #7",
                "image": "ipfs://QmHash/7.png",
                "price": "1.5",
                "orderHash": "0xabc"
            }"#,
        )
        .unwrap();
        assert_eq!(record.tokenid, 7);
        assert_eq!(record.price, Some(rust_decimal_macros::dec!(1.5)));
        assert_eq!(record.order_hash.as_deref(), Some("0xabc"));
    }
}
