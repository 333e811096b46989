//! Seaport order shapes as they travel between backend, signer, and chain.
//! Field names follow the protocol's JSON convention (camelCase).

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

use crate::seaport::serial::u256_decimal;

/// Native-currency payment item.
pub const ITEM_TYPE_NATIVE: u8 = 0;
/// ERC-721 offer item.
pub const ITEM_TYPE_ERC721: u8 = 2;
/// Full open order: anyone may fulfill, no partial fills.
pub const ORDER_TYPE_FULL_OPEN: u8 = 0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferItem {
    pub item_type: u8,
    pub token: Address,
    #[serde(with = "u256_decimal")]
    pub identifier_or_criteria: U256,
    #[serde(with = "u256_decimal")]
    pub start_amount: U256,
    #[serde(with = "u256_decimal")]
    pub end_amount: U256,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsiderationItem {
    pub item_type: u8,
    pub token: Address,
    #[serde(with = "u256_decimal")]
    pub identifier_or_criteria: U256,
    #[serde(with = "u256_decimal")]
    pub start_amount: U256,
    #[serde(with = "u256_decimal")]
    pub end_amount: U256,
    pub recipient: Address,
}

/// What the List workflow hands to the protocol client for signing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub offerer: Address,
    pub zone: Address,
    pub offer: Vec<OfferItem>,
    pub consideration: Vec<ConsiderationItem>,
    pub order_type: u8,
    #[serde(with = "u256_decimal")]
    pub start_time: U256,
    #[serde(with = "u256_decimal")]
    pub end_time: U256,
    pub zone_hash: B256,
    #[serde(with = "u256_decimal")]
    pub salt: U256,
    pub conduit_key: B256,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderParameters {
    pub offerer: Address,
    pub zone: Address,
    pub offer: Vec<OfferItem>,
    pub consideration: Vec<ConsiderationItem>,
    pub order_type: u8,
    #[serde(with = "u256_decimal")]
    pub start_time: U256,
    #[serde(with = "u256_decimal")]
    pub end_time: U256,
    pub zone_hash: B256,
    #[serde(with = "u256_decimal")]
    pub salt: U256,
    pub conduit_key: B256,
    pub total_original_consideration_items: u64,
    #[serde(with = "u256_decimal")]
    pub counter: U256,
}

impl OrderParameters {
    pub fn from_request(request: &OrderRequest, counter: U256) -> Self {
        Self {
            offerer: request.offerer,
            zone: request.zone,
            offer: request.offer.clone(),
            consideration: request.consideration.clone(),
            order_type: request.order_type,
            start_time: request.start_time,
            end_time: request.end_time,
            zone_hash: request.zone_hash,
            salt: request.salt,
            conduit_key: request.conduit_key,
            total_original_consideration_items: request.consideration.len() as u64,
            counter,
        }
    }

    /// Total native payment a fulfiller must attach.
    pub fn native_payment(&self) -> U256 {
        self.consideration
            .iter()
            .filter(|item| item.item_type == ITEM_TYPE_NATIVE)
            .fold(U256::ZERO, |sum, item| sum + item.start_amount)
    }
}

/// A signed order as stored by the backend and submitted for fulfillment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedOrder {
    pub parameters: OrderParameters,
    pub signature: Bytes,
    #[serde(default, alias = "hash", skip_serializing_if = "Option::is_none")]
    pub order_hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seaport::serial::to_transport_json;

    fn sample_request() -> OrderRequest {
        OrderRequest {
            offerer: Address::repeat_byte(0x11),
            zone: Address::ZERO,
            offer: vec![OfferItem {
                item_type: ITEM_TYPE_ERC721,
                token: Address::repeat_byte(0x22),
                identifier_or_criteria: U256::from(5u8),
                start_amount: U256::from(1u8),
                end_amount: U256::from(1u8),
            }],
            consideration: vec![ConsiderationItem {
                item_type: ITEM_TYPE_NATIVE,
                token: Address::ZERO,
                identifier_or_criteria: U256::ZERO,
                start_amount: U256::from(1_500_000_000_000_000_000u64),
                end_amount: U256::from(1_500_000_000_000_000_000u64),
                recipient: Address::repeat_byte(0x11),
            }],
            order_type: ORDER_TYPE_FULL_OPEN,
            start_time: U256::from(1_700_000_000u64),
            end_time: U256::from(1_702_592_000u64),
            zone_hash: B256::ZERO,
            salt: U256::from(42u8),
            conduit_key: B256::ZERO,
        }
    }

    #[test]
    fn test_parameters_from_request() {
        let request = sample_request();
        let parameters = OrderParameters::from_request(&request, U256::from(3u8));
        assert_eq!(parameters.total_original_consideration_items, 1);
        assert_eq!(parameters.counter, U256::from(3u8));
        assert_eq!(parameters.offer, request.offer);
    }

    #[test]
    fn test_native_payment_sums_only_native_items() {
        let request = sample_request();
        let mut parameters = OrderParameters::from_request(&request, U256::ZERO);
        parameters.consideration.push(ConsiderationItem {
            item_type: ITEM_TYPE_ERC721,
            token: Address::repeat_byte(0x22),
            identifier_or_criteria: U256::from(9u8),
            start_amount: U256::from(1u8),
            end_amount: U256::from(1u8),
            recipient: Address::repeat_byte(0x33),
        });
        assert_eq!(
            parameters.native_payment(),
            U256::from(1_500_000_000_000_000_000u64)
        );
    }

    #[test]
    fn test_wire_shape_uses_camel_case_and_decimal_strings() {
        let request = sample_request();
        let order = SignedOrder {
            parameters: OrderParameters::from_request(&request, U256::ZERO),
            signature: Bytes::from(vec![0xab; 65]),
            order_hash: None,
        };
        let json = to_transport_json(&order).unwrap();
        let parameters = &json["parameters"];
        assert_eq!(parameters["offer"][0]["identifierOrCriteria"], "5");
        assert_eq!(
            parameters["consideration"][0]["startAmount"],
            "1500000000000000000"
        );
        assert_eq!(parameters["orderType"], 0);
        assert_eq!(parameters["totalOriginalConsiderationItems"], 1);
        // absent hash is omitted, not null
        assert!(json.get("orderHash").is_none());

        let back: SignedOrder = serde_json::from_value(json).unwrap();
        assert_eq!(back, order);
    }

    #[test]
    fn test_order_hash_alias() {
        let request = sample_request();
        let order = SignedOrder {
            parameters: OrderParameters::from_request(&request, U256::ZERO),
            signature: Bytes::from(vec![0x01]),
            order_hash: Some("0xdead".to_string()),
        };
        let mut json = to_transport_json(&order).unwrap();
        let hash = json.as_object_mut().unwrap().remove("orderHash").unwrap();
        json.as_object_mut().unwrap().insert("hash".to_string(), hash);
        let back: SignedOrder = serde_json::from_value(json).unwrap();
        assert_eq!(back.order_hash.as_deref(), Some("0xdead"));
    }
}
