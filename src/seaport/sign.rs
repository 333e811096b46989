//! EIP-712 signing and hashing for Seaport orders, plus the conversions
//! between wire types and the on-chain struct tree.

use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;
use alloy::sol_types::{eip712_domain, Eip712Domain, SolStruct};
use alloy_primitives::{Address, Bytes, B256, U256};
use anyhow::Result;

use crate::seaport::abi;
use crate::seaport::types::{ConsiderationItem, OfferItem, OrderRequest, SignedOrder};

/// Domain the marketplace contract verifies signatures against.
pub fn seaport_domain(chain_id: u64, verifying_contract: Address) -> Eip712Domain {
    eip712_domain! {
        name: "Seaport",
        version: "1.6",
        chain_id: chain_id,
        verifying_contract: verifying_contract,
    }
}

/// Protocol order hash: the EIP-712 struct hash of the components.
pub fn order_hash(components: &abi::OrderComponents) -> B256 {
    components.eip712_hash_struct()
}

pub fn sign_components(
    signer: &PrivateKeySigner,
    components: &abi::OrderComponents,
    domain: &Eip712Domain,
) -> Result<Bytes> {
    let signature = signer.sign_typed_data_sync(components, domain)?;
    Ok(Bytes::from(signature.as_bytes().to_vec()))
}

pub fn to_components(request: &OrderRequest, counter: U256) -> abi::OrderComponents {
    abi::OrderComponents {
        offerer: request.offerer,
        zone: request.zone,
        offer: request.offer.iter().map(to_abi_offer).collect(),
        consideration: request
            .consideration
            .iter()
            .map(to_abi_consideration)
            .collect(),
        orderType: request.order_type,
        startTime: request.start_time,
        endTime: request.end_time,
        zoneHash: request.zone_hash,
        salt: request.salt,
        conduitKey: request.conduit_key,
        counter,
    }
}

/// Shape a signed wire order into the calldata struct `fulfillOrder` takes.
pub fn to_abi_order(order: &SignedOrder) -> abi::Order {
    let parameters = &order.parameters;
    abi::Order {
        parameters: abi::OrderParameters {
            offerer: parameters.offerer,
            zone: parameters.zone,
            offer: parameters.offer.iter().map(to_abi_offer).collect(),
            consideration: parameters
                .consideration
                .iter()
                .map(to_abi_consideration)
                .collect(),
            orderType: parameters.order_type,
            startTime: parameters.start_time,
            endTime: parameters.end_time,
            zoneHash: parameters.zone_hash,
            salt: parameters.salt,
            conduitKey: parameters.conduit_key,
            totalOriginalConsiderationItems: U256::from(
                parameters.total_original_consideration_items,
            ),
        },
        signature: order.signature.clone(),
    }
}

fn to_abi_offer(item: &OfferItem) -> abi::OfferItem {
    abi::OfferItem {
        itemType: item.item_type,
        token: item.token,
        identifierOrCriteria: item.identifier_or_criteria,
        startAmount: item.start_amount,
        endAmount: item.end_amount,
    }
}

fn to_abi_consideration(item: &ConsiderationItem) -> abi::ConsiderationItem {
    abi::ConsiderationItem {
        itemType: item.item_type,
        token: item.token,
        identifierOrCriteria: item.identifier_or_criteria,
        startAmount: item.start_amount,
        endAmount: item.end_amount,
        recipient: item.recipient,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seaport::types::{ITEM_TYPE_ERC721, ITEM_TYPE_NATIVE, ORDER_TYPE_FULL_OPEN};

    fn request_with_salt(salt: u64) -> OrderRequest {
        OrderRequest {
            offerer: Address::repeat_byte(0x11),
            zone: Address::ZERO,
            offer: vec![OfferItem {
                item_type: ITEM_TYPE_ERC721,
                token: Address::repeat_byte(0x22),
                identifier_or_criteria: U256::from(7u8),
                start_amount: U256::from(1u8),
                end_amount: U256::from(1u8),
            }],
            consideration: vec![ConsiderationItem {
                item_type: ITEM_TYPE_NATIVE,
                token: Address::ZERO,
                identifier_or_criteria: U256::ZERO,
                start_amount: U256::from(1_000_000u64),
                end_amount: U256::from(1_000_000u64),
                recipient: Address::repeat_byte(0x11),
            }],
            order_type: ORDER_TYPE_FULL_OPEN,
            start_time: U256::from(1_700_000_000u64),
            end_time: U256::from(1_702_592_000u64),
            zone_hash: B256::ZERO,
            salt: U256::from(salt),
            conduit_key: B256::ZERO,
        }
    }

    #[test]
    fn test_components_carry_request_fields() {
        let request = request_with_salt(1);
        let components = to_components(&request, U256::from(4u8));
        assert_eq!(components.offerer, request.offerer);
        assert_eq!(components.offer.len(), 1);
        assert_eq!(components.offer[0].identifierOrCriteria, U256::from(7u8));
        assert_eq!(components.counter, U256::from(4u8));
    }

    #[test]
    fn test_order_hash_is_deterministic_and_salt_sensitive() {
        let a = order_hash(&to_components(&request_with_salt(1), U256::ZERO));
        let a_again = order_hash(&to_components(&request_with_salt(1), U256::ZERO));
        let b = order_hash(&to_components(&request_with_salt(2), U256::ZERO));
        assert_eq!(a, a_again);
        assert_ne!(a, b);
    }

    #[test]
    fn test_counter_changes_the_hash() {
        let request = request_with_salt(1);
        let zero = order_hash(&to_components(&request, U256::ZERO));
        let one = order_hash(&to_components(&request, U256::from(1u8)));
        assert_ne!(zero, one);
    }

    #[test]
    fn test_signature_is_65_bytes() {
        let signer = PrivateKeySigner::random();
        let components = to_components(&request_with_salt(1), U256::ZERO);
        let domain = seaport_domain(33139, Address::repeat_byte(0x99));
        let signature = sign_components(&signer, &components, &domain).unwrap();
        assert_eq!(signature.len(), 65);
    }
}
