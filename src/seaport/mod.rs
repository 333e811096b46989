pub mod abi;
mod client;
mod serial;
mod sign;
mod types;

pub use client::{Execution, OrderProtocol, RpcSeaport};
pub use serial::{
    address_lower, content_hash, fallback_token, to_transport_json, u256_decimal,
    wei_from_decimal,
};
pub use sign::{order_hash, seaport_domain, sign_components, to_components};
pub use types::{
    ConsiderationItem, OfferItem, OrderParameters, OrderRequest, SignedOrder, ITEM_TYPE_ERC721,
    ITEM_TYPE_NATIVE, ORDER_TYPE_FULL_OPEN,
};
