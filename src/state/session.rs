use std::sync::Arc;

use alloy_primitives::Address;

use crate::chain::NftContract;
use crate::seaport::{address_lower, OrderProtocol};

/// The active wallet connection and the capability handles bound to it.
/// Held as `Option<Session>` by the controller, so the connected state
/// is all-or-none by construction: there is no partially built session.
#[derive(Clone)]
pub struct Session {
    pub address: Address,
    pub chain_id: u64,
    pub seaport: Arc<dyn OrderProtocol>,
    pub nft: Arc<dyn NftContract>,
}

impl Session {
    /// Lower-cased hex form used in backend payloads and display.
    pub fn address_display(&self) -> String {
        address_lower(&self.address)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("address", &self.address)
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}
