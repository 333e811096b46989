use thiserror::Error;

/// Workflow failures surfaced to the user or to logs.
///
/// Collaborator clients (backend, chain, protocol) return `anyhow::Result`
/// at the I/O edge; the controller maps those into this taxonomy.
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("no wallet credentials available")]
    NoWalletProvider,

    #[error("wallet request rejected by user")]
    UserRejected,

    #[error("wrong network: expected chain {expected}, wallet is on {actual}")]
    UnsupportedChain { expected: u64, actual: u64 },

    #[error("network added to wallet, reconnect to continue")]
    ChainSwitchPending,

    #[error("wallet not connected")]
    NotConnected,

    #[error("chain rpc error: {0}")]
    Rpc(String),

    #[error("listing fetch failed: {0}")]
    Fetch(String),

    #[error("token #{0} is not in the current listing")]
    UnknownToken(u64),

    #[error("record has no order payload")]
    EmptyOrder,

    #[error("fulfillment failed: {0}")]
    Fulfillment(String),

    #[error("backend sync failed after on-chain action: {0}")]
    BackendSync(String),

    #[error("token #{token_id} is not owned by the connected wallet")]
    NotOwner { token_id: u64 },

    #[error("ownership check failed: {0}")]
    OwnershipCheck(String),

    #[error("marketplace approval failed: {0}")]
    Approval(String),

    #[error("order creation failed: {0}")]
    OrderCreation(String),

    #[error("invalid price: {0}")]
    InvalidPrice(String),

    #[error("backend rejected the listing: {0}")]
    BackendRejected(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
