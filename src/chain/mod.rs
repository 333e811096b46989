mod nft;
mod wallet;

pub use nft::{Erc721Client, NftContract};
pub use wallet::{ChainParams, NativeCurrency, RpcWallet, WalletProvider};
