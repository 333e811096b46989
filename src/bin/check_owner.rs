use alloy::providers::{Provider, ProviderBuilder};
use anyhow::{Context, Result};

use apemarket_rs::chain::{Erc721Client, NftContract};
use apemarket_rs::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let token_id: u64 = std::env::args()
        .nth(1)
        .context("usage: check_owner <token-id>")?
        .parse()?;

    let cfg = Config::load("config.toml")?;
    let provider = ProviderBuilder::new()
        .connect_http(cfg.chain.rpc_url.parse()?)
        .erased();
    let nft = Erc721Client::new(cfg.contracts.nft.parse()?, provider);

    let owner = nft.owner_of(token_id).await?;
    println!("token #{token_id} owner: {owner}");

    Ok(())
}
