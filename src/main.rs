use std::sync::Arc;

use alloy::network::EthereumWallet;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use apemarket_rs::api::HttpBackend;
use apemarket_rs::app::App;
use apemarket_rs::chain::{Erc721Client, RpcWallet};
use apemarket_rs::config::Config;
use apemarket_rs::events::Event;
use apemarket_rs::render;
use apemarket_rs::seaport::RpcSeaport;
use apemarket_rs::state::ListingRecord;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cfg = Config::load("config.toml")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.general.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let signer = cfg.signer()?;
    let rpc_url: reqwest::Url = cfg.chain.rpc_url.parse()?;
    let provider: DynProvider = match signer.clone() {
        Some(signer) => ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(rpc_url)
            .erased(),
        None => ProviderBuilder::new().connect_http(rpc_url).erased(),
    };

    let wallet = Arc::new(RpcWallet::new(signer.clone(), provider.clone()));
    let nft = Arc::new(Erc721Client::new(
        cfg.contracts.nft.parse()?,
        provider.clone(),
    ));
    let seaport = Arc::new(RpcSeaport::new(
        signer,
        cfg.contracts.marketplace.parse()?,
        cfg.chain.chain_id,
        provider,
    ));
    let backend = Arc::new(HttpBackend::new(cfg.backend.base_url.clone()));
    let mut app = App::new(cfg, wallet, nft, seaport, backend)?;

    // Create the event channel
    let (tx, mut rx) = mpsc::channel::<Event>(100);

    // Terminal commands
    let input_tx = tx.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match Event::parse(&line) {
                Some(event) => {
                    if input_tx.send(event).await.is_err() {
                        break;
                    }
                }
                None => print_usage(),
            }
        }
    });

    // Ctrl+C
    let signal_tx = tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = signal_tx.send(Event::Shutdown).await;
        }
    });

    println!("apemarket - ApeChain NFT marketplace");
    print_usage();

    // Main event loop
    while let Some(event) = rx.recv().await {
        match event {
            Event::Connect => match app.connect().await {
                Ok(()) => {
                    if let Some(session) = app.session() {
                        println!(
                            "connected as {}",
                            render::short_address(&session.address_display())
                        );
                    }
                    print_cards(app.revealed());
                }
                Err(e) => println!("connect failed: {e}"),
            },
            Event::Disconnect => {
                app.disconnect();
            }
            Event::LoadMore => match app.ensure_batch().await {
                Ok(batch) => print_cards(&batch),
                Err(e) => println!("load failed: {e}"),
            },
            Event::Buy { token_id } => match app.buy(token_id).await {
                Ok(()) => print_cards(app.revealed()),
                Err(e) => println!("buy failed: {e}"),
            },
            Event::List { token_id, price } => match app.list(token_id, &price).await {
                Ok(()) => print_cards(app.revealed()),
                Err(e) => println!("list failed: {e}"),
            },
            Event::Shutdown => {
                println!("Shutting down...");
                break;
            }
        }

        if let Some(notice) = app.notice() {
            println!("* {notice}");
        }
    }

    Ok(())
}

fn print_usage() {
    println!("commands: connect | disconnect | more | buy <id> | list <id> <price> | quit");
}

fn print_cards(records: &[ListingRecord]) {
    for record in records {
        println!("{}", render::card(record));
    }
}
