//! Turns listing records into terminal cards. Pure string work; the
//! event loop decides when cards are printed.

use std::fmt;

use crate::state::ListingRecord;

pub const IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";
pub const PLACEHOLDER_IMAGE: &str = "https://ipfs.io/ipfs/QmExampleNFTImage/default.png";

/// View model for one listed NFT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub token_id: u64,
    pub name: String,
    pub image_url: String,
    pub price_line: String,
}

/// Rewrite content-addressed URIs to the gateway form. Anything absent
/// or empty falls back to the placeholder; actual load failures are the
/// viewer's problem, not an error here.
pub fn normalize_image_uri(uri: Option<&str>) -> String {
    match uri {
        Some(uri) if !uri.trim().is_empty() => match uri.strip_prefix("ipfs://") {
            Some(path) => format!("{IPFS_GATEWAY}{path}"),
            None => uri.to_string(),
        },
        _ => PLACEHOLDER_IMAGE.to_string(),
    }
}

/// `0x1234…abcd` form for the connected banner.
pub fn short_address(address: &str) -> String {
    if address.len() <= 10 {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

pub fn card(record: &ListingRecord) -> Card {
    let name = record
        .name
        .clone()
        .unwrap_or_else(|| format!("Bear #{}", record.tokenid));
    let price_line = match &record.price {
        Some(price) => format!("{} APE", price.normalize()),
        None => "-".to_string(),
    };
    Card {
        token_id: record.tokenid,
        name,
        image_url: normalize_image_uri(record.image.as_deref()),
        price_line,
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#{:<6} {}", self.token_id, self.name)?;
        writeln!(f, "        image: {}", self.image_url)?;
        write!(f, "        price: {}", self.price_line)
    }
}
