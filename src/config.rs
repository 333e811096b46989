use alloy::signers::local::PrivateKeySigner;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;

/// Environment variable consulted when `[credentials]` has no key.
pub const PRIVATE_KEY_ENV: &str = "APEMARKET_PRIVATE_KEY";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub chain: ChainConfig,
    pub contracts: ContractsConfig,
    pub credentials: Credentials,
    pub general: General,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    pub chain_id: u64,
    pub name: String,
    pub rpc_url: String,
    pub explorer_url: String,
    pub currency_name: String,
    pub currency_symbol: String,
    pub currency_decimals: u8,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContractsConfig {
    pub nft: String,
    pub marketplace: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub private_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct General {
    pub log_level: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "https://kamoaze10.onrender.com".to_string(),
        }
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: 33139,
            name: "ApeChain Mainnet".to_string(),
            rpc_url: "https://rpc.apechain.com".to_string(),
            explorer_url: "https://apescan.io".to_string(),
            currency_name: "APE".to_string(),
            currency_symbol: "APE".to_string(),
            currency_decimals: 18,
        }
    }
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            nft: "0x54a88333F6e7540eA982261301309048aC431eD5".to_string(),
            marketplace: "0x0000000000000068F116a894984e2DB1123eB395".to_string(),
        }
    }
}

impl Default for General {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load from a TOML file, falling back to built-in defaults when the
    /// file is absent. A missing private key is not an error here; it
    /// becomes the `NoWalletProvider` condition at connect time.
    pub fn load(path: &str) -> Result<Self> {
        let mut config: Config = match fs::read_to_string(path) {
            Ok(contents) => {
                toml::from_str(&contents).with_context(|| format!("failed to parse {path}"))?
            }
            Err(_) => Config::default(),
        };
        if config.credentials.private_key.is_none() {
            config.credentials.private_key = std::env::var(PRIVATE_KEY_ENV).ok();
        }
        Ok(config)
    }

    /// Parse the configured private key, if any.
    pub fn signer(&self) -> Result<Option<PrivateKeySigner>> {
        self.credentials
            .private_key
            .as_deref()
            .map(|key| {
                key.parse::<PrivateKeySigner>()
                    .map_err(|e| anyhow!("invalid private key: {e}"))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_file_missing() {
        let config = Config::load("definitely-not-a-config.toml").unwrap();
        assert_eq!(config.chain.chain_id, 33139);
        assert_eq!(config.backend.base_url, "https://kamoaze10.onrender.com");
        assert_eq!(config.chain.currency_symbol, "APE");
        assert_eq!(config.chain.currency_decimals, 18);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [backend]
            base_url = "http://localhost:3000"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.base_url, "http://localhost:3000");
        assert_eq!(config.chain.chain_id, 33139);
        assert_eq!(
            config.contracts.marketplace,
            "0x0000000000000068F116a894984e2DB1123eB395"
        );
    }

    #[test]
    fn test_no_key_means_no_signer() {
        let config = Config::default();
        assert!(config.signer().unwrap().is_none());
    }

    #[test]
    fn test_bad_key_is_an_error() {
        let mut config = Config::default();
        config.credentials.private_key = Some("not-a-key".to_string());
        assert!(config.signer().is_err());
    }
}
