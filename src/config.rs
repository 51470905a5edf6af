use std::env;
use std::fs;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::transaction::{UtxoEntry, UtxoPool};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_BATCH_SIZE: usize = 1000;

/// Service settings, read from the environment (and `.env`, if present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Largest batch the API will hand to the ledger.
    pub max_batch_size: usize,
    /// JSON array of `{ outpoint, output }` seeding the pool at startup.
    pub genesis_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(v) => v
                .parse()
                .map_err(|_| ConfigError::InvalidVar { name: "PORT", value: v })?,
            None => DEFAULT_PORT,
        };

        let max_batch_size = match lookup("MAX_BATCH_SIZE") {
            Some(v) => match v.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidVar {
                        name: "MAX_BATCH_SIZE",
                        value: v,
                    });
                }
            },
            None => DEFAULT_MAX_BATCH_SIZE,
        };

        let genesis_path = lookup("GENESIS_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            max_batch_size,
            genesis_path,
        })
    }

    /// Initial pool: the genesis file if configured, otherwise empty.
    pub fn load_genesis(&self) -> Result<UtxoPool, ConfigError> {
        match &self.genesis_path {
            Some(path) => parse_genesis(&fs::read_to_string(path)?),
            None => Ok(UtxoPool::new()),
        }
    }
}

pub fn parse_genesis(json: &str) -> Result<UtxoPool, ConfigError> {
    let entries: Vec<UtxoEntry> = serde_json::from_str(json)?;
    if let Some(bad) = entries.iter().find(|e| e.output.amount < 0) {
        return Err(ConfigError::NegativeGenesisAmount(bad.outpoint));
    }
    Ok(UtxoPool::from_entries(entries))
}
