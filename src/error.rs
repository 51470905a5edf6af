use thiserror::Error;

use crate::transaction::{Amount, OutPoint};

/// Why a transaction cannot be committed against a given pool.
///
/// Inside the ledger every variant collapses to "invalid, excluded from this
/// batch"; the detail is only carried for logging and API responses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TxError {
    #[error("referenced UTXO not found: {0}")]
    NotFound(OutPoint),

    #[error("signature verification failed for input {index}")]
    VerificationFailure { index: usize },

    #[error("UTXO {0} claimed more than once in the same transaction")]
    DoubleSpend(OutPoint),

    #[error("output {index} has negative amount {amount}")]
    NegativeOutput { index: usize, amount: Amount },

    #[error("inputs total {inputs} is less than outputs total {outputs}")]
    InsufficientInput { inputs: i128, outputs: i128 },

    #[error("malformed transaction: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("invalid key: {0}")]
    Key(#[from] secp256k1::Error),

    #[error("expected {expected} signing keys, got {got}")]
    KeyCount { expected: usize, got: usize },

    #[error("no signing payload for input {index}")]
    MissingPayload { index: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidVar { name: &'static str, value: String },

    #[error("cannot read genesis file: {0}")]
    GenesisIo(#[from] std::io::Error),

    #[error("cannot parse genesis file: {0}")]
    GenesisFormat(#[from] serde_json::Error),

    #[error("genesis entry {0} has a negative amount")]
    NegativeGenesisAmount(OutPoint),
}
