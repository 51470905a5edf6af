//! Batch validation and commit of UTXO transactions.
//!
//! [`ledger::BatchProcessor`] owns a [`transaction::UtxoPool`] and commits the
//! largest mutually-consistent subset of a batch into it, checking each
//! candidate with [`ledger::TransactionValidator`].

pub mod config;
pub mod error;
pub mod ledger;
pub mod transaction;
pub mod wallet;

pub use error::{ConfigError, TxError, WalletError};
pub use ledger::{BatchOutcome, BatchProcessor, Rejection, SignatureVerifier, TransactionValidator};
pub use transaction::{Amount, OutPoint, Transaction, TxHash, TxInput, TxOutput, UtxoEntry, UtxoPool};
