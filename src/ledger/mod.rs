//! Transaction validation and batch commit against a UTXO pool.

pub mod processor;
pub mod validator;

pub use processor::{BatchOutcome, BatchProcessor, Rejection};
pub use validator::TransactionValidator;

use secp256k1::PublicKey;

/// Signature oracle: does `signature` authorize `message` for `owner`?
pub trait SignatureVerifier: Send + Sync {
    fn verify(&self, owner: &PublicKey, message: &[u8], signature: &[u8]) -> bool;
}

impl<F> SignatureVerifier for F
where
    F: Fn(&PublicKey, &[u8], &[u8]) -> bool + Send + Sync,
{
    fn verify(&self, owner: &PublicKey, message: &[u8], signature: &[u8]) -> bool {
        self(owner, message, signature)
    }
}
