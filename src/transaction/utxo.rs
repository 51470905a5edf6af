use secp256k1::PublicKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::model::{Transaction, TxHash, TxOutput};
use crate::error::TxError;

/// Identifies a specific transaction output by its txid and index.
///
/// Held by value everywhere. Ordering is byte-wise over `txid`, then `vout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OutPoint {
    #[serde(with = "hex::serde")]
    pub txid: TxHash,
    pub vout: u32,
}

impl OutPoint {
    pub fn new(txid: TxHash, vout: u32) -> Self {
        Self { txid, vout }
    }
}

impl fmt::Display for OutPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", hex::encode(self.txid), self.vout)
    }
}

/// One pool entry, as listed by the API and read from a genesis file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtxoEntry {
    pub outpoint: OutPoint,
    pub output: TxOutput,
}

/// The set of spendable outputs at a point in time.
///
/// Cloning yields an independent pool; nothing is shared with the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtxoPool {
    map: HashMap<OutPoint, TxOutput>,
}

impl UtxoPool {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Build a pool from seed entries. Later duplicates overwrite earlier ones.
    pub fn from_entries(entries: impl IntoIterator<Item = UtxoEntry>) -> Self {
        Self {
            map: entries
                .into_iter()
                .map(|e| (e.outpoint, e.output))
                .collect(),
        }
    }

    /// Insert a single output into the pool, replacing any previous mapping.
    pub fn insert(&mut self, outpoint: OutPoint, output: TxOutput) {
        self.map.insert(outpoint, output);
    }

    /// Spend (remove) a single outpoint. Returns the removed output if it existed.
    pub fn spend(&mut self, outpoint: &OutPoint) -> Option<TxOutput> {
        self.map.remove(outpoint)
    }

    pub fn get(&self, outpoint: &OutPoint) -> Option<&TxOutput> {
        self.map.get(outpoint)
    }

    pub fn lookup(&self, outpoint: &OutPoint) -> Result<&TxOutput, TxError> {
        self.map.get(outpoint).ok_or(TxError::NotFound(*outpoint))
    }

    pub fn contains(&self, outpoint: &OutPoint) -> bool {
        self.map.contains_key(outpoint)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Read-only iterator over all entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&OutPoint, &TxOutput)> {
        self.map.iter()
    }

    /// All entries sorted by outpoint.
    pub fn entries(&self) -> Vec<UtxoEntry> {
        let mut entries: Vec<UtxoEntry> = self
            .map
            .iter()
            .map(|(op, out)| UtxoEntry {
                outpoint: *op,
                output: out.clone(),
            })
            .collect();
        entries.sort_by(|a, b| a.outpoint.cmp(&b.outpoint));
        entries
    }

    pub fn total_value(&self) -> i128 {
        self.map.values().map(|o| i128::from(o.amount)).sum()
    }

    /// Sum and count of the outputs spendable by `address`.
    pub fn balance_of(&self, address: &PublicKey) -> (i128, usize) {
        self.map
            .values()
            .filter(|o| &o.address == address)
            .fold((0, 0), |(sum, count), o| (sum + i128::from(o.amount), count + 1))
    }

    /// Add every output of `tx` under `(tx.hash, index)`.
    pub fn add_tx_outputs(&mut self, tx: &Transaction) {
        for (i, out) in tx.outputs().iter().enumerate() {
            self.insert(tx.outpoint(i as u32), out.clone());
        }
    }
}
