use log::{debug, info, trace};
use std::collections::{HashMap, HashSet};

use super::{SignatureVerifier, TransactionValidator};
use crate::error::TxError;
use crate::transaction::{OutPoint, Transaction, TxHash, TxOutput, UtxoPool};
use crate::wallet::Secp256k1Verifier;

/// A candidate left out of a batch, with the reason it failed in the last pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub txid: TxHash,
    pub reason: TxError,
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Accepted transactions, in the order they were committed.
    pub accepted: Vec<Transaction>,
    /// One entry per distinct excluded txid, in submission order.
    pub rejected: Vec<Rejection>,
    /// Passes over the batch, including the final pass that accepted nothing.
    pub rounds: usize,
}

/// Owns the live UTXO pool and commits batches of transactions into it.
///
/// The pool is a private copy of whatever the caller seeded it with; only
/// `handle_txs` and `seed` mutate it.
pub struct BatchProcessor<V = Secp256k1Verifier> {
    pool: UtxoPool,
    validator: TransactionValidator<V>,
}

impl BatchProcessor {
    pub fn new(pool: &UtxoPool) -> Self {
        Self::with_verifier(pool, Secp256k1Verifier::new())
    }
}

impl<V: SignatureVerifier> BatchProcessor<V> {
    pub fn with_verifier(pool: &UtxoPool, verifier: V) -> Self {
        Self {
            pool: pool.clone(),
            validator: TransactionValidator::new(verifier),
        }
    }

    pub fn pool(&self) -> &UtxoPool {
        &self.pool
    }

    pub fn into_pool(self) -> UtxoPool {
        self.pool
    }

    /// Validate `tx` against the live pool without committing it.
    pub fn check(&self, tx: &Transaction) -> Result<i128, TxError> {
        self.validator.check(tx, &self.pool)
    }

    pub fn is_valid(&self, tx: &Transaction) -> bool {
        self.validator.is_valid(tx, &self.pool)
    }

    /// Put an output into the pool outside of a batch (genesis, dev faucet).
    pub fn seed(&mut self, outpoint: OutPoint, output: TxOutput) {
        self.pool.insert(outpoint, output);
    }

    /// Commit a maximal mutually-valid subset of `candidates`.
    ///
    /// Passes over the not-yet-accepted candidates in submission order until a
    /// pass accepts nothing. Each accepted transaction is applied before the
    /// next candidate is checked, so a later candidate may spend its outputs
    /// regardless of submission order. Identical txids are accepted at most once.
    pub fn handle_txs(&mut self, candidates: &[Transaction]) -> BatchOutcome {
        let mut accepted_ids: HashSet<TxHash> = HashSet::with_capacity(candidates.len());
        let mut accepted = Vec::new();
        let mut last_errors: HashMap<TxHash, TxError> = HashMap::new();
        let mut rounds = 0;

        loop {
            rounds += 1;
            let mut progressed = false;

            for tx in candidates {
                if accepted_ids.contains(tx.hash()) {
                    continue;
                }
                match self.validator.check(tx, &self.pool) {
                    Ok(fee) => {
                        self.apply(tx);
                        accepted_ids.insert(*tx.hash());
                        last_errors.remove(tx.hash());
                        accepted.push(tx.clone());
                        progressed = true;
                        debug!(
                            "round {} - accepted txid={} (inputs={}, outputs={}, fee={})",
                            rounds,
                            tx.txid(),
                            tx.num_inputs(),
                            tx.num_outputs(),
                            fee
                        );
                    }
                    Err(reason) => {
                        trace!("round {} - deferred txid={}: {}", rounds, tx.txid(), reason);
                        last_errors.insert(*tx.hash(), reason);
                    }
                }
            }

            if !progressed {
                break;
            }
        }

        let mut rejected = Vec::with_capacity(last_errors.len());
        for tx in candidates {
            if let Some(reason) = last_errors.remove(tx.hash()) {
                rejected.push(Rejection {
                    txid: *tx.hash(),
                    reason,
                });
            }
        }

        info!(
            "batch of {} done in {} rounds: accepted={}, rejected={}, utxo size={}",
            candidates.len(),
            rounds,
            accepted.len(),
            rejected.len(),
            self.pool.len()
        );

        BatchOutcome {
            accepted,
            rejected,
            rounds,
        }
    }

    /// Add the outputs of an accepted transaction, then spend its inputs.
    fn apply(&mut self, tx: &Transaction) {
        self.pool.add_tx_outputs(tx);
        for input in tx.inputs() {
            let spent = self.pool.spend(&input.outpoint);
            debug_assert!(
                spent.is_some(),
                "accepted tx {} spends absent outpoint {}",
                tx.txid(),
                input.outpoint
            );
        }
    }
}
