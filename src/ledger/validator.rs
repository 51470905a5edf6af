use log::trace;
use std::collections::HashSet;

use super::SignatureVerifier;
use crate::error::TxError;
use crate::transaction::{Transaction, UtxoPool};
use crate::wallet::Secp256k1Verifier;

/// Decides whether a transaction may be committed against a pool.
///
/// Only reads the pool and the transaction, so repeated calls with the same
/// arguments give the same answer, and calls against distinct snapshots may
/// run on different threads.
pub struct TransactionValidator<V = Secp256k1Verifier> {
    verifier: V,
}

impl Default for TransactionValidator {
    fn default() -> Self {
        Self::new(Secp256k1Verifier::new())
    }
}

impl<V: SignatureVerifier> TransactionValidator<V> {
    pub fn new(verifier: V) -> Self {
        Self { verifier }
    }

    pub fn is_valid(&self, tx: &Transaction, pool: &UtxoPool) -> bool {
        self.check(tx, pool).is_ok()
    }

    /// Run every rule and return the implicit fee (inputs minus outputs).
    ///
    /// Rules, first failure wins:
    /// - no outpoint is claimed twice by this transaction
    /// - every referenced outpoint is in `pool`
    /// - every input is signed by the owner recorded on the output it spends
    /// - no output amount is negative
    /// - inputs total >= outputs total (equal is fine)
    pub fn check(&self, tx: &Transaction, pool: &UtxoPool) -> Result<i128, TxError> {
        let mut claimed = HashSet::with_capacity(tx.num_inputs());
        let mut input_sum: i128 = 0;

        for (index, input) in tx.inputs().iter().enumerate() {
            let op = &input.outpoint;
            if !claimed.insert(*op) {
                return Err(TxError::DoubleSpend(*op));
            }

            let prev_out = pool.lookup(op)?;

            if input.signature.is_empty() {
                return Err(TxError::Malformed(format!("input {index} is not signed")));
            }
            let payload = tx
                .signing_payload(index)
                .ok_or_else(|| TxError::Malformed(format!("no signing payload for input {index}")))?;
            if !self
                .verifier
                .verify(&prev_out.address, &payload, &input.signature)
            {
                return Err(TxError::VerificationFailure { index });
            }

            input_sum = input_sum
                .checked_add(i128::from(prev_out.amount))
                .ok_or_else(|| TxError::Malformed("input total overflows".into()))?;
        }

        let mut output_sum: i128 = 0;
        for (index, output) in tx.outputs().iter().enumerate() {
            if output.amount < 0 {
                return Err(TxError::NegativeOutput {
                    index,
                    amount: output.amount,
                });
            }
            output_sum = output_sum
                .checked_add(i128::from(output.amount))
                .ok_or_else(|| TxError::Malformed("output total overflows".into()))?;
        }

        if input_sum < output_sum {
            return Err(TxError::InsufficientInput {
                inputs: input_sum,
                outputs: output_sum,
            });
        }

        let fee = input_sum - output_sum;
        trace!("tx {} valid, fee={}", tx.txid(), fee);
        Ok(fee)
    }
}
