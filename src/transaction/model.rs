use secp256k1::PublicKey;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::utxo::OutPoint;

/// Monetary value in minor units.
/// Signed so that a negative output can be represented and then rejected.
pub type Amount = i64;

/// SHA-256 content hash identifying a transaction.
pub type TxHash = [u8; 32];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    /// References a previous unspent output (UTXO)
    pub outpoint: OutPoint,
    /// Hex-encoded DER ECDSA signature over `Transaction::signing_payload` for this slot
    #[serde(with = "hex::serde", default)]
    pub signature: Vec<u8>,
}

impl TxInput {
    /// An input that still has to be signed.
    pub fn unsigned(outpoint: OutPoint) -> Self {
        Self {
            outpoint,
            signature: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    /// Key that authorizes spending this output.
    pub address: PublicKey,
    pub amount: Amount,
}

/// A transaction with its content hash.
///
/// Fields are private so the hash always matches the inputs and outputs it was
/// computed from. Build a new value to change anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    #[serde(rename = "txid", with = "hex::serde")]
    hash: TxHash,
    inputs: Vec<TxInput>,
    outputs: Vec<TxOutput>,
}

impl Transaction {
    /// Build a transaction and compute its hash deterministically from its content.
    /// The hash covers signatures; the signing payload does not.
    pub fn new(inputs: Vec<TxInput>, outputs: Vec<TxOutput>) -> Self {
        let mut preimage = Vec::new();
        for input in &inputs {
            write_outpoint(&mut preimage, &input.outpoint);
            preimage.extend_from_slice(&(input.signature.len() as u32).to_le_bytes());
            preimage.extend_from_slice(&input.signature);
        }
        for output in &outputs {
            write_output(&mut preimage, output);
        }

        let mut hasher = Sha256::new();
        hasher.update(&preimage);
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&hasher.finalize()[..]);

        Self {
            hash,
            inputs,
            outputs,
        }
    }

    pub fn hash(&self) -> &TxHash {
        &self.hash
    }

    /// Hex form of the hash, for logs and responses.
    pub fn txid(&self) -> String {
        hex::encode(self.hash)
    }

    pub fn inputs(&self) -> &[TxInput] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[TxOutput] {
        &self.outputs
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Identifier under which output `vout` of this transaction enters the pool.
    pub fn outpoint(&self, vout: u32) -> OutPoint {
        OutPoint::new(self.hash, vout)
    }

    /// Bytes the owner of input `index` signs: that input's outpoint followed by
    /// every output. Signatures are excluded.
    pub fn signing_payload(&self, index: usize) -> Option<Vec<u8>> {
        let input = self.inputs.get(index)?;
        let mut payload = Vec::with_capacity(36 + self.outputs.len() * 41);
        write_outpoint(&mut payload, &input.outpoint);
        for output in &self.outputs {
            write_output(&mut payload, output);
        }
        Some(payload)
    }

    /// Sum of declared output amounts, `None` on overflow.
    pub fn total_output_amount(&self) -> Option<i128> {
        self.outputs
            .iter()
            .try_fold(0i128, |acc, o| acc.checked_add(i128::from(o.amount)))
    }
}

fn write_outpoint(buf: &mut Vec<u8>, outpoint: &OutPoint) {
    buf.extend_from_slice(&outpoint.txid);
    buf.extend_from_slice(&outpoint.vout.to_le_bytes());
}

fn write_output(buf: &mut Vec<u8>, output: &TxOutput) {
    buf.extend_from_slice(&output.amount.to_le_bytes());
    buf.extend_from_slice(&output.address.serialize());
}
