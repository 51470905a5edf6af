use rand::rngs::OsRng;
use secp256k1::{
    All, Message, PublicKey, Secp256k1, SecretKey, VerifyOnly, ecdsa::Signature,
};
use sha2::{Digest, Sha256};

use crate::error::WalletError;
use crate::ledger::SignatureVerifier;
use crate::transaction::{Transaction, TxInput};

/// Generate a new secp256k1 keypair and return (priv_hex, pub_hex_compressed).
/// The compressed public key doubles as the output address.
pub fn generate_keypair_hex() -> (String, String) {
    let secp = Secp256k1::new();
    let (sk, pk) = secp.generate_keypair(&mut OsRng);
    (hex::encode(sk.secret_bytes()), hex::encode(pk.serialize()))
}

pub fn secret_key_from_hex(sk_hex: &str) -> Result<SecretKey, WalletError> {
    let bytes = hex::decode(sk_hex)?;
    Ok(SecretKey::from_slice(&bytes)?)
}

pub fn public_key_from_hex(pk_hex: &str) -> Result<PublicKey, WalletError> {
    let bytes = hex::decode(pk_hex)?;
    Ok(PublicKey::from_slice(&bytes)?)
}

fn digest(payload: &[u8]) -> Message {
    let mut hasher = Sha256::new();
    hasher.update(payload);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize()[..]);
    Message::from_digest(out)
}

/// DER ECDSA signature over the SHA-256 of `payload`.
pub fn sign_payload(secp: &Secp256k1<All>, sk: &SecretKey, payload: &[u8]) -> Vec<u8> {
    secp.sign_ecdsa(&digest(payload), sk).serialize_der().to_vec()
}

/// Sign every input of `tx`, `keys[i]` signing input `i`, and rebuild the
/// transaction so its hash covers the new signatures.
pub fn sign_transaction(tx: &Transaction, keys: &[SecretKey]) -> Result<Transaction, WalletError> {
    if keys.len() != tx.num_inputs() {
        return Err(WalletError::KeyCount {
            expected: tx.num_inputs(),
            got: keys.len(),
        });
    }

    let secp = Secp256k1::new();
    let inputs = (0..tx.num_inputs())
        .zip(keys)
        .map(|(index, sk)| {
            let payload = tx
                .signing_payload(index)
                .ok_or(WalletError::MissingPayload { index })?;
            Ok(TxInput {
                outpoint: tx.inputs()[index].outpoint,
                signature: sign_payload(&secp, sk, &payload),
            })
        })
        .collect::<Result<Vec<_>, WalletError>>()?;

    Ok(Transaction::new(inputs, tx.outputs().to_vec()))
}

/// Verifies DER ECDSA signatures over SHA-256 of the signed payload.
pub struct Secp256k1Verifier {
    secp: Secp256k1<VerifyOnly>,
}

impl Secp256k1Verifier {
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::verification_only(),
        }
    }
}

impl Default for Secp256k1Verifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SignatureVerifier for Secp256k1Verifier {
    fn verify(&self, owner: &PublicKey, message: &[u8], signature: &[u8]) -> bool {
        let Ok(sig) = Signature::from_der(signature) else {
            log::trace!("signature is not valid DER ({} bytes)", signature.len());
            return false;
        };
        self.secp.verify_ecdsa(&digest(message), &sig, owner).is_ok()
    }
}
