use actix_web::{HttpResponse, Responder, post, web};
use log::{debug, info, warn};
use sha2::{Digest, Sha256};
use std::time::Instant;
use uuid::Uuid;

use super::models::{
    AppState, BatchRequest, BatchResponse, FaucetRequest, FaucetResponse, NewTxRequest,
    RejectedTx, ValidateTxResponse,
};
use utxo_ledger::wallet::public_key_from_hex;
use utxo_ledger::{OutPoint, Transaction, TxHash, TxOutput};

/// DEV Faucet: create a spendable UTXO directly in the pool.
#[post("/faucet/")]
pub async fn post_faucet(
    state: web::Data<AppState>,
    body: web::Json<FaucetRequest>,
) -> impl Responder {
    if body.amount <= 0 {
        return HttpResponse::BadRequest().body("amount must be > 0");
    }
    let address = match public_key_from_hex(&body.address) {
        Ok(pk) => pk,
        Err(e) => return HttpResponse::BadRequest().body(format!("invalid address: {e}")),
    };

    // Fresh identifier per credit; a reused one could resurrect a spent outpoint.
    let outpoint = OutPoint::new(fresh_credit_id(), 0);
    let output = TxOutput {
        address,
        amount: body.amount,
    };

    {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.seed(outpoint, output);
        debug!(
            "FAUCET - seeded {} -> {{ addr: {}, amount: {} }}; UTXO size now {}",
            outpoint,
            body.address,
            body.amount,
            ledger.pool().len()
        );
    }

    HttpResponse::Ok().json(FaucetResponse {
        txid: hex::encode(outpoint.txid),
        outpoints: vec![outpoint],
    })
}

/// SHA-256 of a random v4 UUID.
fn fresh_credit_id() -> TxHash {
    let mut hasher = Sha256::new();
    hasher.update(Uuid::new_v4().as_bytes());
    let mut id = [0u8; 32];
    id.copy_from_slice(&hasher.finalize()[..]);
    id
}

/// Check one transaction against the live pool without committing it.
#[post("/tx/validate/")]
pub async fn validate_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    let body = body.into_inner();
    let tx = Transaction::new(body.inputs, body.outputs);

    let result = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.check(&tx)
    };

    let resp = match result {
        Ok(fee) => ValidateTxResponse {
            txid: tx.txid(),
            valid: true,
            fee: Some(fee),
            reason: None,
        },
        Err(e) => {
            debug!("POST /tx/validate/ - txid={} invalid: {}", tx.txid(), e);
            ValidateTxResponse {
                txid: tx.txid(),
                valid: false,
                fee: None,
                reason: Some(e.to_string()),
            }
        }
    };
    HttpResponse::Ok().json(resp)
}

/// Commit a batch: accept the largest mutually-valid subset and update the pool.
#[post("/batch/")]
pub async fn post_batch(
    state: web::Data<AppState>,
    body: web::Json<BatchRequest>,
) -> impl Responder {
    let t0 = Instant::now();
    let batch_id = Uuid::new_v4().to_string();
    let body = body.into_inner();

    if body.transactions.len() > state.max_batch_size {
        warn!(
            "POST /batch/ - {} rejected: {} txs exceeds limit {}",
            batch_id,
            body.transactions.len(),
            state.max_batch_size
        );
        return HttpResponse::PayloadTooLarge().body(format!(
            "batch holds {} transactions, limit is {}",
            body.transactions.len(),
            state.max_batch_size
        ));
    }

    let candidates: Vec<Transaction> = body
        .transactions
        .into_iter()
        .map(|t| Transaction::new(t.inputs, t.outputs))
        .collect();
    debug!("POST /batch/ - {} received {} txs", batch_id, candidates.len());

    let (outcome, utxo_size) = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        let outcome = ledger.handle_txs(&candidates);
        (outcome, ledger.pool().len())
    };

    {
        let mut stats = state.stats.lock().expect("mutex poisoned");
        stats.batches_processed += 1;
        stats.txs_accepted += outcome.accepted.len() as u64;
        stats.txs_rejected += outcome.rejected.len() as u64;
    }

    info!(
        "POST /batch/ - {} accepted={} rejected={} rounds={} ({} ms)",
        batch_id,
        outcome.accepted.len(),
        outcome.rejected.len(),
        outcome.rounds,
        t0.elapsed().as_millis()
    );

    HttpResponse::Ok().json(BatchResponse {
        batch_id,
        processed_at: chrono::Utc::now().timestamp(),
        rounds: outcome.rounds,
        accepted: outcome.accepted.iter().map(Transaction::txid).collect(),
        rejected: outcome
            .rejected
            .into_iter()
            .map(|r| RejectedTx {
                txid: hex::encode(r.txid),
                reason: r.reason.to_string(),
            })
            .collect(),
        utxo_size,
    })
}
