use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use utxo_ledger::{BatchProcessor, OutPoint, TxInput, TxOutput, UtxoEntry, UtxoPool};

/// Running totals since startup.
#[derive(Debug, Default, Clone, Copy)]
pub struct LedgerStats {
    pub batches_processed: u64,
    pub txs_accepted: u64,
    pub txs_rejected: u64,
}

/// Shared application state: the ledger (single writer) and its counters.
pub struct AppState {
    pub ledger: Mutex<BatchProcessor>,
    pub stats: Mutex<LedgerStats>,
    pub max_batch_size: usize,
}

impl AppState {
    pub fn new(genesis: &UtxoPool, max_batch_size: usize) -> Self {
        Self {
            ledger: Mutex::new(BatchProcessor::new(genesis)),
            stats: Mutex::new(LedgerStats::default()),
            max_batch_size,
        }
    }
}

/* ---------- TX API Models ---------- */

#[derive(Deserialize, Serialize, Clone)]
pub struct NewTxRequest {
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
}

#[derive(Serialize)]
pub struct ValidateTxResponse {
    pub txid: String,
    pub valid: bool,
    pub fee: Option<i128>,
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct BatchRequest {
    pub transactions: Vec<NewTxRequest>,
}

#[derive(Serialize)]
pub struct RejectedTx {
    pub txid: String,
    pub reason: String,
}

#[derive(Serialize)]
pub struct BatchResponse {
    pub batch_id: String,
    pub processed_at: i64,
    pub rounds: usize,
    pub accepted: Vec<String>,
    pub rejected: Vec<RejectedTx>,
    pub utxo_size: usize,
}

/* ---------- Faucet API Models (dev) ---------- */

#[derive(Deserialize)]
pub struct FaucetRequest {
    /// Hex compressed public key that will own the new output.
    pub address: String,
    pub amount: i64,
}

#[derive(Serialize)]
pub struct FaucetResponse {
    pub txid: String,
    pub outpoints: Vec<OutPoint>,
}

/* ---------- Pool API Models ---------- */

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub utxo_size: usize,
}

#[derive(Serialize)]
pub struct UtxoListResponse {
    pub size: usize,
    pub total_value: i128,
    pub utxos: Vec<UtxoEntry>,
}

#[derive(Serialize)]
pub struct BalanceResponse {
    pub address: String,
    pub balance: i128,
    pub utxos: usize,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub utxo_size: usize,
    pub utxo_total_value: i128,
    pub batches_processed: u64,
    pub txs_accepted: u64,
    pub txs_rejected: u64,
    pub max_batch_size: usize,
}

/* ---------- Wallet API Models ---------- */

#[derive(Serialize)]
pub struct NewWalletResponse {
    pub private_key: String,
    pub public_key: String,
    pub address: String,
}

#[derive(Deserialize)]
pub struct SignRequest {
    /// Hex secret keys, one per input, in input order.
    pub private_keys: Vec<String>,
    pub inputs: Vec<OutPoint>,
    pub outputs: Vec<TxOutput>,
}

#[derive(Serialize)]
pub struct SignResponse {
    pub txid: String,
    pub transaction: NewTxRequest,
}
