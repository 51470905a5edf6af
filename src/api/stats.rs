use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, StatsResponse};

#[get("/stats/")]
pub async fn get_stats(state: web::Data<AppState>) -> impl Responder {
    // Separate short locks; counters and pool may be one batch apart.
    let (utxo_size, utxo_total_value) = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        (ledger.pool().len(), ledger.pool().total_value())
    };
    let stats = *state.stats.lock().expect("mutex poisoned");

    HttpResponse::Ok().json(StatsResponse {
        utxo_size,
        utxo_total_value,
        batches_processed: stats.batches_processed,
        txs_accepted: stats.txs_accepted,
        txs_rejected: stats.txs_rejected,
        max_batch_size: state.max_batch_size,
    })
}
