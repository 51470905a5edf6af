use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, HealthResponse};

#[get("/health/")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let utxo_size = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.pool().len()
    };
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        utxo_size,
    })
}
