use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, BalanceResponse, UtxoListResponse};
use utxo_ledger::wallet::public_key_from_hex;

#[get("/balance/{address}/")]
pub async fn get_balance(state: web::Data<AppState>, path: web::Path<(String,)>) -> impl Responder {
    let address = path.into_inner().0;
    let pk = match public_key_from_hex(&address) {
        Ok(pk) => pk,
        Err(e) => return HttpResponse::BadRequest().body(format!("invalid address: {e}")),
    };

    let (balance, utxos) = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.pool().balance_of(&pk)
    };

    HttpResponse::Ok().json(BalanceResponse {
        address,
        balance,
        utxos,
    })
}

/// Every unspent output, sorted by outpoint.
#[get("/utxo/")]
pub async fn get_utxos(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let pool = ledger.pool();
    HttpResponse::Ok().json(UtxoListResponse {
        size: pool.len(),
        total_value: pool.total_value(),
        utxos: pool.entries(),
    })
}
