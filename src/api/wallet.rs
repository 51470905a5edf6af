use actix_web::{HttpResponse, Responder, post, web};
use log::debug;

use super::models::{NewTxRequest, NewWalletResponse, SignRequest, SignResponse};
use utxo_ledger::wallet::{generate_keypair_hex, secret_key_from_hex, sign_transaction};
use utxo_ledger::{Transaction, TxInput};

#[post("/wallet/new/")]
pub async fn create_wallet() -> impl Responder {
    let (sk, pk) = generate_keypair_hex();
    HttpResponse::Ok().json(NewWalletResponse {
        private_key: sk,
        address: pk.clone(),
        public_key: pk,
    })
}

/// Sign a transaction built from `inputs`/`outputs` with one key per input.
/// DEV helper: the private keys travel to the server.
#[post("/wallet/sign/")]
pub async fn sign(body: web::Json<SignRequest>) -> impl Responder {
    let body = body.into_inner();

    let keys = match body
        .private_keys
        .iter()
        .map(|k| secret_key_from_hex(k))
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(keys) => keys,
        Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
    };

    let unsigned = Transaction::new(
        body.inputs.into_iter().map(TxInput::unsigned).collect(),
        body.outputs,
    );
    match sign_transaction(&unsigned, &keys) {
        Ok(signed) => {
            debug!("WALLET - signed txid={}", signed.txid());
            HttpResponse::Ok().json(SignResponse {
                txid: signed.txid(),
                transaction: NewTxRequest {
                    inputs: signed.inputs().to_vec(),
                    outputs: signed.outputs().to_vec(),
                },
            })
        }
        Err(e) => HttpResponse::BadRequest().body(e.to_string()),
    }
}
