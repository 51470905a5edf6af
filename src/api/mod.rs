mod balance;
mod health;
pub mod models;
mod stats;
mod tx;
mod wallet;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(tx::post_faucet)
            .service(tx::validate_transaction)
            .service(tx::post_batch)
            .service(balance::get_balance)
            .service(balance::get_utxos)
            .service(stats::get_stats)
            .service(wallet::create_wallet)
            .service(wallet::sign),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};
    use utxo_ledger::UtxoPool;

    #[actix_web::test]
    async fn faucet_sign_and_commit_batch() {
        let state = web::Data::new(AppState::new(&UtxoPool::new(), 10));
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/wallet/new/")
            .to_request();
        let wallet: Value = test::call_and_read_body_json(&app, req).await;
        let address = wallet["address"].as_str().expect("address").to_string();
        let private_key = wallet["private_key"].as_str().expect("key").to_string();

        let req = test::TestRequest::post()
            .uri("/api/v1/faucet/")
            .set_json(json!({ "address": address, "amount": 50 }))
            .to_request();
        let faucet: Value = test::call_and_read_body_json(&app, req).await;
        let outpoint = faucet["outpoints"][0].clone();

        let req = test::TestRequest::post()
            .uri("/api/v1/wallet/sign/")
            .set_json(json!({
                "private_keys": [private_key],
                "inputs": [outpoint],
                "outputs": [{ "address": address, "amount": 45 }],
            }))
            .to_request();
        let signed: Value = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/tx/validate/")
            .set_json(&signed["transaction"])
            .to_request();
        let check: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(check["valid"], json!(true));
        assert_eq!(check["fee"], json!(5));

        let batch_body = json!({ "transactions": [signed["transaction"].clone()] });
        let req = test::TestRequest::post()
            .uri("/api/v1/batch/")
            .set_json(&batch_body)
            .to_request();
        let batch: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(batch["accepted"], json!([signed["txid"].clone()]));
        assert_eq!(batch["utxo_size"], json!(1));

        // replay: the faucet output is gone now
        let req = test::TestRequest::post()
            .uri("/api/v1/batch/")
            .set_json(&batch_body)
            .to_request();
        let replay: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(replay["accepted"], json!([]));
        assert_eq!(replay["rejected"][0]["txid"], signed["txid"]);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/balance/{address}/"))
            .to_request();
        let balance: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(balance["balance"], json!(45));
        assert_eq!(balance["utxos"], json!(1));

        let req = test::TestRequest::get().uri("/api/v1/stats/").to_request();
        let stats: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats["batches_processed"], json!(2));
        assert_eq!(stats["txs_accepted"], json!(1));
        assert_eq!(stats["txs_rejected"], json!(1));
    }

    #[actix_web::test]
    async fn repeated_faucet_credits_stay_distinct_and_spent_ones_stay_spent() {
        let state = web::Data::new(AppState::new(&UtxoPool::new(), 10));
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/wallet/new/")
            .to_request();
        let wallet: Value = test::call_and_read_body_json(&app, req).await;
        let address = wallet["address"].as_str().expect("address").to_string();
        let private_key = wallet["private_key"].as_str().expect("key").to_string();
        let credit = json!({ "address": address, "amount": 50 });

        let req = test::TestRequest::post()
            .uri("/api/v1/faucet/")
            .set_json(&credit)
            .to_request();
        let first: Value = test::call_and_read_body_json(&app, req).await;
        let req = test::TestRequest::post()
            .uri("/api/v1/faucet/")
            .set_json(&credit)
            .to_request();
        let second: Value = test::call_and_read_body_json(&app, req).await;
        assert_ne!(first["outpoints"][0], second["outpoints"][0]);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/balance/{address}/"))
            .to_request();
        let balance: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(balance["balance"], json!(100));
        assert_eq!(balance["utxos"], json!(2));

        let req = test::TestRequest::post()
            .uri("/api/v1/wallet/sign/")
            .set_json(json!({
                "private_keys": [private_key],
                "inputs": [first["outpoints"][0].clone()],
                "outputs": [{ "address": address, "amount": 45 }],
            }))
            .to_request();
        let signed: Value = test::call_and_read_body_json(&app, req).await;
        let batch_body = json!({ "transactions": [signed["transaction"].clone()] });

        let req = test::TestRequest::post()
            .uri("/api/v1/batch/")
            .set_json(&batch_body)
            .to_request();
        let batch: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(batch["accepted"], json!([signed["txid"].clone()]));

        // another identical credit must not bring the spent outpoint back
        let req = test::TestRequest::post()
            .uri("/api/v1/faucet/")
            .set_json(&credit)
            .to_request();
        let third: Value = test::call_and_read_body_json(&app, req).await;
        assert_ne!(third["outpoints"][0], first["outpoints"][0]);

        let req = test::TestRequest::post()
            .uri("/api/v1/batch/")
            .set_json(&batch_body)
            .to_request();
        let replay: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(replay["accepted"], json!([]));
        assert_eq!(replay["rejected"][0]["txid"], signed["txid"]);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/balance/{address}/"))
            .to_request();
        let balance: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(balance["balance"], json!(145));
        assert_eq!(balance["utxos"], json!(3));
    }

    #[actix_web::test]
    async fn utxo_listing_and_invalid_validation() {
        let state = web::Data::new(AppState::new(&UtxoPool::new(), 10));
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/wallet/new/")
            .to_request();
        let wallet: Value = test::call_and_read_body_json(&app, req).await;
        let address = wallet["address"].as_str().expect("address").to_string();
        let private_key = wallet["private_key"].as_str().expect("key").to_string();

        for amount in [7, 3] {
            let req = test::TestRequest::post()
                .uri("/api/v1/faucet/")
                .set_json(json!({ "address": address, "amount": amount }))
                .to_request();
            let _: Value = test::call_and_read_body_json(&app, req).await;
        }

        let req = test::TestRequest::get().uri("/api/v1/utxo/").to_request();
        let listing: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listing["size"], json!(2));
        assert_eq!(listing["total_value"], json!(10));
        let utxos = listing["utxos"].as_array().expect("utxos");
        assert_eq!(utxos.len(), 2);
        assert!(utxos.iter().all(|u| u["output"]["address"] == json!(address)));

        // asks for more than either credit holds
        let req = test::TestRequest::post()
            .uri("/api/v1/wallet/sign/")
            .set_json(json!({
                "private_keys": [private_key],
                "inputs": [utxos[0]["outpoint"].clone()],
                "outputs": [{ "address": address, "amount": 100 }],
            }))
            .to_request();
        let signed: Value = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/tx/validate/")
            .set_json(&signed["transaction"])
            .to_request();
        let check: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(check["valid"], json!(false));
        assert_eq!(check["fee"], Value::Null);
        assert!(
            check["reason"]
                .as_str()
                .expect("reason")
                .contains("less than outputs total")
        );

        let req = test::TestRequest::get().uri("/api/v1/health/").to_request();
        let health: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(health["status"], json!("ok"));
        assert_eq!(health["utxo_size"], json!(2));
    }

    #[actix_web::test]
    async fn oversized_batch_is_refused() {
        let state = web::Data::new(AppState::new(&UtxoPool::new(), 1));
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let empty = json!({ "inputs": [], "outputs": [] });
        let req = test::TestRequest::post()
            .uri("/api/v1/batch/")
            .set_json(json!({ "transactions": [empty.clone(), empty] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[actix_web::test]
    async fn faucet_rejects_bad_input() {
        let state = web::Data::new(AppState::new(&UtxoPool::new(), 10));
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/faucet/")
            .set_json(json!({ "address": "not-hex", "amount": 5 }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }
}
