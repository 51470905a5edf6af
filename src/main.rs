mod api;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::{error, info};
use utxo_ledger::config::Config;

use api::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = Config::from_env().map_err(|e| {
        error!("invalid configuration: {e}");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;
    let genesis = config.load_genesis().map_err(|e| {
        error!("cannot load genesis: {e}");
        std::io::Error::new(std::io::ErrorKind::InvalidData, e)
    })?;

    info!(
        "Starting UTXO ledger API at http://{}:{} (genesis utxos: {}, max batch: {})",
        config.host,
        config.port,
        genesis.len(),
        config.max_batch_size
    );

    let state = web::Data::new(AppState::new(&genesis, config.max_batch_size));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
