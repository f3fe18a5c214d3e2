use std::sync::Arc;

use aventuras::api::{self, AppData};
use aventuras::config::Config;
use aventuras::store::EntryStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::from_env();
    let store = EntryStore::connect(&config.database_url).await?;

    let port = config.port;
    let state = Arc::new(AppData { store, config });
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    log::info!("Adventure journal API running on port {port}");
    axum::serve(listener, app).await?;

    Ok(())
}
