// src/main.rs

use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

use shopcarts::config::{AppConfig, StoreBackend};
use shopcarts::errors::AppError;
use shopcarts::services::{CartItemService, HttpOrderGateway, OrderGateway};
use shopcarts::state::AppState;
use shopcarts::store::{CartStore, MemoryCartStore, PgCartStore};
use shopcarts::web::configure_app_routes;

fn startup_error(err: AppError) -> std::io::Error {
  tracing::error!(error = %err, "Service failed to start.");
  std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize tracing subscriber for logging; RUST_LOG overrides the default.
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting shop cart service...");

  let config = Arc::new(AppConfig::from_env().map_err(startup_error)?);

  let store: Arc<dyn CartStore> = match &config.store_backend {
    StoreBackend::Postgres { database_url } => {
      let store = PgCartStore::connect(database_url).await.map_err(startup_error)?;
      store.ensure_schema().await.map_err(startup_error)?;
      tracing::info!("Successfully connected to the database.");
      Arc::new(store)
    }
    StoreBackend::Memory => {
      tracing::info!("Using the in-memory cart store; data will not survive a restart.");
      Arc::new(MemoryCartStore::new())
    }
  };

  let gateway: Arc<dyn OrderGateway> = Arc::new(
    HttpOrderGateway::new(&config.order_host, Duration::from_millis(config.order_gateway_timeout_ms))
      .map_err(startup_error)?,
  );

  let app_state = AppState {
    cart_service: CartItemService::new(store, gateway),
  };

  let server_address = format!("{}:{}", config.server_host, config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(web::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
