// src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

/// Which `CartStore` backend to construct at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
  /// Durable backend; requires `DATABASE_URL`.
  Postgres { database_url: String },
  /// Volatile backend for development and tests; no database needed.
  Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub store_backend: StoreBackend,
  /// Base URL of the external order service (`POST {order_host}/orders`).
  pub order_host: String,
  /// Total timeout for one order notification, in milliseconds.
  pub order_gateway_timeout_ms: u64,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    let backend_name = get_env("CART_STORE").unwrap_or_else(|_| "postgres".to_string());
    let store_backend = match backend_name.to_ascii_lowercase().as_str() {
      "postgres" => StoreBackend::Postgres {
        database_url: get_env("DATABASE_URL")?,
      },
      "memory" => StoreBackend::Memory,
      other => {
        return Err(AppError::Config(format!(
          "Invalid CART_STORE '{}': expected 'postgres' or 'memory'",
          other
        )))
      }
    };

    let order_host = get_env("ORDER_HOST").unwrap_or_else(|_| "http://localhost:8081".to_string());
    let order_gateway_timeout_ms = get_env("ORDER_GATEWAY_TIMEOUT_MS")
      .unwrap_or_else(|_| "3000".to_string())
      .parse::<u64>()
      .map_err(|e| AppError::Config(format!("Invalid ORDER_GATEWAY_TIMEOUT_MS: {}", e)))?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      store_backend,
      order_host,
      order_gateway_timeout_ms,
    })
  }
}
