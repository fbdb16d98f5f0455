// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};

use shopcarts::errors::{AppError, Result};
use shopcarts::services::{CartItemService, OrderGateway, OrderRequest};
use shopcarts::store::MemoryCartStore;

/// Gateway double that records every submitted order.
#[derive(Debug, Default)]
pub struct RecordingGateway {
  pub submitted: Mutex<Vec<OrderRequest>>,
}

#[async_trait]
impl OrderGateway for RecordingGateway {
  async fn submit(&self, order: &OrderRequest) -> Result<()> {
    self.submitted.lock().push(order.clone());
    Ok(())
  }
}

/// Gateway double standing in for an unreachable order service.
#[derive(Debug, Default)]
pub struct FailingGateway;

#[async_trait]
impl OrderGateway for FailingGateway {
  async fn submit(&self, _order: &OrderRequest) -> Result<()> {
    Err(AppError::Gateway("order service unreachable (test double)".to_string()))
  }
}

/// Fresh service over an empty in-memory store, with its recording gateway.
pub fn memory_service() -> (CartItemService, Arc<RecordingGateway>) {
  let gateway = Arc::new(RecordingGateway::default());
  let service = CartItemService::new(Arc::new(MemoryCartStore::new()), gateway.clone());
  (service, gateway)
}

/// Fresh service wired to the given gateway double.
pub fn memory_service_with(gateway: Arc<dyn OrderGateway>) -> CartItemService {
  CartItemService::new(Arc::new(MemoryCartStore::new()), gateway)
}

/// The worked example item from the reference scenario.
pub fn headphones_payload(customer_id: i64, product_id: i64) -> Value {
  json!({
    "customer_id": customer_id,
    "product_id": product_id,
    "quantity": 2,
    "price": "45.66",
    "text": "Headphones",
  })
}

pub fn payload_with_price(customer_id: i64, product_id: i64, price: &str) -> Value {
  json!({
    "customer_id": customer_id,
    "product_id": product_id,
    "quantity": 1,
    "price": price,
    "text": "Item",
  })
}
