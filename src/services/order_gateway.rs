// src/services/order_gateway.rs

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::errors::{AppError, Result};
use crate::models::CartItem;

/// Notification sent to the external order system when an item checks out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRequest {
  pub customer_id: i64,
  pub product_id: i64,
  pub price: Decimal,
  pub quantity: i32,
}

impl From<&CartItem> for OrderRequest {
  fn from(item: &CartItem) -> Self {
    Self {
      customer_id: item.customer_id,
      product_id: item.product_id,
      price: item.price,
      quantity: item.quantity,
    }
  }
}

/// One synchronous notification per checkout; no retry, no backoff, no
/// idempotency key. The caller decides what a failure means.
#[async_trait]
pub trait OrderGateway: Send + Sync {
  async fn submit(&self, order: &OrderRequest) -> Result<()>;
}

/// `POST {order_host}/orders` with a bounded total timeout. Timeout expiry is
/// indistinguishable from any other transport failure for the caller.
pub struct HttpOrderGateway {
  client: reqwest::Client,
  orders_url: String,
}

impl HttpOrderGateway {
  pub fn new(order_host: &str, timeout: Duration) -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(timeout)
      .build()
      .map_err(|e| AppError::Config(format!("Failed to build order gateway client: {}", e)))?;
    Ok(Self {
      client,
      orders_url: format!("{}/orders", order_host.trim_end_matches('/')),
    })
  }
}

#[async_trait]
impl OrderGateway for HttpOrderGateway {
  #[instrument(
    name = "gateway::submit",
    skip(self, order),
    fields(customer_id = order.customer_id, product_id = order.product_id)
  )]
  async fn submit(&self, order: &OrderRequest) -> Result<()> {
    let response = self
      .client
      .post(&self.orders_url)
      .json(order)
      .send()
      .await
      .map_err(|e| AppError::Gateway(format!("order service unreachable: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
      return Err(AppError::Gateway(format!(
        "order service rejected the notification with status {}",
        status
      )));
    }
    debug!(status = %status, "Order notification accepted.");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::str::FromStr;

  #[test]
  fn order_request_copies_the_item_fields() {
    let item = CartItem {
      id: 3,
      customer_id: 1,
      product_id: 2,
      quantity: 4,
      price: Decimal::from_str("9.99").unwrap(),
      text: "Socks".to_string(),
      state: crate::models::CartState::Added,
    };
    let order = OrderRequest::from(&item);
    assert_eq!(order.customer_id, 1);
    assert_eq!(order.product_id, 2);
    assert_eq!(order.quantity, 4);
    assert_eq!(order.price, item.price);
  }

  #[tokio::test]
  async fn unreachable_order_service_is_a_gateway_error() {
    // Discard port; nothing listens there. The short timeout bounds the
    // attempt either way.
    let gateway = HttpOrderGateway::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
    let order = OrderRequest {
      customer_id: 1,
      product_id: 1,
      price: Decimal::from_str("45.66").unwrap(),
      quantity: 2,
    };
    let err = gateway.submit(&order).await.unwrap_err();
    assert!(matches!(err, AppError::Gateway(_)));
  }
}
