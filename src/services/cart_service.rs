// src/services/cart_service.rs

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::errors::{AppError, Result};
use crate::models::{CartItem, CartItemData, CartState};
use crate::services::order_gateway::{OrderGateway, OrderRequest};
use crate::store::{CartStore, NewCartItem};

/// Business rules for the cart-item lifecycle: dedup on create, bounded
/// quantity updates, price-filtered listing, idempotent delete and checkout
/// orchestration. Store and gateway are injected; the service keeps no state
/// of its own and never caches rows across calls.
#[derive(Clone)]
pub struct CartItemService {
  store: Arc<dyn CartStore>,
  gateway: Arc<dyn OrderGateway>,
}

impl CartItemService {
  pub fn new(store: Arc<dyn CartStore>, gateway: Arc<dyn OrderGateway>) -> Self {
    Self { store, gateway }
  }

  /// Validates the payload, requires its customer_id to match the path
  /// customer, and inserts the row as ADDED. A pairing that already exists
  /// surfaces as `Conflict` out of the store's uniqueness guard.
  #[instrument(name = "cart::create", skip(self, payload))]
  pub async fn create(&self, customer_id: i64, payload: &Value) -> Result<CartItem> {
    let data = CartItemData::from_json(payload)?;
    if data.customer_id != customer_id {
      return Err(AppError::CustomerMismatch {
        path: customer_id,
        payload: data.customer_id,
      });
    }
    let item = self.store.insert(NewCartItem::added(data)).await?;
    info!(item_id = item.id, "Cart item created.");
    Ok(item)
  }

  /// Replaces the item's quantity with the integer in `body["quantity"]`.
  /// Anything that is not an integer >= 1 fails with `InvalidQuantity` and
  /// leaves the stored row untouched. A successful update forces the item
  /// back to ADDED.
  #[instrument(name = "cart::update_quantity", skip(self, body))]
  pub async fn update_quantity(&self, customer_id: i64, product_id: i64, body: &Value) -> Result<CartItem> {
    let quantity = parse_requested_quantity(body)?;
    let mut item = self.require_item(customer_id, product_id).await?;
    item.quantity = quantity;
    item.state = CartState::Added; // an update always re-activates the item
    let item = self.store.update(&item).await?;
    info!(item_id = item.id, quantity = item.quantity, "Cart item quantity updated.");
    Ok(item)
  }

  /// All items for the customer, optionally only those at or below
  /// `max_price`. An empty result is a valid result.
  #[instrument(name = "cart::list", skip(self))]
  pub async fn list_for_customer(&self, customer_id: i64, max_price: Option<Decimal>) -> Result<Vec<CartItem>> {
    match max_price {
      Some(max_price) => self.store.list_by_customer_below_price(customer_id, max_price).await,
      None => self.store.list_by_customer(customer_id).await,
    }
  }

  #[instrument(name = "cart::get", skip(self))]
  pub async fn get(&self, customer_id: i64, product_id: i64) -> Result<CartItem> {
    self.require_item(customer_id, product_id).await
  }

  /// Idempotent: deleting an absent pairing succeeds without complaint.
  #[instrument(name = "cart::delete", skip(self))]
  pub async fn delete(&self, customer_id: i64, product_id: i64) -> Result<()> {
    self.store.delete(customer_id, product_id).await?;
    debug!("Cart item deleted if it was present.");
    Ok(())
  }

  /// Moves the item to its terminal DONE state and notifies the order
  /// system. The notification is best-effort: a gateway failure is logged
  /// and swallowed here so checkout never depends on order-system
  /// availability. The state write and the notification are not atomic.
  #[instrument(name = "cart::checkout", skip(self))]
  pub async fn checkout(&self, customer_id: i64, product_id: i64) -> Result<CartItem> {
    let mut item = self.require_item(customer_id, product_id).await?;

    let order = OrderRequest::from(&item);
    if let Err(err) = self.gateway.submit(&order).await {
      warn!(error = %err, "Order notification failed; completing checkout anyway.");
    }

    item.state = CartState::Done;
    let item = self.store.update(&item).await?;
    info!(item_id = item.id, "Cart item checked out.");
    Ok(item)
  }

  /// Clears every row. Administrative operation, not part of the
  /// customer-facing contract.
  #[instrument(name = "cart::reset", skip(self))]
  pub async fn reset(&self) -> Result<()> {
    self.store.delete_all().await?;
    info!("All cart items removed.");
    Ok(())
  }

  async fn require_item(&self, customer_id: i64, product_id: i64) -> Result<CartItem> {
    self
      .store
      .find_by_customer_and_product(customer_id, product_id)
      .await?
      .ok_or_else(|| {
        AppError::NotFound(format!(
          "cart item for customer {} and product {} was not found",
          customer_id, product_id
        ))
      })
  }
}

fn parse_requested_quantity(body: &Value) -> Result<i32> {
  let raw = body
    .get("quantity")
    .ok_or_else(|| AppError::InvalidQuantity("missing field 'quantity'".to_string()))?;
  let quantity = raw
    .as_i64()
    .ok_or_else(|| AppError::InvalidQuantity("quantity must be an integer".to_string()))?;
  if quantity < 1 {
    return Err(AppError::InvalidQuantity("quantity must be at least 1".to_string()));
  }
  i32::try_from(quantity).map_err(|_| AppError::InvalidQuantity("quantity is out of range".to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn quantity_must_be_a_positive_integer() {
    assert!(parse_requested_quantity(&json!({"quantity": 1})).is_ok());
    assert!(parse_requested_quantity(&json!({"quantity": 9999})).is_ok());
    assert!(matches!(
      parse_requested_quantity(&json!({"quantity": 0})),
      Err(AppError::InvalidQuantity(_))
    ));
    assert!(matches!(
      parse_requested_quantity(&json!({"quantity": -3})),
      Err(AppError::InvalidQuantity(_))
    ));
    assert!(matches!(
      parse_requested_quantity(&json!({"quantity": 2.5})),
      Err(AppError::InvalidQuantity(_))
    ));
    assert!(matches!(
      parse_requested_quantity(&json!({"quantity": "ten"})),
      Err(AppError::InvalidQuantity(_))
    ));
    assert!(matches!(
      parse_requested_quantity(&json!({})),
      Err(AppError::InvalidQuantity(_))
    ));
  }
}
