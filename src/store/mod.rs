//! Persistence seam for cart-item rows.
//!
//! The store owns the uniqueness of (customer_id, product_id): `insert` must
//! fail with `Conflict` out of the backend's own guard (unique constraint or
//! map entry), so two concurrent creates for the same pairing cannot both
//! succeed through a check-then-act in the service.

mod memory;
mod postgres;

pub use memory::MemoryCartStore;
pub use postgres::PgCartStore;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::models::{CartItem, CartItemData, CartState};

/// Row about to be inserted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewCartItem {
  pub customer_id: i64,
  pub product_id: i64,
  pub quantity: i32,
  pub price: Decimal,
  pub text: String,
  pub state: CartState,
}

impl NewCartItem {
  /// A validated payload entering the cart always starts out ADDED.
  pub fn added(data: CartItemData) -> Self {
    Self {
      customer_id: data.customer_id,
      product_id: data.product_id,
      quantity: data.quantity,
      price: data.price,
      text: data.text,
      state: CartState::Added,
    }
  }
}

#[async_trait]
pub trait CartStore: Send + Sync {
  /// Fails with `Conflict` if a row for (customer_id, product_id) exists.
  async fn insert(&self, new: NewCartItem) -> Result<CartItem>;

  async fn find_by_customer_and_product(&self, customer_id: i64, product_id: i64) -> Result<Option<CartItem>>;

  async fn list_by_customer(&self, customer_id: i64) -> Result<Vec<CartItem>>;

  /// Every returned item satisfies `price <= max_price`.
  async fn list_by_customer_below_price(&self, customer_id: i64, max_price: Decimal) -> Result<Vec<CartItem>>;

  /// Full replace of the row identified by `item.id`; `NotFound` if gone.
  async fn update(&self, item: &CartItem) -> Result<CartItem>;

  /// No-op, not an error, when the row is absent.
  async fn delete(&self, customer_id: i64, product_id: i64) -> Result<()>;

  /// Clears the store. Administrative/test use only.
  async fn delete_all(&self) -> Result<()>;
}
