// src/store/memory.rs

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use rust_decimal::Decimal;

use super::{CartStore, NewCartItem};
use crate::errors::{AppError, Result};
use crate::models::CartItem;

/// Volatile backend keyed by (customer_id, product_id). The occupied map
/// entry is the uniqueness guard, checked and claimed under one write lock.
#[derive(Debug, Default)]
pub struct MemoryCartStore {
  inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
  rows: HashMap<(i64, i64), CartItem>,
  next_id: i64,
}

impl MemoryCartStore {
  pub fn new() -> Self {
    Self::default()
  }
}

fn conflict(customer_id: i64, product_id: i64) -> AppError {
  AppError::Conflict(format!(
    "cart item already exists for customer {} and product {}",
    customer_id, product_id
  ))
}

#[async_trait]
impl CartStore for MemoryCartStore {
  async fn insert(&self, new: NewCartItem) -> Result<CartItem> {
    let mut inner = self.inner.write();
    let key = (new.customer_id, new.product_id);
    if inner.rows.contains_key(&key) {
      return Err(conflict(new.customer_id, new.product_id));
    }
    inner.next_id += 1;
    let item = CartItem {
      id: inner.next_id,
      customer_id: new.customer_id,
      product_id: new.product_id,
      quantity: new.quantity,
      price: new.price,
      text: new.text,
      state: new.state,
    };
    inner.rows.insert(key, item.clone());
    Ok(item)
  }

  async fn find_by_customer_and_product(&self, customer_id: i64, product_id: i64) -> Result<Option<CartItem>> {
    Ok(self.inner.read().rows.get(&(customer_id, product_id)).cloned())
  }

  async fn list_by_customer(&self, customer_id: i64) -> Result<Vec<CartItem>> {
    let inner = self.inner.read();
    let mut items: Vec<CartItem> = inner
      .rows
      .values()
      .filter(|item| item.customer_id == customer_id)
      .cloned()
      .collect();
    items.sort_by_key(|item| item.id);
    Ok(items)
  }

  async fn list_by_customer_below_price(&self, customer_id: i64, max_price: Decimal) -> Result<Vec<CartItem>> {
    let inner = self.inner.read();
    let mut items: Vec<CartItem> = inner
      .rows
      .values()
      .filter(|item| item.customer_id == customer_id && item.price <= max_price)
      .cloned()
      .collect();
    items.sort_by_key(|item| item.id);
    Ok(items)
  }

  async fn update(&self, item: &CartItem) -> Result<CartItem> {
    let mut inner = self.inner.write();
    let old_key = inner
      .rows
      .iter()
      .find(|(_, row)| row.id == item.id)
      .map(|(key, _)| *key);
    let Some(old_key) = old_key else {
      return Err(AppError::NotFound(format!("cart item with id {} was not found", item.id)));
    };
    inner.rows.remove(&old_key);
    inner.rows.insert((item.customer_id, item.product_id), item.clone());
    Ok(item.clone())
  }

  async fn delete(&self, customer_id: i64, product_id: i64) -> Result<()> {
    self.inner.write().rows.remove(&(customer_id, product_id));
    Ok(())
  }

  async fn delete_all(&self) -> Result<()> {
    let mut inner = self.inner.write();
    inner.rows.clear();
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::CartState;
  use std::str::FromStr;

  fn new_item(customer_id: i64, product_id: i64) -> NewCartItem {
    NewCartItem {
      customer_id,
      product_id,
      quantity: 2,
      price: Decimal::from_str("45.66").unwrap(),
      text: "Headphones".to_string(),
      state: CartState::Added,
    }
  }

  #[tokio::test]
  async fn insert_assigns_increasing_ids() {
    let store = MemoryCartStore::new();
    let first = store.insert(new_item(1, 1)).await.unwrap();
    let second = store.insert(new_item(1, 2)).await.unwrap();
    assert!(second.id > first.id);
  }

  #[tokio::test]
  async fn second_insert_for_the_same_pair_conflicts() {
    let store = MemoryCartStore::new();
    store.insert(new_item(1, 1)).await.unwrap();
    let err = store.insert(new_item(1, 1)).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
  }

  #[tokio::test]
  async fn update_of_a_vanished_id_is_not_found() {
    let store = MemoryCartStore::new();
    let mut item = store.insert(new_item(1, 1)).await.unwrap();
    store.delete(1, 1).await.unwrap();
    item.quantity = 5;
    let err = store.update(&item).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
  }

  #[tokio::test]
  async fn delete_of_an_absent_pair_is_a_noop() {
    let store = MemoryCartStore::new();
    store.insert(new_item(1, 1)).await.unwrap();
    store.delete(2, 2).await.unwrap();
    assert_eq!(store.list_by_customer(1).await.unwrap().len(), 1);
  }
}
