// src/models/cart_item.rs

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::errors::AppError;

/// Upper bound on the free-form description, matching the VARCHAR(150) column.
pub const MAX_TEXT_LEN: usize = 150;

/// Lifecycle stage of a cart item, stored and serialized as its integer code.
///
/// `Removed` is declared for wire compatibility but no operation currently
/// transitions into it; items leave the store by physical deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i16)]
#[serde(into = "i16", try_from = "i16")]
pub enum CartState {
  Added = 0,
  Removed = 1,
  Done = 2,
}

impl From<CartState> for i16 {
  fn from(state: CartState) -> i16 {
    state as i16
  }
}

impl TryFrom<i16> for CartState {
  type Error = String;

  fn try_from(code: i16) -> Result<Self, Self::Error> {
    match code {
      0 => Ok(CartState::Added),
      1 => Ok(CartState::Removed),
      2 => Ok(CartState::Done),
      other => Err(format!("unknown cart state code {}", other)),
    }
  }
}

/// One row per (customer_id, product_id) pairing while the item is in the
/// store. `id` and `state` are store-managed and never taken from a payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CartItem {
  pub id: i64,
  pub customer_id: i64,
  pub product_id: i64,
  pub quantity: i32,
  /// Serialized as a string with two fractional digits, e.g. "45.66".
  pub price: Decimal,
  pub text: String,
  pub state: CartState,
}

/// Validated creation payload. Built field by field from loose JSON so a
/// missing or wrong-typed field produces a `Validation` error naming it.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemData {
  pub customer_id: i64,
  pub product_id: i64,
  pub quantity: i32,
  pub price: Decimal,
  pub text: String,
}

impl CartItemData {
  pub fn from_json(body: &Value) -> Result<Self, AppError> {
    if !body.is_object() {
      return Err(AppError::Validation("body of request contained bad or no data".to_string()));
    }

    let customer_id = require_integer(body, "customer_id")?;
    let product_id = require_integer(body, "product_id")?;

    let quantity = require_integer(body, "quantity")?;
    if quantity < 1 {
      return Err(AppError::Validation("field 'quantity' must be at least 1".to_string()));
    }
    let quantity = i32::try_from(quantity)
      .map_err(|_| AppError::Validation("field 'quantity' is out of range".to_string()))?;

    let price = require_price(body)?;
    let text = require_text(body)?;

    Ok(Self {
      customer_id,
      product_id,
      quantity,
      price,
      text,
    })
  }
}

fn require_field<'a>(body: &'a Value, field: &str) -> Result<&'a Value, AppError> {
  body
    .get(field)
    .ok_or_else(|| AppError::Validation(format!("missing field '{}'", field)))
}

fn require_integer(body: &Value, field: &str) -> Result<i64, AppError> {
  require_field(body, field)?
    .as_i64()
    .ok_or_else(|| AppError::Validation(format!("field '{}' must be an integer", field)))
}

// Accepts the price as either a JSON string ("45.66") or a JSON number;
// the stored value always carries exactly two fractional digits.
fn require_price(body: &Value) -> Result<Decimal, AppError> {
  let raw = require_field(body, "price")?;
  let parsed = match raw {
    Value::String(s) => Decimal::from_str(s).ok(),
    Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
    _ => None,
  };
  let mut price =
    parsed.ok_or_else(|| AppError::Validation("field 'price' must be a decimal number".to_string()))?;
  if price.is_sign_negative() && !price.is_zero() {
    return Err(AppError::Validation("field 'price' must not be negative".to_string()));
  }
  price.rescale(2);
  Ok(price)
}

fn require_text(body: &Value) -> Result<String, AppError> {
  let text = require_field(body, "text")?
    .as_str()
    .ok_or_else(|| AppError::Validation("field 'text' must be a string".to_string()))?;
  if text.chars().count() > MAX_TEXT_LEN {
    return Err(AppError::Validation(format!(
      "field 'text' must be at most {} characters",
      MAX_TEXT_LEN
    )));
  }
  Ok(text.to_string())
}
