// src/store/postgres.rs

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use super::{CartStore, NewCartItem};
use crate::errors::{AppError, Result};
use crate::models::CartItem;

// Keep in sync with schema.sql at the repository root.
const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS cart_items (
  id          BIGSERIAL PRIMARY KEY,
  customer_id BIGINT NOT NULL,
  product_id  BIGINT NOT NULL,
  quantity    INTEGER NOT NULL,
  price       NUMERIC(10, 2) NOT NULL,
  text        VARCHAR(150) NOT NULL,
  state       SMALLINT NOT NULL,
  CONSTRAINT uq_cart_items_customer_product UNIQUE (customer_id, product_id)
)";

const RETURNING: &str = "id, customer_id, product_id, quantity, price, text, state";

/// Durable backend over Postgres. The UNIQUE constraint on
/// (customer_id, product_id) is the authoritative dedup guard; a violation
/// surfaces as `Conflict`.
pub struct PgCartStore {
  pool: PgPool,
}

impl PgCartStore {
  pub async fn connect(database_url: &str) -> Result<Self> {
    let pool = PgPoolOptions::new().max_connections(5).connect(database_url).await?;
    Ok(Self { pool })
  }

  pub fn with_pool(pool: PgPool) -> Self {
    Self { pool }
  }

  /// Creates the cart_items table and its constraints if missing.
  pub async fn ensure_schema(&self) -> Result<()> {
    sqlx::query(SCHEMA).execute(&self.pool).await?;
    info!("Database schema ensured.");
    Ok(())
  }
}

#[async_trait]
impl CartStore for PgCartStore {
  async fn insert(&self, new: NewCartItem) -> Result<CartItem> {
    let query = format!(
      "INSERT INTO cart_items (customer_id, product_id, quantity, price, text, state) \
       VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
      RETURNING
    );
    let inserted = sqlx::query_as::<_, CartItem>(&query)
      .bind(new.customer_id)
      .bind(new.product_id)
      .bind(new.quantity)
      .bind(new.price)
      .bind(&new.text)
      .bind(new.state)
      .fetch_one(&self.pool)
      .await;

    match inserted {
      Ok(item) => Ok(item),
      Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(AppError::Conflict(format!(
        "cart item already exists for customer {} and product {}",
        new.customer_id, new.product_id
      ))),
      Err(err) => Err(err.into()),
    }
  }

  async fn find_by_customer_and_product(&self, customer_id: i64, product_id: i64) -> Result<Option<CartItem>> {
    let query = format!(
      "SELECT {} FROM cart_items WHERE customer_id = $1 AND product_id = $2",
      RETURNING
    );
    let item = sqlx::query_as::<_, CartItem>(&query)
      .bind(customer_id)
      .bind(product_id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(item)
  }

  async fn list_by_customer(&self, customer_id: i64) -> Result<Vec<CartItem>> {
    let query = format!("SELECT {} FROM cart_items WHERE customer_id = $1 ORDER BY id", RETURNING);
    let items = sqlx::query_as::<_, CartItem>(&query)
      .bind(customer_id)
      .fetch_all(&self.pool)
      .await?;
    Ok(items)
  }

  async fn list_by_customer_below_price(&self, customer_id: i64, max_price: Decimal) -> Result<Vec<CartItem>> {
    let query = format!(
      "SELECT {} FROM cart_items WHERE customer_id = $1 AND price <= $2 ORDER BY id",
      RETURNING
    );
    let items = sqlx::query_as::<_, CartItem>(&query)
      .bind(customer_id)
      .bind(max_price)
      .fetch_all(&self.pool)
      .await?;
    Ok(items)
  }

  async fn update(&self, item: &CartItem) -> Result<CartItem> {
    let query = format!(
      "UPDATE cart_items SET customer_id = $2, product_id = $3, quantity = $4, price = $5, text = $6, state = $7 \
       WHERE id = $1 RETURNING {}",
      RETURNING
    );
    let updated = sqlx::query_as::<_, CartItem>(&query)
      .bind(item.id)
      .bind(item.customer_id)
      .bind(item.product_id)
      .bind(item.quantity)
      .bind(item.price)
      .bind(&item.text)
      .bind(item.state)
      .fetch_optional(&self.pool)
      .await?;
    updated.ok_or_else(|| AppError::NotFound(format!("cart item with id {} was not found", item.id)))
  }

  async fn delete(&self, customer_id: i64, product_id: i64) -> Result<()> {
    // Idempotent: the affected-row count is deliberately ignored.
    sqlx::query("DELETE FROM cart_items WHERE customer_id = $1 AND product_id = $2")
      .bind(customer_id)
      .bind(product_id)
      .execute(&self.pool)
      .await?;
    Ok(())
  }

  async fn delete_all(&self) -> Result<()> {
    sqlx::query("DELETE FROM cart_items").execute(&self.pool).await?;
    Ok(())
  }
}
