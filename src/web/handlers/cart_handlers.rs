// src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
  /// Optional price ceiling; only items at or below it are returned.
  pub price: Option<Decimal>,
}

#[instrument(name = "handler::list_cart_items", skip(state))]
pub async fn list_cart_items_handler(
  state: web::Data<AppState>,
  customer_id: web::Path<i64>,
  query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
  let items = state.cart_service.list_for_customer(*customer_id, query.price).await?;
  Ok(HttpResponse::Ok().json(items))
}

#[instrument(name = "handler::get_cart_item", skip(state))]
pub async fn get_cart_item_handler(
  state: web::Data<AppState>,
  path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
  let (customer_id, product_id) = path.into_inner();
  let item = state.cart_service.get(customer_id, product_id).await?;
  Ok(HttpResponse::Ok().json(item))
}

#[instrument(name = "handler::create_cart_item", skip(state, body))]
pub async fn create_cart_item_handler(
  state: web::Data<AppState>,
  customer_id: web::Path<i64>,
  body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
  let body = body.into_inner();
  let item = state.cart_service.create(*customer_id, &body).await?;
  let location = format!("/shopcarts/{}/{}", item.customer_id, item.product_id);
  Ok(HttpResponse::Created().insert_header(("Location", location)).json(item))
}

#[instrument(name = "handler::update_cart_item", skip(state, body))]
pub async fn update_cart_item_handler(
  state: web::Data<AppState>,
  path: web::Path<(i64, i64)>,
  body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
  let (customer_id, product_id) = path.into_inner();
  let body = body.into_inner();
  let item = state.cart_service.update_quantity(customer_id, product_id, &body).await?;
  Ok(HttpResponse::Ok().json(item))
}

#[instrument(name = "handler::delete_cart_item", skip(state))]
pub async fn delete_cart_item_handler(
  state: web::Data<AppState>,
  path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
  let (customer_id, product_id) = path.into_inner();
  state.cart_service.delete(customer_id, product_id).await?;
  Ok(HttpResponse::NoContent().finish())
}

#[instrument(name = "handler::checkout_cart_item", skip(state))]
pub async fn checkout_handler(
  state: web::Data<AppState>,
  path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
  let (customer_id, product_id) = path.into_inner();
  // Checking out something that is not in the cart is a client error, unlike
  // plain retrieval where the same miss is a 404.
  let item = match state.cart_service.checkout(customer_id, product_id).await {
    Ok(item) => item,
    Err(AppError::NotFound(message)) => {
      return Ok(HttpResponse::BadRequest().json(json!({
        "status": 400,
        "error": "Bad Request",
        "message": message,
      })))
    }
    Err(err) => return Err(err),
  };
  Ok(HttpResponse::Ok().json(json!({
    "message": "Cart item checked out.",
    "data": item,
  })))
}

#[instrument(name = "handler::reset", skip(state))]
pub async fn reset_handler(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  state.cart_service.reset().await?;
  Ok(HttpResponse::NoContent().finish())
}
