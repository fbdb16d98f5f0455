// src/web/routes.rs

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::errors::AppError;
use crate::web::handlers::cart_handlers;

/// Root URL response; doubles as a liveness probe.
async fn index_handler() -> HttpResponse {
  HttpResponse::Ok().json(json!({
    "name": "Shop cart service",
    "version": "1.0",
    "resource": "/shopcarts",
  }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    // An unparseable path segment (e.g. /shopcarts/hello) means the resource
    // does not exist, not that the request was malformed.
    .app_data(web::PathConfig::default().error_handler(|err, _req| AppError::NotFound(err.to_string()).into()))
    .route("/", web::get().to(index_handler))
    .service(
      web::scope("/shopcarts")
        // Registered ahead of the parameterized resources so "reset" is
        // never read as a customer id.
        .service(web::resource("/reset").route(web::delete().to(cart_handlers::reset_handler)))
        .service(
          web::resource("/{customer_id}")
            .route(web::get().to(cart_handlers::list_cart_items_handler))
            .route(web::post().to(cart_handlers::create_cart_item_handler)),
        )
        .service(
          web::resource("/{customer_id}/{product_id}")
            .route(web::get().to(cart_handlers::get_cart_item_handler))
            .route(web::put().to(cart_handlers::update_cart_item_handler))
            .route(web::delete().to(cart_handlers::delete_cart_item_handler)),
        )
        .service(
          web::resource("/{customer_id}/{product_id}/checkout")
            .route(web::put().to(cart_handlers::checkout_handler)),
        ),
    );
}
