// src/state.rs

use crate::services::CartItemService;

/// Shared with every handler through `web::Data`.
#[derive(Clone)]
pub struct AppState {
  pub cart_service: CartItemService,
}
