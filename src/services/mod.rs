//! Business logic and external collaborators.

pub mod cart_service;
pub mod order_gateway;

pub use cart_service::CartItemService;
pub use order_gateway::{HttpOrderGateway, OrderGateway, OrderRequest};
