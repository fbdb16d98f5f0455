//! Shop cart service.
//!
//! Tracks per-customer cart line items and moves them through a small
//! lifecycle (added -> checked out), notifying an external order system on
//! checkout on a best-effort basis. The pieces:
//!  - `store`: the `CartStore` persistence seam (Postgres or in-memory);
//!    owns the (customer_id, product_id) uniqueness guard.
//!  - `services`: `CartItemService` business rules and the `OrderGateway`
//!    client for the downstream order system.
//!  - `web`: the actix-web route table and request handlers.
//!  - `models`, `errors`, `config`, `state`: data model, error taxonomy,
//!    environment configuration, shared application state.

pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
pub mod web;
