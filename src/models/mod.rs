//! Data structures representing cart entities and their wire format.

pub mod cart_item;

pub use cart_item::{CartItem, CartItemData, CartState, MAX_TEXT_LEN};
