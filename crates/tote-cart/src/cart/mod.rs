//! Shopping cart module.
//!
//! Contains the cart aggregate, its line items and line identity.

mod cart;
mod item;

pub use cart::Cart;
pub use item::{CartItem, ItemOptions, LineKey};
