//! Cart domain types and state transitions for Tote.
//!
//! This crate has no I/O. It provides:
//!
//! - **CartItem**: a purchasable line with an optional option selection
//! - **Cart**: the ordered line list and its five transitions
//!   (add, increase, decrease, remove, clear)
//!
//! Two items are the same line when their product id and option selection
//! are both equal, so one product can appear on several lines.
//!
//! # Example
//!
//! ```rust
//! use tote_cart::prelude::*;
//!
//! let mut cart = Cart::new();
//! cart.add_item(CartItem::new("p1", "T-Shirt", 19.99).with_option("color", "Red"));
//! cart.add_item(CartItem::new("p1", "T-Shirt", 19.99).with_option("color", "Blue"));
//!
//! assert_eq!(cart.unique_item_count(), 2);
//! ```

pub mod cart;
pub mod ids;

pub use cart::{Cart, CartItem, ItemOptions, LineKey};
pub use ids::ProductId;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{Cart, CartItem, ItemOptions, LineKey};
    pub use crate::ids::ProductId;
}
