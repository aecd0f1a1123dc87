//! Persistent shopping-cart store for Tote.
//!
//! [`CartStore`] owns the authoritative cart and keeps one storage slot in
//! sync with it:
//!
//! - **Rehydration** happens once in [`CartStore::open`], before the handle
//!   exists. Missing or malformed data yields an empty cart.
//! - **Mutations** (`add_item`, `increase_quantity`, `decrease_quantity`,
//!   `remove_item`, `clear_cart`) are synchronous and infallible.
//! - **Persistence** is fire-and-forget: after each mutation the full cart
//!   is encoded and handed to a background writer. Failures are logged with
//!   `tracing` and reported by [`CartStore::flush`].
//!
//! # Example
//!
//! ```rust,ignore
//! use tote_store::prelude::*;
//!
//! let store = CartStore::open_default(MemoryStorage::new()).await;
//! store.add_item(CartItem::new("p1", "T-Shirt", 19.99).with_option("size", "M"));
//! store.flush().await?;
//! ```

mod config;
pub mod envelope;
mod error;
mod store;
mod writer;

pub use config::{StoreConfig, DEFAULT_SLOT_KEY};
pub use error::StoreError;
pub use store::CartStore;

pub use tote_cart::{Cart, CartItem, ProductId};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CartStore, StoreConfig, StoreError, DEFAULT_SLOT_KEY};
    pub use tote_cart::prelude::*;
    pub use tote_storage::prelude::*;
}
