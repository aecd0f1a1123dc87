//! Key-value storage adapters for Tote.
//!
//! The cart store persists through the [`StorageAdapter`] trait: an
//! asynchronous string store addressed by key ("slot"). Two adapters ship
//! with the crate:
//!
//! - [`MemoryStorage`] - shared in-process map, used in tests and previews
//! - [`FileStorage`] - one file per key, written atomically
//!
//! [`TypedStorage`] layers JSON encoding on top of any adapter.
//!
//! # Example
//!
//! ```rust,ignore
//! use tote_storage::prelude::*;
//!
//! let storage = FileStorage::new("/data/app");
//! storage.set("cart-storage", "{}").await?;
//! let raw: Option<String> = storage.get("cart-storage").await?;
//! ```

mod adapter;
mod error;
mod file;
mod memory;
mod typed;

pub use adapter::{StorageAdapter, StorageResult};
pub use error::StorageError;
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use typed::TypedStorage;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        FileStorage, MemoryStorage, StorageAdapter, StorageError, StorageResult, TypedStorage,
    };
}
