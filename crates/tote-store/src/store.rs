//! The persistent cart store.

use crate::config::StoreConfig;
use crate::envelope::{self, Envelope};
use crate::writer::{self, PendingWrite, WriteAck};
use crate::StoreError;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tote_cart::{Cart, CartItem};
use tote_storage::{StorageAdapter, StorageError, TypedStorage};

/// Attempts `rehydrate` makes before giving up on a cart that keeps changing.
const MAX_REHYDRATE_ATTEMPTS: u32 = 3;

/// Owned handle to the cart.
///
/// Mutations apply synchronously to the in-memory cart and never fail;
/// each one then hands the whole encoded cart to a background writer.
/// Storage failures are logged and reported through [`CartStore::flush`],
/// never rolled back into memory.
///
/// Cloning the handle is cheap and every clone sees the same cart.
///
/// # Example
///
/// ```rust,ignore
/// let store = CartStore::open(FileStorage::new(dir), StoreConfig::default()).await;
/// store.add_item(CartItem::new("p1", "T-Shirt", 19.99).with_option("color", "Red"));
/// store.flush().await?;
/// ```
pub struct CartStore<S> {
    shared: Arc<Shared<S>>,
}

struct Shared<S> {
    storage: TypedStorage<Arc<S>>,
    config: StoreConfig,
    state: Mutex<State>,
    observers: watch::Sender<Cart>,
    persistence: Option<Persistence>,
}

struct State {
    cart: Cart,
    revision: u64,
}

struct Persistence {
    pending: watch::Sender<PendingWrite>,
    acks: watch::Receiver<WriteAck>,
}

impl<S> Clone for CartStore<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S> CartStore<S>
where
    S: StorageAdapter + 'static,
{
    /// Open the store, rehydrating the cart from storage.
    ///
    /// The handle is only returned once rehydration has finished, so no
    /// mutation can ever race a pending load. A missing, unreadable or
    /// malformed slot yields an empty cart.
    pub async fn open(storage: S, config: StoreConfig) -> Self {
        let storage = TypedStorage::new(Arc::new(storage));

        let cart = if config.persist {
            load_cart(&storage, &config.slot_key).await
        } else {
            Cart::new()
        };

        let persistence = config.persist.then(|| {
            let (pending_tx, pending_rx) = watch::channel(PendingWrite::default());
            let (ack_tx, ack_rx) = watch::channel(WriteAck::default());
            writer::spawn(
                Arc::clone(storage.adapter()),
                config.slot_key.clone(),
                pending_rx,
                ack_tx,
            );
            Persistence {
                pending: pending_tx,
                acks: ack_rx,
            }
        });

        let (observers, _) = watch::channel(cart.clone());

        Self {
            shared: Arc::new(Shared {
                storage,
                config,
                state: Mutex::new(State { cart, revision: 0 }),
                observers,
                persistence,
            }),
        }
    }

    /// Open with the default configuration (slot `"cart-storage"`).
    pub async fn open_default(storage: S) -> Self {
        Self::open(storage, StoreConfig::default()).await
    }

    /// Add an item, merging it into an existing line with the same
    /// id and options.
    pub fn add_item(&self, item: CartItem) -> bool {
        self.mutate("add_item", |cart| cart.add_item(item))
    }

    /// Increase an existing line's quantity by one.
    pub fn increase_quantity(&self, item: &CartItem) -> bool {
        self.mutate("increase_quantity", |cart| cart.increase_quantity(item))
    }

    /// Decrease an existing line's quantity by one, removing it at zero.
    pub fn decrease_quantity(&self, item: &CartItem) -> bool {
        self.mutate("decrease_quantity", |cart| cart.decrease_quantity(item))
    }

    /// Remove a line regardless of quantity.
    pub fn remove_item(&self, item: &CartItem) -> bool {
        self.mutate("remove_item", |cart| cart.remove_item(item))
    }

    /// Empty the cart. The slot is overwritten with an empty cart, not deleted.
    pub fn clear_cart(&self) -> bool {
        self.mutate("clear_cart", Cart::clear)
    }

    /// Current lines, in display order.
    pub fn items(&self) -> Vec<CartItem> {
        self.lock().cart.items.clone()
    }

    /// Copy of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.lock().cart.clone()
    }

    /// Watch the cart. The receiver is notified after every change.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.shared.observers.subscribe()
    }

    /// Active configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.shared.config
    }

    /// Wait until the latest mutation has been written.
    ///
    /// Returns the outcome of that write attempt. A failure here does not
    /// affect the in-memory cart; the next mutation writes again.
    pub async fn flush(&self) -> Result<(), StoreError> {
        let Some(persistence) = &self.shared.persistence else {
            return Ok(());
        };

        let target = self.lock().revision;
        let mut acks = persistence.acks.clone();
        loop {
            {
                let ack = acks.borrow_and_update();
                if ack.revision >= target {
                    return match &ack.error {
                        Some(e) => Err(StoreError::WriteFailed(e.clone())),
                        None => Ok(()),
                    };
                }
            }
            acks.changed()
                .await
                .map_err(|_| StoreError::WriterStopped)?;
        }
    }

    /// Error of the most recent write attempt, if it failed.
    pub fn last_write_error(&self) -> Option<String> {
        self.shared
            .persistence
            .as_ref()
            .and_then(|p| p.acks.borrow().error.clone())
    }

    /// Delete the persisted slot, leaving the in-memory cart untouched.
    ///
    /// Pending writes are flushed first so they cannot recreate the slot.
    /// The next mutation persists again. Memory-only stores never touch
    /// storage.
    pub async fn clear_storage(&self) -> Result<(), StoreError> {
        if !self.shared.config.persist {
            return Ok(());
        }
        if let Err(e) = self.flush().await {
            tracing::debug!(error = %e, "pending write failed before clearing storage");
        }
        self.shared.storage.remove(&self.shared.config.slot_key).await?;
        tracing::debug!(slot = %self.shared.config.slot_key, "cleared persisted cart");
        Ok(())
    }

    /// Reload the cart from storage, replacing the in-memory cart.
    ///
    /// Falls back to an empty cart like [`CartStore::open`] does. Nothing
    /// is written back.
    ///
    /// The loaded cart is only installed if no mutation ran while the slot
    /// was being read; otherwise the read is retried after the newer state
    /// has been flushed. Returns `ConcurrentModification` if the cart keeps
    /// changing, leaving memory as it is.
    pub async fn rehydrate(&self) -> Result<(), StoreError> {
        if !self.shared.config.persist {
            return Ok(());
        }

        for attempt in 0..MAX_REHYDRATE_ATTEMPTS {
            let expected_revision = self.lock().revision;
            if let Err(e) = self.flush().await {
                tracing::debug!(error = %e, "pending write failed before rehydrating");
            }

            let cart = load_cart(&self.shared.storage, &self.shared.config.slot_key).await;

            let mut state = self.lock();
            if state.revision == expected_revision {
                state.cart = cart;
                self.shared.observers.send_replace(state.cart.clone());
                return Ok(());
            }
            tracing::debug!(
                attempt,
                expected_revision,
                revision = state.revision,
                "cart changed while rehydrating, retrying"
            );
        }

        Err(StoreError::ConcurrentModification(
            "cart changed during every rehydrate attempt".to_string(),
        ))
    }

    fn mutate(&self, op: &'static str, f: impl FnOnce(&mut Cart) -> bool) -> bool {
        let mut state = self.lock();
        let changed = f(&mut state.cart);
        state.revision += 1;

        if changed {
            self.shared.observers.send_replace(state.cart.clone());
        }
        self.persist(state.revision, &state.cart);

        tracing::debug!(
            op,
            changed,
            revision = state.revision,
            lines = state.cart.unique_item_count(),
            "cart mutated"
        );
        changed
    }

    /// Publish the encoded cart to the writer. Runs under the state lock,
    /// so revisions reach the writer in call order.
    fn persist(&self, revision: u64, cart: &Cart) {
        let Some(persistence) = &self.shared.persistence else {
            return;
        };

        match envelope::encode(cart) {
            Ok(payload) => {
                persistence
                    .pending
                    .send_replace(PendingWrite { revision, payload });
            }
            Err(e) => {
                tracing::warn!(revision, error = %e, "failed to encode cart, skipping write");
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Read and decode the slot, falling back to an empty cart.
async fn load_cart<S: StorageAdapter>(storage: &TypedStorage<S>, slot: &str) -> Cart {
    let envelope = match storage.get::<Envelope<Cart>>(slot).await {
        Ok(Some(envelope)) => envelope,
        Ok(None) => {
            tracing::debug!(slot, "no persisted cart, starting empty");
            return Cart::new();
        }
        Err(StorageError::Serialization(e)) => {
            tracing::warn!(slot, error = %e, "discarding malformed persisted cart");
            return Cart::new();
        }
        Err(e) => {
            tracing::warn!(slot, error = %e, "failed to read persisted cart, starting empty");
            return Cart::new();
        }
    };

    match envelope.into_cart() {
        Ok(cart) => {
            tracing::debug!(slot, lines = cart.unique_item_count(), "rehydrated cart");
            cart
        }
        Err(e) => {
            tracing::warn!(slot, error = %e, "discarding malformed persisted cart");
            Cart::new()
        }
    }
}
