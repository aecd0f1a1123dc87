//! Background persistence writer.
//!
//! Mutations publish the newest encoded cart on a `watch` channel. The
//! channel keeps only the latest value, so a burst of mutations collapses
//! into fewer writes while the final state is always the one written.

use std::sync::Arc;
use tokio::sync::watch;
use tote_storage::StorageAdapter;

/// Encoded cart waiting to be written.
#[derive(Debug, Clone, Default)]
pub(crate) struct PendingWrite {
    pub revision: u64,
    pub payload: String,
}

/// Outcome of the most recent write attempt.
#[derive(Debug, Clone, Default)]
pub(crate) struct WriteAck {
    pub revision: u64,
    pub error: Option<String>,
}

/// Start the writer for `slot`.
///
/// The task exits once every sender is dropped and the last pending value
/// has been written.
pub(crate) fn spawn<S>(
    storage: Arc<S>,
    slot: String,
    mut pending: watch::Receiver<PendingWrite>,
    acks: watch::Sender<WriteAck>,
)
where
    S: StorageAdapter + 'static,
{
    tokio::spawn(async move {
        while pending.changed().await.is_ok() {
            let write = pending.borrow_and_update().clone();
            let error = match storage.set(&slot, &write.payload).await {
                Ok(()) => {
                    tracing::debug!(slot = %slot, revision = write.revision, "persisted cart");
                    None
                }
                Err(e) => {
                    tracing::warn!(
                        slot = %slot,
                        revision = write.revision,
                        error = %e,
                        "failed to persist cart, keeping in-memory state"
                    );
                    Some(e.to_string())
                }
            };
            acks.send_replace(WriteAck {
                revision: write.revision,
                error,
            });
        }
        tracing::debug!(slot = %slot, "cart writer stopped");
    });
}
