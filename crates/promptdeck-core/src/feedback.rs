//! Per-prompt "just copied" flags that revert on their own.
//!
//! Each copy spawns a one-shot timer task. The task does not touch the flags
//! itself; it sends an [`Expired`] message that the owner passes back to
//! [`CopyFeedback::expire`], so every mutation happens on the owner's side.
//! A newer copy of the same id aborts the previous timer, and the generation
//! stamp makes any message that was already in flight a no-op.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// How long a prompt stays marked as copied.
pub const COPY_FEEDBACK_WINDOW: Duration = Duration::from_millis(2000);

/// Sent when a copy flag's window has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expired {
    pub id: String,
    generation: u64,
}

struct PendingRevert {
    generation: u64,
    handle: JoinHandle<()>,
}

pub struct CopyFeedback {
    window: Duration,
    next_generation: u64,
    pending: HashMap<String, PendingRevert>,
    tx: mpsc::UnboundedSender<Expired>,
}

impl CopyFeedback {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Expired>) {
        Self::with_window(COPY_FEEDBACK_WINDOW)
    }

    pub fn with_window(window: Duration) -> (Self, mpsc::UnboundedReceiver<Expired>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let feedback = Self {
            window,
            next_generation: 0,
            pending: HashMap::new(),
            tx,
        };
        (feedback, rx)
    }

    /// Set the flag for `id` and (re)start its revert timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mark_copied(&mut self, id: &str) {
        self.next_generation += 1;
        let generation = self.next_generation;

        if let Some(previous) = self.pending.remove(id) {
            previous.handle.abort();
            tracing::trace!("Restarted copy feedback window for prompt {}", id);
        }

        let tx = self.tx.clone();
        let window = self.window;
        let expired = Expired {
            id: id.to_string(),
            generation,
        };
        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            // Receiver gone means the owner shut down
            let _ = tx.send(expired);
        });

        self.pending
            .insert(id.to_string(), PendingRevert { generation, handle });
    }

    /// Clear the flag named by `expired` unless a newer copy superseded it.
    /// Returns true when the flag was cleared.
    pub fn expire(&mut self, expired: Expired) -> bool {
        match self.pending.get(&expired.id) {
            Some(pending) if pending.generation == expired.generation => {
                self.pending.remove(&expired.id);
                true
            }
            _ => false,
        }
    }

    pub fn is_copied(&self, id: &str) -> bool {
        self.pending.contains_key(id)
    }

    pub fn copied_count(&self) -> usize {
        self.pending.len()
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Drop for CopyFeedback {
    fn drop(&mut self) {
        for pending in self.pending.values() {
            pending.handle.abort();
        }
    }
}
