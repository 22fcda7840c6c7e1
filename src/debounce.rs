use log::debug;
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// A value delivered by a [`Debouncer`] once its quiet window elapsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debounced<T> {
    generation: u64,
    value: T,
}

/// Defers a value until no newer value has been scheduled for `delay`.
///
/// At most one commit is pending: scheduling again or cancelling aborts the
/// previous timer. A commit that already fired but was not yet consumed is
/// rejected by [`Debouncer::accept`] once superseded.
pub struct Debouncer<T> {
    delay: Duration,
    tx: UnboundedSender<Debounced<T>>,
    pending: Option<JoinHandle<()>>,
    generation: u64,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration) -> (Self, UnboundedReceiver<Debounced<T>>) {
        let (tx, rx) = unbounded_channel();
        let debouncer = Self {
            delay,
            tx,
            pending: None,
            generation: 0,
        };
        (debouncer, rx)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start a new quiet window for `value`, cancelling any pending one
    pub fn schedule(&mut self, value: T) {
        self.cancel();
        let generation = self.generation;
        let delay = self.delay;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            // receiver gone means the loop has shut down
            let _ = tx.send(Debounced { generation, value });
        }));
    }

    /// Drop the pending commit, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.generation += 1;
        match self.pending.take() {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                if was_pending {
                    debug!("Cancelled pending commit");
                }
                was_pending
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Unwrap a delivered commit if it is still the latest one
    pub fn accept(&mut self, commit: Debounced<T>) -> Option<T> {
        if commit.generation != self.generation || self.pending.is_none() {
            return None;
        }
        self.pending = None;
        Some(commit.value)
    }
}
