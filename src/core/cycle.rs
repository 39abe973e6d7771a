//! Fetch cycles with per-cycle cancellation.
//!
//! Every load of a page begins a new cycle. Beginning a cycle cancels the
//! previous one, and a settled result is applied only when it belongs to the
//! current cycle, so a slow earlier response can never overwrite newer state.

use futures::future::BoxFuture;
use tokio::sync::watch;

/// Cancellation signal for one fetch cycle.
///
/// A cycle counts as cancelled once it is explicitly cancelled or once its
/// owner has been dropped.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolves when the cycle is cancelled
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct CycleTicket {
    pub generation: u64,
    pub token: CancelToken,
}

/// Tracks the current cycle of one page.
#[derive(Debug, Default)]
pub struct FetchCycles {
    generation: u64,
    active: Option<watch::Sender<bool>>,
}

impl FetchCycles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the in-flight cycle, if any, and start the next one
    pub fn begin(&mut self) -> CycleTicket {
        self.cancel();
        self.generation += 1;
        let (tx, rx) = watch::channel(false);
        self.active = Some(tx);
        CycleTicket {
            generation: self.generation,
            token: CancelToken { rx },
        }
    }

    pub fn cancel(&mut self) {
        if let Some(tx) = self.active.take() {
            let _ = tx.send(true);
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while `generation` is the in-flight cycle
    pub fn is_current(&self, generation: u64) -> bool {
        self.active.is_some() && generation == self.generation
    }

    /// Close the cycle `generation`. Returns false for stale or already
    /// closed cycles, whose results must be discarded.
    pub fn finish(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.active = None;
        true
    }
}

impl Drop for FetchCycles {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Requests of one cycle, not yet started.
///
/// The future owns everything it needs, so a fetch can be awaited, raced
/// against user input or dropped without borrowing the page.
pub struct Fetch<O> {
    ticket: CycleTicket,
    future: BoxFuture<'static, O>,
}

/// Output of a fetch. `outcome` is `None` when the cycle was cancelled
/// before the requests completed.
#[derive(Debug)]
pub struct Settled<O> {
    pub generation: u64,
    pub outcome: Option<O>,
}

impl<O> Fetch<O> {
    pub fn new(ticket: CycleTicket, future: BoxFuture<'static, O>) -> Self {
        Self { ticket, future }
    }

    pub fn generation(&self) -> u64 {
        self.ticket.generation
    }

    pub async fn run(self) -> Settled<O> {
        let Fetch { ticket, future } = self;
        let CycleTicket {
            generation,
            mut token,
        } = ticket;

        if token.is_cancelled() {
            return Settled {
                generation,
                outcome: None,
            };
        }

        let outcome = tokio::select! {
            _ = token.cancelled() => None,
            output = future => Some(output),
        };

        Settled {
            generation,
            outcome,
        }
    }
}
