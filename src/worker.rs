use tokio::sync::mpsc;

mod counter;
mod price;

pub use counter::{CounterError, CounterEvent, CounterWorker, DEFAULT_MAXIMUM};
pub use price::{HttpPriceSource, PriceError, PriceEvent, PriceSource, PriceTimerWorker};

/// Everything a worker can report back to the window.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerEvent {
    Counter(CounterEvent),
    Price(PriceEvent),
    /// The price worker hit an error and its loop has ended.
    PriceStopped(String),
}

pub type EventReceiver = mpsc::UnboundedReceiver<WorkerEvent>;

/// Sending half of the worker event channel.
///
/// Cloned into every worker. Events are handled by whoever polls the
/// matching [`EventReceiver`], which is the UI loop in the running app.
#[derive(Debug, Clone)]
pub struct Emitter {
    tx: mpsc::UnboundedSender<WorkerEvent>,
}

impl Emitter {
    pub fn channel() -> (Self, EventReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn emit(&self, event: WorkerEvent) {
        // the receiver only goes away when the app is shutting down
        let _ = self.tx.send(event);
    }
}
