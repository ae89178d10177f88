use super::{Emitter, WorkerEvent};
use serde::Serialize;
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_MAXIMUM: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CounterEvent {
    #[serde(rename = "counter")]
    pub count: u32,
    pub maximum: u32,
}

impl Display for CounterEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => write!(f, "{json}"),
            Err(_) => write!(f, "counter {} of {}", self.count, self.maximum),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CounterError {
    #[error("one thread is already running!")]
    AlreadyRunning,
}

/// Counts from zero up to `maximum`, one event per tick.
///
/// Only one run can be in flight at a time. A run cannot be cancelled once
/// started.
#[derive(Debug, Clone)]
pub struct CounterWorker {
    running: Arc<AtomicBool>,
    maximum: Arc<AtomicU32>,
    tick: Duration,
    emitter: Emitter,
}

impl CounterWorker {
    pub fn new(emitter: Emitter) -> Self {
        Self::with_tick(emitter, Duration::from_secs(1))
    }

    pub fn with_tick(emitter: Emitter, tick: Duration) -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            maximum: Arc::new(AtomicU32::new(DEFAULT_MAXIMUM)),
            tick,
            emitter,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn maximum(&self) -> u32 {
        self.maximum.load(Ordering::Relaxed)
    }

    /// Takes effect for the next run; a run in progress keeps its bound.
    pub fn set_maximum(&self, maximum: u32) {
        self.maximum.store(maximum, Ordering::Relaxed);
    }

    /// Must be called from within a tokio runtime.
    pub fn start(&self) -> Result<(), CounterError> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Relaxed)
            .map_err(|_| CounterError::AlreadyRunning)?;

        let maximum = self.maximum();
        let running = Arc::clone(&self.running);
        let emitter = self.emitter.clone();
        let tick = self.tick;

        info!(maximum, "counter started");
        tokio::spawn(async move {
            for count in 0..maximum {
                debug!(count, maximum, "counter tick");
                emitter.emit(WorkerEvent::Counter(CounterEvent { count, maximum }));
                tokio::time::sleep(tick).await;
            }
            running.store(false, Ordering::Release);
            info!(maximum, "counter finished");
        });

        Ok(())
    }
}
