use super::{Emitter, WorkerEvent};
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const PRICE_ENDPOINT: &str = "https://api.coindesk.com/v1/bpi/currentprice.json";

/// Whatever the price endpoint answered, untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceEvent(pub serde_json::Value);

impl Display for PriceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum PriceError {
    #[error("failed to request the bitcoin price: {0}")]
    Request(reqwest::Error),
    #[error("price endpoint answered with status {0}")]
    Status(u16),
    #[error("failed to decode the bitcoin price: {0}")]
    Decode(reqwest::Error),
}

pub trait PriceSource: Send + Sync + 'static {
    fn fetch(&self) -> BoxFuture<'_, Result<PriceEvent, PriceError>>;
}

pub struct HttpPriceSource {
    client: reqwest::Client,
    url: &'static str,
}

impl HttpPriceSource {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            url: PRICE_ENDPOINT,
        }
    }
}

impl Default for HttpPriceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceSource for HttpPriceSource {
    fn fetch(&self) -> BoxFuture<'_, Result<PriceEvent, PriceError>> {
        async move {
            let response = self
                .client
                .get(self.url)
                .send()
                .await
                .map_err(PriceError::Request)?;

            let status = response.status();
            if !status.is_success() {
                return Err(PriceError::Status(status.as_u16()));
            }

            let body = response
                .json::<serde_json::Value>()
                .await
                .map_err(PriceError::Decode)?;

            Ok(PriceEvent(body))
        }
        .boxed()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PollIntervals {
    /// Pause after a successful fetch.
    pub fetch: Duration,
    /// Pause between checks of the enabled flag while disabled.
    pub idle: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            fetch: Duration::from_secs(5),
            idle: Duration::from_secs(1),
        }
    }
}

/// Polls a [`PriceSource`] for as long as the process lives.
///
/// The poll loop starts as soon as the worker is spawned. It has no shutdown
/// hook and stops for good on the first failed fetch.
#[derive(Debug, Clone)]
pub struct PriceTimerWorker {
    enabled: Arc<AtomicBool>,
}

impl PriceTimerWorker {
    /// Must be called from within a tokio runtime.
    pub fn spawn<S: PriceSource>(source: S, emitter: Emitter, enabled: bool) -> Self {
        Self::spawn_with_intervals(source, emitter, enabled, PollIntervals::default())
    }

    pub fn spawn_with_intervals<S: PriceSource>(
        source: S,
        emitter: Emitter,
        enabled: bool,
        intervals: PollIntervals,
    ) -> Self {
        let enabled = Arc::new(AtomicBool::new(enabled));

        let flag = Arc::clone(&enabled);
        tokio::spawn(async move {
            if let Err(err) = poll_prices(&source, &flag, &emitter, intervals).await {
                warn!(error = %err, "price worker stopped");
                emitter.emit(WorkerEvent::PriceStopped(err.to_string()));
            }
        });

        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }
}

async fn poll_prices<S: PriceSource>(
    source: &S,
    enabled: &AtomicBool,
    emitter: &Emitter,
    intervals: PollIntervals,
) -> Result<(), PriceError> {
    info!("price worker started");
    loop {
        if enabled.load(Ordering::Relaxed) {
            let price = source.fetch().await?;
            debug!("fetched bitcoin price");
            emitter.emit(WorkerEvent::Price(price));
            tokio::time::sleep(intervals.fetch).await;
        } else {
            tokio::time::sleep(intervals.idle).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::EventReceiver;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    #[derive(Clone, Default)]
    struct StubSource {
        fetches: Arc<AtomicUsize>,
        fail_after: Option<usize>,
    }

    impl PriceSource for StubSource {
        fn fetch(&self) -> BoxFuture<'_, Result<PriceEvent, PriceError>> {
            async move {
                let n = self.fetches.fetch_add(1, Ordering::SeqCst);
                match self.fail_after {
                    Some(limit) if n >= limit => Err(PriceError::Status(503)),
                    _ => Ok(PriceEvent(json!({ "bpi": { "USD": { "rate_float": n } } }))),
                }
            }
            .boxed()
        }
    }

    fn prices(rx: &mut EventReceiver) -> usize {
        let mut n = 0;
        while let Ok(event) = rx.try_recv() {
            if let WorkerEvent::Price(_) = event {
                n += 1;
            }
        }
        n
    }

    #[tokio::test(start_paused = true)]
    async fn fetches_every_five_seconds_while_enabled() {
        let (emitter, mut rx) = Emitter::channel();
        let source = StubSource::default();
        let fetches = Arc::clone(&source.fetches);
        PriceTimerWorker::spawn(source, emitter, true);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(prices(&mut rx), 1);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(prices(&mut rx), 2);
        assert_eq!(fetches.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn idles_while_disabled() {
        let (emitter, mut rx) = Emitter::channel();
        let source = StubSource::default();
        let fetches = Arc::clone(&source.fetches);
        let worker = PriceTimerWorker::spawn(source, emitter, false);

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(prices(&mut rx), 0);
        assert_eq!(fetches.load(Ordering::SeqCst), 0);
        assert!(!worker.is_enabled());
    }

    #[tokio::test(start_paused = true)]
    async fn toggling_takes_effect_within_one_cycle() {
        let (emitter, mut rx) = Emitter::channel();
        let worker = PriceTimerWorker::spawn(StubSource::default(), emitter, true);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(prices(&mut rx), 1);

        worker.set_enabled(false);
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(prices(&mut rx), 0);

        worker.set_enabled(true);
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(prices(&mut rx), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn first_failure_ends_the_loop() {
        let (emitter, mut rx) = Emitter::channel();
        let source = StubSource {
            fail_after: Some(1),
            ..Default::default()
        };
        let fetches = Arc::clone(&source.fetches);
        PriceTimerWorker::spawn(source, emitter, true);

        tokio::time::sleep(Duration::from_secs(30)).await;

        let mut events = vec![];
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], WorkerEvent::Price(_)));
        assert_eq!(
            events[1],
            WorkerEvent::PriceStopped("price endpoint answered with status 503".to_string())
        );
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn passes_json_through_as_text() {
        let event = PriceEvent(json!({ "chartName": "Bitcoin" }));
        assert_eq!(event.to_string(), r#"{"chartName":"Bitcoin"}"#);
    }
}
