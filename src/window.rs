use crate::worker::{CounterEvent, CounterWorker, PriceEvent, PriceTimerWorker, DEFAULT_MAXIMUM};
use tracing::{debug, trace};

mod log;

pub use self::log::{LogKind, LogLine};

/// Upper end of the stepper range.
pub const STEPPER_LIMIT: u32 = DEFAULT_MAXIMUM;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressBar {
    pub value: u32,
    pub maximum: u32,
}

impl ProgressBar {
    pub fn ratio(&self) -> f64 {
        if self.maximum == 0 {
            return 0.0;
        }
        (self.value as f64 / self.maximum as f64).clamp(0.0, 1.0)
    }
}

/// Control state and log of the main window.
///
/// Owns both worker handles and is the only writer of their settings.
/// Every method is meant to run on the UI task.
pub struct MainWindow {
    counter: CounterWorker,
    price: PriceTimerWorker,
    number: u32,
    get_price: bool,
    progress: ProgressBar,
    log: Vec<LogLine>,
}

impl MainWindow {
    pub fn new(counter: CounterWorker, price: PriceTimerWorker) -> Self {
        counter.set_maximum(DEFAULT_MAXIMUM);

        Self {
            get_price: price.is_enabled(),
            counter,
            price,
            number: DEFAULT_MAXIMUM,
            progress: ProgressBar {
                value: 0,
                maximum: DEFAULT_MAXIMUM,
            },
            log: vec![],
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn get_price(&self) -> bool {
        self.get_price
    }

    pub fn progress(&self) -> ProgressBar {
        self.progress
    }

    pub fn counter_is_running(&self) -> bool {
        self.counter.is_running()
    }

    pub fn log_lines(&self) -> &[LogLine] {
        &self.log
    }

    pub fn on_start_clicked(&mut self) {
        self.log("button clicked", LogKind::Info);
        if let Err(err) = self.counter.start() {
            debug!(error = %err, "start rejected");
            self.log(err.to_string(), LogKind::Error);
        }
    }

    pub fn on_max_changed(&mut self, new_max: u32) {
        let new_max = new_max.min(STEPPER_LIMIT);
        self.log(format!("new number: {new_max}"), LogKind::Info);
        self.number = new_max;
        self.counter.set_maximum(new_max);
        self.progress.maximum = new_max;
    }

    pub fn increase_max(&mut self) {
        if self.number < STEPPER_LIMIT {
            self.on_max_changed(self.number + 1);
        }
    }

    pub fn decrease_max(&mut self) {
        if self.number > 0 {
            self.on_max_changed(self.number - 1);
        }
    }

    pub fn on_price_toggle(&mut self, enabled: bool) {
        self.log(format!("bitcoin state changed [{enabled}]"), LogKind::Info);
        self.get_price = enabled;
        self.price.set_enabled(enabled);
    }

    pub fn toggle_price(&mut self) {
        self.on_price_toggle(!self.get_price);
    }

    pub fn on_counter_event(&mut self, event: CounterEvent) {
        self.log(event.to_string(), LogKind::Ok);
        self.progress.value = event.count + 1;
    }

    pub fn on_price_event(&mut self, event: PriceEvent) {
        self.log(event.to_string(), LogKind::Bitcoin);
    }

    pub fn on_price_stopped(&mut self, reason: &str) {
        self.log(format!("price updates stopped: {reason}"), LogKind::Error);
    }

    pub fn log(&mut self, text: impl Into<String>, kind: LogKind) {
        let line = LogLine::new(text, kind);
        trace!(markup = %line.to_markup(), "log line");
        self.log.push(line);
    }
}
