use crate::event::Event;
use crate::tui::{Tui, TuiError};
use crate::window::MainWindow;
use crate::worker::{
    CounterWorker, Emitter, EventReceiver, HttpPriceSource, PriceTimerWorker, WorkerEvent,
};
use std::ops::Deref;
use thiserror::Error;
use tokio::select;
use tracing::{debug, info};

pub struct App {
    window: MainWindow,
    worker_events: EventReceiver,
    tui: Tui,
}

impl App {
    /// Sets up the terminal and spawns both workers. The price worker starts
    /// polling right away.
    pub fn new() -> Result<Self, UnrecoverableError> {
        let tui = Tui::new()?;

        let (emitter, worker_events) = Emitter::channel();
        let counter = CounterWorker::new(emitter.clone());
        let price = PriceTimerWorker::spawn(HttpPriceSource::new(), emitter, true);

        Ok(Self {
            window: MainWindow::new(counter, price),
            worker_events,
            tui,
        })
    }

    pub async fn run(&mut self) -> Result<(), UnrecoverableError> {
        self.tui.enable()?;
        let maybe_err = self.run_inner().await;
        self.tui.disable()?;

        maybe_err?;
        Ok(())
    }

    async fn run_inner(&mut self) -> Result<(), UnrecoverableError> {
        info!("ui loop started");

        loop {
            self.tui.render(&self.window)?;

            select! {
                tui_event = self.tui.read_event() => {
                    let event = tui_event?;
                    if *handle_event(&mut self.window, event) {
                        break;
                    }
                }
                Some(worker_event) = self.worker_events.recv() => {
                    handle_worker_event(&mut self.window, worker_event);
                }
            }
        }

        info!("ui loop finished");
        Ok(())
    }
}

struct AppShouldQuit(bool);

impl Deref for AppShouldQuit {
    type Target = bool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn handle_event(window: &mut MainWindow, event: Event) -> AppShouldQuit {
    debug!(?event, "input");

    match event {
        Event::StartCounter => window.on_start_clicked(),
        Event::IncreaseMaximum => window.increase_max(),
        Event::DecreaseMaximum => window.decrease_max(),
        Event::TogglePrice => window.toggle_price(),
        Event::Redraw => (),
        Event::Quit => return AppShouldQuit(true),
    };

    AppShouldQuit(false)
}

fn handle_worker_event(window: &mut MainWindow, event: WorkerEvent) {
    match event {
        WorkerEvent::Counter(event) => window.on_counter_event(event),
        WorkerEvent::Price(event) => window.on_price_event(event),
        WorkerEvent::PriceStopped(reason) => window.on_price_stopped(&reason),
    }
}

/// Represents errors the app has no control over.
#[derive(Debug, Error)]
pub enum UnrecoverableError {
    #[error("error while interfacing with the terminal: {0}")]
    Tui(#[from] TuiError),
    #[error("failed to open log file: {0}")]
    LogFile(std::io::Error),
    #[error("invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),
}
