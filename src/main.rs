use crate::app::{App, UnrecoverableError};
use crate::args::{Args, Parser};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

mod app;
mod args;
mod event;
mod tui;
mod window;
mod worker;

#[tokio::main]
async fn main() -> Result<(), UnrecoverableError> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path, &args.log_level)?;
    }

    let mut app = App::new()?;
    app.run().await
}

/// The terminal belongs to the ui, so diagnostics only ever go to a file.
fn init_logging(path: &Path, filter: &str) -> Result<(), UnrecoverableError> {
    let filter = EnvFilter::try_new(filter)?;
    let file = File::create(path).map_err(UnrecoverableError::LogFile)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}
