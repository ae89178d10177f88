use chrono::{DateTime, Utc};
use std::fmt::Display;
use tui::style::Color;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Decides the color of a log line and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Info,
    Ok,
    Bitcoin,
    Error,
}

impl LogKind {
    pub fn hex(&self) -> &'static str {
        match self {
            LogKind::Info => "#0000ff",
            LogKind::Ok => "#008000",
            LogKind::Bitcoin => "#A9A9A9",
            LogKind::Error => "#ff0000",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            LogKind::Info => Color::Rgb(0x00, 0x00, 0xff),
            LogKind::Ok => Color::Rgb(0x00, 0x80, 0x00),
            LogKind::Bitcoin => Color::Rgb(0xa9, 0xa9, 0xa9),
            LogKind::Error => Color::Rgb(0xff, 0x00, 0x00),
        }
    }
}

/// Unknown tags are shown as errors.
impl From<&str> for LogKind {
    fn from(tag: &str) -> Self {
        match tag {
            "info" => LogKind::Info,
            "ok" => LogKind::Ok,
            "bitcoin" => LogKind::Bitcoin,
            _ => LogKind::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub timestamp: DateTime<Utc>,
    pub text: String,
    pub kind: LogKind,
}

impl LogLine {
    pub fn new(text: impl Into<String>, kind: LogKind) -> Self {
        Self::at(Utc::now(), text, kind)
    }

    pub fn at(timestamp: DateTime<Utc>, text: impl Into<String>, kind: LogKind) -> Self {
        Self {
            timestamp,
            text: text.into(),
            kind,
        }
    }

    /// The line as a rich-text span, for views that render markup.
    pub fn to_markup(&self) -> String {
        format!(
            "<span style=\" font-size:8pt; font-weight:600; color:{};\" >{self}</span>",
            self.kind.hex()
        )
    }
}

impl Display for LogLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}][{}]",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.text
        )
    }
}
