//! Messages shown to the user alongside search results. Every message is mirrored to the log.
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: Level,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct Report {
    notices: Vec<Notice>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, text: impl Into<String>) {
        let text = text.into();
        info!("{text}");
        self.push(Level::Info, text);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        let text = text.into();
        info!("{text}");
        self.push(Level::Success, text);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        let text = text.into();
        warn!("{text}");
        self.push(Level::Warning, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        let text = text.into();
        error!("{text}");
        self.push(Level::Error, text);
    }

    fn push(&mut self, level: Level, text: String) {
        self.notices.push(Notice { level, text });
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn has(&self, level: Level, text: &str) -> bool {
        self.notices
            .iter()
            .any(|n| n.level == level && n.text == text)
    }
}
