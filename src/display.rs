use std::fmt;
use std::sync::Mutex;

/// What the display region shows. Every write replaces the previous state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    Processing,
    Completed { download_link: String },
    ApiError { message: String },
    ConnectionError { reason: String, base_url: String },
}

impl DisplayState {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            DisplayState::ApiError { .. } | DisplayState::ConnectionError { .. }
        )
    }
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayState::Processing => write!(f, "...processing request..."),
            DisplayState::Completed { download_link } => {
                write!(f, "Analysis complete. Download link: {}", download_link)
            }
            DisplayState::ApiError { message } => write!(f, "API error: {}", message),
            DisplayState::ConnectionError { reason, base_url } => write!(
                f,
                "API connection error: {}. Make sure the service is running at {}.",
                reason, base_url
            ),
        }
    }
}

/// The display region the handler renders into.
///
/// `show` runs while the handler holds its ticket lock, so an implementation
/// must not call back into the same `NameAnalysisHandler` or it will deadlock.
pub trait StatusSink: Send + Sync {
    fn show(&self, state: &DisplayState);
}

/// Prints each state on its own line.
pub struct StdoutSink;

impl StatusSink for StdoutSink {
    fn show(&self, state: &DisplayState) {
        println!("{}", state);
    }
}

/// Keeps the current state in memory.
#[derive(Default)]
pub struct MemorySink {
    current: Mutex<Option<DisplayState>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<DisplayState> {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Rendered text of the current state, empty before the first write.
    pub fn text(&self) -> String {
        self.current().map(|s| s.to_string()).unwrap_or_default()
    }
}

impl StatusSink for MemorySink {
    fn show(&self, state: &DisplayState) {
        *self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(state.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_error_names_base_url() {
        let state = DisplayState::ConnectionError {
            reason: "HTTP error: 502".into(),
            base_url: "http://localhost:8000".into(),
        };
        assert_eq!(
            state.to_string(),
            "API connection error: HTTP error: 502. Make sure the service is running at http://localhost:8000."
        );
        assert!(state.is_error());
    }

    #[test]
    fn memory_sink_keeps_only_latest_write() {
        let sink = MemorySink::new();
        assert_eq!(sink.text(), "");

        sink.show(&DisplayState::Processing);
        sink.show(&DisplayState::ApiError {
            message: "invalid name".into(),
        });

        assert_eq!(sink.text(), "API error: invalid name");
        assert!(!DisplayState::Processing.is_error());
    }
}
