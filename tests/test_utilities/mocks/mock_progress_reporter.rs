use sbom_audit::prelude::*;
use std::sync::{Arc, Mutex};

/// One captured call to the reporter
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Message(String),
    Progress { current: usize, total: usize },
    Error(String),
    Completed(String),
}

/// Mock ProgressReporter capturing every call; clones share the log
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    /// `(current, total)` pairs in reporting order
    pub fn progress_steps(&self) -> Vec<(usize, usize)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ProgressEvent::Progress { current, total } => Some((current, total)),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.push(ProgressEvent::Message(message.to_string()));
    }

    fn report_progress(&self, current: usize, total: usize, _message: Option<&str>) {
        self.push(ProgressEvent::Progress { current, total });
    }

    fn report_error(&self, message: &str) {
        self.push(ProgressEvent::Error(message.to_string()));
    }

    fn report_completion(&self, message: &str) {
        self.push(ProgressEvent::Completed(message.to_string()));
    }
}
