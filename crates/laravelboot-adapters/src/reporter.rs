//! Recording reporter for tests.

use std::sync::{Arc, Mutex, MutexGuard};

use laravelboot_core::application::ports::Reporter;

/// What was reported, by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Planned(String),
    Progress(String),
    Warning(String),
    Success(String),
}

/// Keeps every message in memory. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct MemoryReporter {
    events: Arc<Mutex<Vec<Event>>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.lock().clone()
    }

    pub fn planned(&self) -> Vec<String> {
        self.collect(|e| match e {
            Event::Planned(m) => Some(m.clone()),
            _ => None,
        })
    }

    pub fn warnings(&self) -> Vec<String> {
        self.collect(|e| match e {
            Event::Warning(m) => Some(m.clone()),
            _ => None,
        })
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn collect(&self, f: impl Fn(&Event) -> Option<String>) -> Vec<String> {
        self.lock().iter().filter_map(f).collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Event>> {
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Reporter for MemoryReporter {
    fn planned(&self, description: &str) {
        self.lock().push(Event::Planned(description.to_string()));
    }

    fn progress(&self, message: &str) {
        self.lock().push(Event::Progress(message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.lock().push(Event::Warning(message.to_string()));
    }

    fn success(&self, message: &str) {
        self.lock().push(Event::Success(message.to_string()));
    }
}
