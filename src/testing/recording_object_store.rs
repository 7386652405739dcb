use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::domain::AppError;
use crate::ports::ObjectStore;

/// Observable side effect of a fetch run, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Progress(String),
    Fetch { collection: String, key: String, destination: PathBuf },
}

/// Shared, ordered record of progress lines and fetch requests.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<Event>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn fetched_keys(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Fetch { key, .. } => Some(key),
                Event::Progress(_) => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    /// Writer recording each completed line as [`Event::Progress`].
    pub fn progress_writer(&self) -> ProgressWriter {
        ProgressWriter { log: self.clone(), pending: String::new() }
    }
}

pub struct ProgressWriter {
    log: EventLog,
    pending: String,
}

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.pending.find('\n') {
            let line: String = self.pending.drain(..=pos).collect();
            self.log.push(Event::Progress(line.trim_end_matches('\n').to_string()));
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Object store that records requests and optionally fails on one key.
#[derive(Debug, Clone)]
pub struct RecordingObjectStore {
    log: EventLog,
    fail_on: Option<String>,
}

impl RecordingObjectStore {
    pub fn new(log: EventLog) -> Self {
        Self { log, fail_on: None }
    }

    pub fn failing_on(log: EventLog, key: impl Into<String>) -> Self {
        Self { log, fail_on: Some(key.into()) }
    }
}

impl ObjectStore for RecordingObjectStore {
    fn fetch(&self, collection: &str, key: &str, destination: &Path) -> Result<(), AppError> {
        self.log.push(Event::Fetch {
            collection: collection.to_string(),
            key: key.to_string(),
            destination: destination.to_path_buf(),
        });

        if self.fail_on.as_deref() == Some(key) {
            return Err(AppError::ObjectNotFound {
                collection: collection.to_string(),
                key: key.to_string(),
            });
        }
        Ok(())
    }
}
