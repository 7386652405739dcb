mod recording_object_store;

pub use recording_object_store::{Event, EventLog, RecordingObjectStore};
