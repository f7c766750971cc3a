pub mod recording_backend;

pub use recording_backend::RecordingBackend;
