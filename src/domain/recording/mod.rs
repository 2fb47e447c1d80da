//! Recording domain module

mod duration;
mod library;
mod recording;

pub use duration::{format_clock, Duration, DEFAULT_DURATION_SECS};
pub use library::RecordingLibrary;
pub use recording::{NewRecording, Recording, RecordingId};
