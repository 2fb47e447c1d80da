//! Application layer - Use cases and port interfaces
//!
//! Contains the decode/render pipeline, the record, preview and export
//! use cases, and trait definitions for external system interactions.

pub mod export;
pub mod pipeline;
pub mod ports;
pub mod preview;
pub mod record;

// Re-export use cases
pub use export::{ExportError, ExportOutput, ExportRecordingUseCase, ExportReport};
pub use pipeline::{DecodeRenderPipeline, PipelineError};
pub use preview::{PreviewError, PreviewUseCase};
pub use record::{RecordCallbacks, RecordInput, RecordUseCase};
