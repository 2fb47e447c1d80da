//! Export domain module

mod filename;
mod format;
mod locale;

pub use filename::{filesystem_safe, suggested_filename};
pub use format::{ExportFormat, FormatSelection};
pub use locale::{Label, Locale};
