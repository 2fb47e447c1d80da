//! Rendering infrastructure module
//!
//! Provides offline (non-real-time) rendering at a target sample rate
//! using rubato.

mod rubato_renderer;

pub use rubato_renderer::RubatoRenderer;
