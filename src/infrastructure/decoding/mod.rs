//! Decoding infrastructure module
//!
//! Provides in-memory decoding of compressed recordings using symphonia.

mod symphonia_decoder;

pub use symphonia_decoder::SymphoniaDecoder;
