//! Core building blocks: configuration, errors and the deterministic RNG.
//!
//! Everything else in the crate is parameterized by these types. Markers and
//! separators live in `CodecConfig` instead of being hardcoded in the passes.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{CodecConfig, Markers, Separators, UnaryConfig};
pub use error::{CodecError, Result};
pub use rng::{CodecRng, CodecRngState};
