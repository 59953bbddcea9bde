//! Contract-violation errors.
//!
//! Bad card data never produces an error; it is reported through the
//! `parsed`/`valid` flags. These variants are caller or configuration bugs.

use thiserror::Error;

/// Errors raised to the caller instead of being folded into a flag.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("unknown field scheme `{0}`")]
    UnknownScheme(String),

    #[error("unknown mana symbol `{0}`")]
    UnknownSymbol(String),

    #[error("source already attached to card `{0}`")]
    SourceAlreadyAttached(String),
}

pub type Result<T> = std::result::Result<T, CodecError>;
