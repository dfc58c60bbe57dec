//! pixtag-core: shared error type and configuration.
//!
//! Foundational dependency for the other pixtag crates, providing the
//! unified [`Error`] type with HTTP status mapping and the
//! environment-sourced application [`Config`].

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{Error, Result};
