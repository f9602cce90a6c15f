//! Core components for signing and uploading objects.
//!
//! This crate provides the foundational types shared by the s3put crates:
//!
//! - [`Error`] and [`ErrorKind`]: the error taxonomy of the whole workspace.
//! - [`Context`]: the seams to the outside world, an [`HttpSend`] executor
//!   and an [`Env`] for configuration lookup.
//! - [`ProvideCredential`] and [`SigningCredential`]: how credentials are
//!   loaded and validated.
//!
//! ## Utilities
//!
//! - [`hash`]: SHA-256 and HMAC-SHA256 helpers
//! - [`time`]: timestamp formatting for signing
//! - [`utils`]: redaction of secret material in `Debug` output

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};

mod context;
pub use context::{Context, Env, HttpSend, NoopEnv, NoopHttpSend, OsEnv, StaticEnv};

mod api;
pub use api::{ProvideCredential, SigningCredential};
