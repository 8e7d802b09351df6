//! Shared building blocks for the Instana provider.
//!
//! This crate provides:
//! - [`Cell`], the three-state (null / unknown / present) declarative value slot
//! - Flat-string codecs for comma lists and `"Key: Value"` header lists
//! - Decimal normalization for values that round-trip through state
//! - Accumulating [`Diagnostics`] with secret redaction
//! - Cancellation helpers and the host schema vocabulary

pub mod cancel;
pub mod cell;
pub mod codec;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod numeric;
pub mod schema;

pub use cancel::CancellationToken;
pub use cell::{cell_to_optional, optional_to_cell, Cell};
pub use config::ProviderConfig;
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::*;
