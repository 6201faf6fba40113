//! SnapLens Core
//!
//! Core types, errors, and ranking logic shared across SnapLens components.
//!
//! This crate provides:
//! - Common types for canonical images, labels, and predictions
//! - Error types and result handling
//! - Deterministic probability ranking with stable tie-breaking

pub mod error;
pub mod ranking;
pub mod types;

pub use error::{Error, Result};
pub use ranking::{rank, RankedEntry, Ranking};
pub use types::{CanonicalImage, Label, Prediction};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::ranking::{rank, RankedEntry, Ranking};
    pub use crate::types::{CanonicalImage, Label, Prediction};
}
