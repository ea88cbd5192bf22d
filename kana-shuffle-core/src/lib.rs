//! Seeded kana grid generation library.
//!
//! This crate provides the deterministic engine behind the kana shuffle
//! flashcards, including:
//! - A string seed hasher and a seeded pseudo-random stream
//! - Kana pool construction (script choice, row filters, dakuten extension)
//! - A constrained index sampler with a deterministic fallback
//! - A grid generator facade and share-link parameters for callers
//!
//! Reproducibility is the central contract: the same normalized seed and the
//! same configuration always produce the same grid.

/// Core grid generation model.
///
/// Exposes the generator facade and its input record, along with the
/// lower-level building blocks (hasher, stream, pool, sampler).
pub mod model;

/// Error type shared by the whole crate.
pub mod error;

pub use crate::error::ShuffleError;
pub use crate::model::generator::{Generator, Grid};
pub use crate::model::grid_input::GridInput;
