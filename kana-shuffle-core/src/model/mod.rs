//! Top-level module for seeded kana grid generation.
//!
//! This module groups:
//! - Seed hashing and seed resolution (`seed`)
//! - The seeded pseudo-random stream (`stream`)
//! - Kana tables, row groups and pool construction (`kana`, `rows`, `pool`)
//! - The constrained index sampler (`sampler`)
//! - The caller-facing input record, generator and share links
//!   (`grid_input`, `generator`, `link`)

/// High-level interface producing a complete grid from a `GridInput`.
///
/// Resolves the seed, builds the pool, runs the sampler and maps
/// indices back to kana cells.
pub mod generator;

/// Caller configuration for one grid generation.
///
/// Holds the kana type, dakuten flag, row filter, seed choice and the
/// named sampler tunables.
pub mod grid_input;

/// Fixed kana tables and dakuten / handakuten substitutions.
pub mod kana;

/// Share-link query parameters.
///
/// Round-trips a grid configuration through URL query pairs.
pub mod link;

/// Alphabet pool construction.
///
/// Applies the script choice, row filter and dakuten extension
/// in a deterministic, append-only way.
pub mod pool;

/// Named row groups (vowels, k, s, ...) used to filter the pool.
pub mod rows;

/// Constrained index sampler.
///
/// Fills a grid with pool indices under a per-symbol cap and a
/// no-immediate-repeat rule, falling back to a deterministic scan.
pub mod sampler;

/// Seed hashing, normalization and seed choice resolution.
pub mod seed;

/// Seeded pseudo-random stream of floats in `[0, 1)`.
pub mod stream;
