use thiserror::Error;

/// Failures surfaced by grid generation.
///
/// These are precondition violations: retrying the same call cannot succeed.
/// Constraint exhaustion inside the sampler is never an error, it is absorbed
/// by the fallback scan.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShuffleError {
	#[error("pool is empty, nothing to sample from")]
	EmptyPool,

	#[error("grid size must be at least 1")]
	ZeroGridSize,

	#[error("invalid seed choice: {0}")]
	InvalidSeedChoice(String),
}
