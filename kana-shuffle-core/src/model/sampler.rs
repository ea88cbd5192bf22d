use log::debug;

use super::stream::UnitSource;
use crate::error::ShuffleError;

/// Number of cells in a grid.
pub const DEFAULT_GRID_SIZE: usize = 50;

/// Random draws tried per cell before the fallback scan.
pub const DEFAULT_ATTEMPT_BOUND: usize = 5000;

/// Attempt bound of the classic single-script page.
pub const CLASSIC_ATTEMPT_BOUND: usize = 1000;

/// Per-symbol cap of the classic single-script page.
pub const CLASSIC_MAX_PER_SYMBOL: usize = 2;

/// Tunables of the constrained index sampler.
///
/// # Fields
/// - `grid_size`: number of indices to produce (must be >= 1).
/// - `max_per_symbol`: requested occurrence cap, `None` for "as low as
///   possible". It is raised to `ceil(grid_size / pool_size)` when lower,
///   so the grid can always be filled.
/// - `avoid_immediate_repeat`: forbid the same index in two adjacent cells.
/// - `attempt_bound`: random draws tried per cell before scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerParams {
	pub grid_size: usize,
	pub max_per_symbol: Option<usize>,
	pub avoid_immediate_repeat: bool,
	pub attempt_bound: usize,
}

impl Default for SamplerParams {
	fn default() -> Self {
		Self {
			grid_size: DEFAULT_GRID_SIZE,
			max_per_symbol: None,
			avoid_immediate_repeat: true,
			attempt_bound: DEFAULT_ATTEMPT_BOUND,
		}
	}
}

impl SamplerParams {
	/// Numbers of the classic single-script page (cap 2, 1000 attempts).
	///
	/// Unlike that page, exhausting the attempts still goes through the
	/// fallback scan, so the cap is never violated.
	pub fn classic() -> Self {
		Self {
			max_per_symbol: Some(CLASSIC_MAX_PER_SYMBOL),
			attempt_bound: CLASSIC_ATTEMPT_BOUND,
			..Self::default()
		}
	}

	/// Smallest cap that still lets `pool_size` symbols fill the grid.
	pub fn min_needed(&self, pool_size: usize) -> usize {
		self.grid_size.div_ceil(pool_size.max(1))
	}

	/// The cap actually enforced for a pool of `pool_size` entries.
	pub fn effective_cap(&self, pool_size: usize) -> usize {
		let min_needed = self.min_needed(pool_size);
		match self.max_per_symbol {
			Some(cap) if cap >= min_needed => cap,
			_ => min_needed,
		}
	}
}

/// Fills a grid with pool indices.
///
/// # Parameters
/// - `source`: the float stream driving the draws.
/// - `pool_size`: number of entries in the pool (must be >= 1).
/// - `params`: grid size, cap, repeat rule and attempt bound.
///
/// # Returns
/// - `Ok(Vec<usize>)` of exactly `params.grid_size` indices in `[0, pool_size)`.
/// - `Err(ShuffleError)` if `pool_size` or `grid_size` is zero.
///
/// # Behavior
/// For each cell, up to `attempt_bound` draws of `floor(next * pool_size)`
/// are tried. A draw is accepted when it is under the cap and, if
/// `avoid_immediate_repeat` is set, differs from the previous cell. When
/// every attempt fails, the lowest index meeting both rules is taken.
///
/// # Notes
/// - Repeat avoidance is best effort: when only the previous index is
///   still under the cap (always the case for a single-entry pool), the
///   scan keeps the cap and allows the repeat.
/// - No cell repeats its predecessor as long as
///   `(pool_size - 1) * effective_cap(pool_size) >= grid_size`. Below that
///   the pool can saturate: pool 3, grid 6 and cap 2 may end in `[.., 2, 2]`.
///   Pools built by `GridInput` always stay above the bound.
/// - The source is consumed sequentially; the same source state and
///   parameters always give the same grid.
pub fn sample_indices<S>(source: &mut S, pool_size: usize, params: &SamplerParams) -> Result<Vec<usize>, ShuffleError>
where
	S: UnitSource + ?Sized,
{
	if pool_size == 0 {
		return Err(ShuffleError::EmptyPool);
	}
	if params.grid_size == 0 {
		return Err(ShuffleError::ZeroGridSize);
	}

	let cap = params.effective_cap(pool_size);
	if params.max_per_symbol.is_none_or(|requested| requested < cap) {
		debug!("occurrence cap set to floor {cap} (pool of {pool_size}, grid of {})", params.grid_size);
	}

	let mut counts = vec![0usize; pool_size];
	let mut out = Vec::with_capacity(params.grid_size);
	let mut prev: Option<usize> = None;
	let mut fallbacks = 0usize;

	for _ in 0..params.grid_size {
		let allowed = |idx: usize, counts: &[usize]| {
			counts[idx] < cap && !(params.avoid_immediate_repeat && Some(idx) == prev)
		};

		let drawn = (0..params.attempt_bound)
			.map(|_| draw_index(&mut *source, pool_size))
			.find(|&idx| allowed(idx, counts.as_slice()));

		let idx = match drawn {
			Some(idx) => idx,
			None => {
				fallbacks += 1;
				fallback_scan(&counts, cap, |idx| allowed(idx, counts.as_slice()))
			}
		};

		counts[idx] += 1;
		out.push(idx);
		prev = Some(idx);
	}

	if fallbacks > 0 {
		debug!("fallback scan used for {fallbacks} of {} cells", params.grid_size);
	}

	Ok(out)
}

/// Maps the next draw onto `[0, pool_size)`.
///
/// Out-of-range draws from custom sources are clamped to the pool.
fn draw_index<S: UnitSource + ?Sized>(source: &mut S, pool_size: usize) -> usize {
	let idx = (source.next_unit() * pool_size as f64).floor() as usize;
	idx.min(pool_size - 1)
}

/// Lowest index accepted by `allowed`, else the lowest index under the cap.
///
/// The second scan cannot come up empty: the cap is at least
/// `ceil(grid_size / pool_size)`, so fewer than `grid_size` placements
/// always leave a slot free.
fn fallback_scan<F>(counts: &[usize], cap: usize, allowed: F) -> usize
where
	F: Fn(usize) -> bool,
{
	(0..counts.len())
		.find(|&idx| allowed(idx))
		.or_else(|| (0..counts.len()).find(|&idx| counts[idx] < cap))
		.unwrap_or(0)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::stream::SeededStream;

	fn occurrences(indices: &[usize], pool_size: usize) -> Vec<usize> {
		let mut counts = vec![0; pool_size];
		for &idx in indices {
			counts[idx] += 1;
		}
		counts
	}

	#[test]
	fn rejects_invalid_configuration() {
		let mut stream = SeededStream::new("x");
		assert_eq!(sample_indices(&mut stream, 0, &SamplerParams::default()), Err(ShuffleError::EmptyPool));
		let params = SamplerParams { grid_size: 0, ..SamplerParams::default() };
		assert_eq!(sample_indices(&mut stream, 5, &params), Err(ShuffleError::ZeroGridSize));
	}

	#[test]
	fn cap_floor() {
		let params = SamplerParams::default();
		assert_eq!(params.effective_cap(46), 2);
		assert_eq!(params.effective_cap(1), 50);
		assert_eq!(params.effective_cap(7), 8);
		let low = SamplerParams { max_per_symbol: Some(1), ..params };
		assert_eq!(low.effective_cap(10), 5);
		let high = SamplerParams { max_per_symbol: Some(9999), ..params };
		assert_eq!(high.effective_cap(10), 9999);
	}

	#[test]
	fn day_seed_over_full_hiragana() {
		let expected = vec![
			35, 36, 12, 14, 18, 40, 28, 11, 27, 16, 3, 0, 17, 0, 6, 17, 3, 19, 38, 22, 21, 34, 31, 34, 10,
			39, 30, 31, 5, 42, 6, 33, 15, 19, 18, 32, 4, 40, 44, 36, 41, 24, 2, 24, 14, 8, 28, 41, 10, 1,
		];
		let mut stream = SeededStream::new("day20240101");
		let indices = sample_indices(&mut stream, 46, &SamplerParams::default()).unwrap();
		assert_eq!(indices, expected);
		assert!(occurrences(&indices, 46).iter().all(|&c| c <= 2));
		assert!(indices.windows(2).all(|w| w[0] != w[1]));
	}

	#[test]
	fn single_entry_pool_terminates() {
		let mut stream = SeededStream::new("solo");
		let indices = sample_indices(&mut stream, 1, &SamplerParams::default()).unwrap();
		assert_eq!(indices, vec![0; 50]);
	}

	#[test]
	fn constant_source_uses_fallback_scan() {
		// Always draws index 0: after the first cell every attempt fails.
		let mut source = || 0.0;
		let params = SamplerParams { grid_size: 5, max_per_symbol: Some(2), attempt_bound: 10, ..SamplerParams::default() };
		let indices = sample_indices(&mut source, 3, &params).unwrap();
		assert_eq!(indices, vec![0, 1, 0, 1, 2]);
	}

	#[test]
	fn saturated_pool_relaxes_repeat_rule() {
		// Six cells, three symbols, cap two: the last cell can only be a repeat.
		let mut source = || 0.0;
		let params = SamplerParams { grid_size: 6, max_per_symbol: Some(2), attempt_bound: 10, ..SamplerParams::default() };
		let indices = sample_indices(&mut source, 3, &params).unwrap();
		assert_eq!(indices, vec![0, 1, 0, 1, 2, 2]);
		assert!(occurrences(&indices, 3).iter().all(|&c| c == 2));
	}

	#[test]
	fn fallback_respects_cap_without_repeat_rule() {
		let mut source = || 0.99;
		let params = SamplerParams {
			grid_size: 4,
			max_per_symbol: Some(2),
			avoid_immediate_repeat: false,
			attempt_bound: 3,
		};
		let indices = sample_indices(&mut source, 3, &params).unwrap();
		assert_eq!(indices, vec![2, 2, 0, 0]);
	}

	#[test]
	fn zero_attempts_is_a_pure_scan() {
		let mut source = || -> f64 { panic!("no draw expected") };
		let params = SamplerParams { grid_size: 5, attempt_bound: 0, ..SamplerParams::default() };
		let indices = sample_indices(&mut source, 3, &params).unwrap();
		assert_eq!(indices, vec![0, 1, 0, 1, 2]);
	}

	#[test]
	fn out_of_range_draws_are_clamped() {
		let mut source = || 1.5;
		let params = SamplerParams { grid_size: 3, max_per_symbol: Some(9999), ..SamplerParams::default() };
		let indices = sample_indices(&mut source, 4, &params).unwrap();
		assert_eq!(indices[0], 3);
		assert!(indices.iter().all(|&idx| idx < 4));
	}

	#[test]
	fn unbounded_cap_is_honored() {
		let mut stream = SeededStream::new("abc");
		let params = SamplerParams { max_per_symbol: Some(9999), ..SamplerParams::default() };
		let indices = sample_indices(&mut stream, 5, &params).unwrap();
		assert_eq!(
			indices,
			vec![
				4, 2, 4, 1, 3, 1, 3, 2, 1, 4, 1, 4, 0, 3, 1, 3, 2, 3, 4, 0, 4, 0, 3, 0, 2, 1, 2, 1, 2, 3, 0, 1,
				4, 1, 0, 3, 2, 3, 1, 3, 1, 3, 1, 3, 2, 0, 1, 4, 1, 4,
			]
		);
	}

	#[test]
	fn classic_preset_matches_default_on_large_pools() {
		let mut a = SeededStream::new("day20240101");
		let mut b = SeededStream::new("day20240101");
		let classic = sample_indices(&mut a, 46, &SamplerParams::classic()).unwrap();
		let default = sample_indices(&mut b, 46, &SamplerParams::default()).unwrap();
		assert_eq!(classic, default);
	}
}
