use super::seed::hash_seed;

/// LCG multiplier (Numerical Recipes).
const LCG_MULTIPLIER: u32 = 1_664_525;
/// LCG increment (Numerical Recipes).
const LCG_INCREMENT: u32 = 1_013_904_223;
/// 2^32, the divisor mapping the state into `[0, 1)`.
const STATE_SPAN: f64 = 4_294_967_296.0;

/// A source of floats in `[0, 1)` consumed by the sampler.
///
/// Implemented by `SeededStream` for reproducible grids and by any
/// `FnMut() -> f64` closure, which lets callers script the draws.
pub trait UnitSource {
	/// Produces the next value in `[0, 1)`.
	fn next_unit(&mut self) -> f64;
}

impl<F: FnMut() -> f64> UnitSource for F {
	fn next_unit(&mut self) -> f64 {
		self()
	}
}

/// Deterministic pseudo-random stream derived from a seed string.
///
/// A 32-bit linear congruential generator whose initial state is the
/// FNV-1a hash of the seed. The state is private: the stream only ever
/// hands out the next float.
///
/// ## Invariants
/// - Two streams built from the same seed yield identical sequences.
/// - Every value lies in `[0, 1)`.
///
/// The stream cannot be re-seeded; build a new one for a new seed.
#[derive(Debug)]
pub struct SeededStream {
	state: u32,
}

impl SeededStream {
	/// Creates a stream seeded from `seed` (an empty seed hashes as `"default"`).
	pub fn new(seed: &str) -> Self {
		Self { state: hash_seed(seed) }
	}

	/// Advances the generator and returns the new value in `[0, 1)`.
	pub fn next_f64(&mut self) -> f64 {
		self.state = self.state.wrapping_mul(LCG_MULTIPLIER).wrapping_add(LCG_INCREMENT);
		f64::from(self.state) / STATE_SPAN
	}
}

impl UnitSource for SeededStream {
	fn next_unit(&mut self) -> f64 {
		self.next_f64()
	}
}

impl Iterator for SeededStream {
	type Item = f64;

	fn next(&mut self) -> Option<f64> {
		Some(self.next_f64())
	}
}
