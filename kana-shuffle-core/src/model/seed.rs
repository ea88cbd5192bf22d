use chrono::{Local, NaiveDate};
use rand::Rng;

use crate::error::ShuffleError;

/// FNV-1a 32-bit offset basis.
const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
/// FNV-1a 32-bit prime.
const FNV_PRIME: u32 = 16_777_619;

/// Seed hashed in place of an empty string.
pub const DEFAULT_SEED: &str = "default";

/// Length of a generated random seed when none is requested.
pub const DEFAULT_RANDOM_SEED_LEN: usize = 8;

/// Longest random seed `SeedChoice::parse` accepts.
pub const MAX_RANDOM_SEED_LEN: usize = 64;

/// Characters a normalized seed may contain.
const SEED_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Hashes a seed string into a 32-bit integer (FNV-1a).
///
/// Each UTF-16 code unit is folded in turn, which keeps grids identical
/// to the ones produced by the web version for the same seed. An empty
/// input is replaced by `"default"` first.
///
/// # Examples
/// ```
/// use kana_shuffle_core::model::seed::hash_seed;
/// assert_eq!(hash_seed(""), hash_seed("default"));
/// ```
pub fn hash_seed(seed: &str) -> u32 {
	let seed = if seed.is_empty() { DEFAULT_SEED } else { seed };
	seed.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
		(hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
	})
}

/// Normalizes a raw seed: lowercase, ASCII letters and digits only.
///
/// Returns an empty string if nothing survives.
pub fn sanitize_seed(raw: &str) -> String {
	raw.chars()
		.flat_map(char::to_lowercase)
		.filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
		.collect()
}

/// Returns the daily seed for a given date, e.g. `day20240101`.
pub fn daily_seed(date: NaiveDate) -> String {
	date.format("day%Y%m%d").to_string()
}

/// Returns the daily seed for the local current date.
pub fn today_seed() -> String {
	daily_seed(Local::now().date_naive())
}

/// Draws a fresh normalized seed of `len` characters.
///
/// Uses the thread RNG: the result is not reproducible, but the seed
/// itself is, so callers must report it back to the user. Lengths above
/// `MAX_RANDOM_SEED_LEN` are clamped.
pub fn random_seed(len: usize) -> String {
	let len = if len == 0 { DEFAULT_RANDOM_SEED_LEN } else { len.min(MAX_RANDOM_SEED_LEN) };
	let mut rng = rand::rng();
	(0..len)
		.map(|_| SEED_ALPHABET[rng.random_range(0..SEED_ALPHABET.len())] as char)
		.collect()
}

/// Strategy used to obtain the seed of a grid.
///
/// # Variants
/// - `Daily`: the seed of the current local day (`dayYYYYMMDD`).
/// - `Custom(String)`: a user seed, normalized before use. A seed that
///   normalizes to nothing falls back to `Daily`.
/// - `Random(usize)`: a fresh random seed of the given length
///   (`0` selects the default length).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SeedChoice {
	#[default]
	Daily,
	Custom(String),
	Random(usize),
}

impl SeedChoice {
	/// Parses the textual seed grammar used by query parameters.
	///
	/// - empty → `Daily`
	/// - `"random:N"` → `Random(N)`
	/// - anything else → `Custom`
	///
	/// # Notes
	/// The only keyword contains a `:`, which `sanitize_seed` never keeps,
	/// so every normalized seed parses back to `Custom` (a custom seed
	/// `"daily"` stays a custom seed).
	///
	/// # Errors
	/// Returns an error if the `random:` length is not an integer or is
	/// larger than `MAX_RANDOM_SEED_LEN`.
	pub fn parse(raw: &str) -> Result<Self, ShuffleError> {
		let trimmed = raw.trim();
		if trimmed.is_empty() {
			return Ok(SeedChoice::Daily);
		}
		let lower = trimmed.to_lowercase();
		if let Some(value) = lower.strip_prefix("random:") {
			if value.is_empty() {
				return Ok(SeedChoice::Random(0));
			}
			let len = value
				.parse::<usize>()
				.map_err(|_| ShuffleError::InvalidSeedChoice(format!("random seed length must be an integer, got '{value}'")))?;
			if len > MAX_RANDOM_SEED_LEN {
				return Err(ShuffleError::InvalidSeedChoice(format!(
					"random seed length must be at most {MAX_RANDOM_SEED_LEN}, got {len}"
				)));
			}
			return Ok(SeedChoice::Random(len));
		}
		Ok(SeedChoice::Custom(trimmed.to_owned()))
	}

	/// Resolves the choice to a normalized, non-empty seed string.
	pub fn resolve(&self) -> String {
		self.resolve_on(Local::now().date_naive())
	}

	/// Same as `resolve`, with the daily seed computed for `date`.
	pub fn resolve_on(&self, date: NaiveDate) -> String {
		match self {
			SeedChoice::Daily => daily_seed(date),
			SeedChoice::Custom(raw) => {
				let cleaned = sanitize_seed(raw);
				if cleaned.is_empty() { daily_seed(date) } else { cleaned }
			}
			SeedChoice::Random(len) => random_seed(*len),
		}
	}
}
