use chrono::{Local, NaiveDate};
use log::debug;
use serde::Serialize;

use super::grid_input::GridInput;
use super::kana::KanaType;
use super::link::LinkParams;
use super::pool::{KanaEntry, Pool};
use super::rows::RowGroup;
use super::sampler::{sample_indices, SamplerParams};
use super::stream::SeededStream;
use crate::error::ShuffleError;

/// A generated grid, ready for display.
///
/// `cells[i]` is the pool entry at `indices[i]`. The resolved `seed` is
/// always reported, so that a daily or random grid can be shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
	pub seed: String,
	pub kana_type: KanaType,
	pub dakuten: bool,
	pub rows: Vec<RowGroup>,
	pub show_romaji: bool,
	pub indices: Vec<usize>,
	pub cells: Vec<KanaEntry>,
}

impl Grid {
	/// Share-link parameters reproducing this exact grid.
	pub fn link_params(&self) -> LinkParams {
		let mut input = GridInput::new(self.kana_type);
		input.dakuten = self.dakuten;
		input.show_romaji = self.show_romaji;
		input.set_rows(self.rows.iter().copied());
		LinkParams::from_input(&input, &self.seed)
	}

	/// Cells split into display lines of `columns` cells (the last may be shorter).
	pub fn lines(&self, columns: usize) -> impl Iterator<Item = &[KanaEntry]> {
		self.cells.chunks(columns.max(1))
	}
}

/// Runs the whole seed → stream → sampler pipeline for a pool size.
///
/// This is the reproducibility contract in one call: the same seed,
/// pool size and parameters always return the same indices.
pub fn seeded_indices(seed: &str, pool_size: usize, params: &SamplerParams) -> Result<Vec<usize>, ShuffleError> {
	let mut stream = SeededStream::new(seed);
	sample_indices(&mut stream, pool_size, params)
}

/// High-level grid generator.
///
/// # Responsibilities
/// - Resolve the seed choice of a `GridInput` (daily, custom, random)
/// - Build the pool and pick the cap policy for it
/// - Sample indices and map them back to kana cells
///
/// The generator holds no per-grid state; one instance can serve any
/// number of calls. Its only setting is an optional pinned date for the
/// daily seed.
#[derive(Debug, Clone, Default)]
pub struct Generator {
	date: Option<NaiveDate>,
}

impl Generator {
	/// Creates a generator whose daily seed follows the local date.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a generator whose daily seed is pinned to `date`.
	pub fn with_date(date: NaiveDate) -> Self {
		Self { date: Some(date) }
	}

	/// Date used for the daily seed.
	pub fn today(&self) -> NaiveDate {
		self.date.unwrap_or_else(|| Local::now().date_naive())
	}

	/// Resolves the seed an input would be generated with.
	///
	/// For `SeedChoice::Random` every call draws a new seed.
	pub fn resolve_seed(&self, input: &GridInput) -> String {
		input.seed.resolve_on(self.today())
	}

	/// Builds the pool of an input.
	pub fn pool(&self, input: &GridInput) -> Pool {
		Pool::build(&input.pool_config())
	}

	/// Generates a grid, resolving the seed first.
	///
	/// # Errors
	/// - `ShuffleError::EmptyPool` if the pool has no entry
	/// - `ShuffleError::ZeroGridSize` if `grid_size` is zero
	pub fn generate(&self, input: &GridInput) -> Result<Grid, ShuffleError> {
		let seed = self.resolve_seed(input);
		self.generate_with_seed(input, &seed)
	}

	/// Generates a grid from an already resolved seed.
	///
	/// The seed is used verbatim (callers normalize it), which is what
	/// link reproduction needs.
	pub fn generate_with_seed(&self, input: &GridInput, seed: &str) -> Result<Grid, ShuffleError> {
		let pool = self.pool(input);
		let params = input.sampler_params(&pool);
		debug!(
			"generating {} cells from a pool of {} ({}, dakuten: {}, filtered: {}) with seed '{seed}'",
			params.grid_size,
			pool.len(),
			input.kana_type.key(),
			input.dakuten,
			pool.is_filtered()
		);

		let indices = seeded_indices(seed, pool.len(), &params)?;
		let cells = indices
			.iter()
			.filter_map(|&idx| pool.get(idx).cloned())
			.collect();

		Ok(Grid {
			seed: seed.to_owned(),
			kana_type: input.kana_type,
			dakuten: input.dakuten,
			rows: input.rows().to_vec(),
			show_romaji: input.show_romaji,
			indices,
			cells,
		})
	}
}
