use super::kana::KanaType;
use super::pool::{Pool, PoolConfig};
use super::rows::RowGroup;
use super::sampler::{SamplerParams, DEFAULT_ATTEMPT_BOUND, DEFAULT_GRID_SIZE};
use super::seed::SeedChoice;

/// Cap used for a full (unfiltered) pool.
pub const UNFILTERED_MAX_PER_SYMBOL: usize = 2;

/// Cap used once rows are selected: effectively unbounded, so a narrow
/// pool still fills the grid with every symbol it has.
pub const FILTERED_MAX_PER_SYMBOL: usize = 9999;

/// Input parameters for generating one grid.
///
/// `GridInput` holds both the **pool configuration** (script, dakuten,
/// rows) and the **sampling configuration** (seed, grid size, cap,
/// attempt bound). It is a plain value: build one per request, nothing
/// in it outlives a call to `Generator::generate`.
///
/// # Invariants
/// - `rows` is kept sorted in canonical order without duplicates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridInput {
	/// Script the grid is drawn from.
	pub kana_type: KanaType,

	/// Whether voiced / semi-voiced forms are added to the pool.
	pub dakuten: bool,

	/// How the seed is obtained.
	pub seed: SeedChoice,

	/// Whether the display layer shows romaji under each kana.
	pub show_romaji: bool,

	/// Number of cells in the grid.
	pub grid_size: usize,

	/// Random draws per cell before the fallback scan.
	pub attempt_bound: usize,

	/// Forbid the same kana in two adjacent cells.
	pub avoid_immediate_repeat: bool,

	/// Explicit cap, overriding the filtered / unfiltered policy.
	pub max_per_symbol: Option<usize>,

	/// Selected row groups (empty = all rows).
	rows: Vec<RowGroup>,
}

impl Default for GridInput {
	fn default() -> Self {
		Self {
			kana_type: KanaType::Hiragana,
			dakuten: false,
			seed: SeedChoice::Daily,
			show_romaji: false,
			grid_size: DEFAULT_GRID_SIZE,
			attempt_bound: DEFAULT_ATTEMPT_BOUND,
			avoid_immediate_repeat: true,
			max_per_symbol: None,
			rows: Vec::new(),
		}
	}
}

impl GridInput {
	/// Creates an input for a script with every other setting at its default.
	pub fn new(kana_type: KanaType) -> Self {
		Self { kana_type, ..Self::default() }
	}

	/// Returns the selected row groups in canonical order.
	pub fn rows(&self) -> &[RowGroup] {
		&self.rows
	}

	/// Replaces the row selection; order and duplicates are normalized.
	pub fn set_rows<I: IntoIterator<Item = RowGroup>>(&mut self, rows: I) {
		let mut rows: Vec<RowGroup> = rows.into_iter().collect();
		rows.sort();
		rows.dedup();
		self.rows = rows;
	}

	/// Selects every row group.
	pub fn select_all_rows(&mut self) {
		self.rows = RowGroup::ALL.to_vec();
	}

	/// Clears the row selection (the pool is no longer filtered).
	pub fn clear_rows(&mut self) {
		self.rows.clear();
	}

	/// Pool configuration derived from this input.
	pub fn pool_config(&self) -> PoolConfig {
		PoolConfig {
			kana_type: self.kana_type,
			dakuten: self.dakuten,
			rows: self.rows.clone(),
		}
	}

	/// Cap requested for a pool, before the sampler's floor is applied.
	///
	/// An explicit `max_per_symbol` wins; otherwise filtered pools get
	/// `FILTERED_MAX_PER_SYMBOL` and full pools `UNFILTERED_MAX_PER_SYMBOL`.
	pub fn max_per_symbol_for(&self, pool: &Pool) -> usize {
		match self.max_per_symbol {
			Some(cap) => cap,
			None if pool.is_filtered() => FILTERED_MAX_PER_SYMBOL,
			None => UNFILTERED_MAX_PER_SYMBOL,
		}
	}

	/// Sampler tunables for a pool built from this input.
	pub fn sampler_params(&self, pool: &Pool) -> SamplerParams {
		SamplerParams {
			grid_size: self.grid_size,
			max_per_symbol: Some(self.max_per_symbol_for(pool)),
			avoid_immediate_repeat: self.avoid_immediate_repeat,
			attempt_bound: self.attempt_bound,
		}
	}
}
