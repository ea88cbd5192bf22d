use serde::{Deserialize, Serialize};

use super::kana::{dakuten_of, dakuten_romaji, handakuten_of, handakuten_romaji, KanaType, ROMAJI};
use super::rows::{row_filter_accepts, RowGroup};

/// One card of the grid: a kana and its romaji.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanaEntry {
	pub kana: String,
	pub romaji: String,
}

impl KanaEntry {
	pub fn new(kana: &str, romaji: &str) -> Self {
		Self { kana: kana.to_owned(), romaji: romaji.to_owned() }
	}
}

/// Configuration of the alphabet a grid is drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoolConfig {
	pub kana_type: KanaType,
	/// Append voiced / semi-voiced forms after the base entries.
	pub dakuten: bool,
	/// Row groups to keep; empty keeps every row.
	pub rows: Vec<RowGroup>,
}

/// The ordered alphabet a grid indexes into.
///
/// ## Invariants
/// - Entries are addressed by position; order is part of the contract.
/// - Base entries come first, derived (dakuten) entries after them.
/// - `filtered` is true iff a row selection was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pool {
	entries: Vec<KanaEntry>,
	filtered: bool,
}

impl Pool {
	/// Builds the pool for a configuration.
	///
	/// # Behavior
	/// - Picks the base table for `kana_type`.
	/// - Keeps the entries accepted by the row filter (all of them when
	///   no row is selected).
	/// - If `dakuten` is set, appends the derived forms of the kept entries.
	///
	/// Construction is deterministic: identical configurations always
	/// give identical pools.
	pub fn build(config: &PoolConfig) -> Self {
		let entries: Vec<KanaEntry> = config
			.kana_type
			.symbols()
			.iter()
			.zip(ROMAJI.iter())
			.filter(|(_, romaji)| row_filter_accepts(&config.rows, romaji))
			.map(|(kana, romaji)| KanaEntry::new(kana, romaji))
			.collect();

		let entries = if config.dakuten { extend_with_dakuten(entries) } else { entries };

		Self { entries, filtered: !config.rows.is_empty() }
	}

	/// Wraps caller-supplied entries as an unfiltered pool.
	pub fn from_entries(entries: Vec<KanaEntry>) -> Self {
		Self { entries, filtered: false }
	}

	pub fn entries(&self) -> &[KanaEntry] {
		&self.entries
	}

	pub fn get(&self, index: usize) -> Option<&KanaEntry> {
		self.entries.get(index)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Whether a row selection narrowed this pool.
	pub fn is_filtered(&self) -> bool {
		self.filtered
	}
}

/// Appends the voiced and semi-voiced forms of `base`.
///
/// Derived entries keep the order of their base entry; for a given base
/// entry the voiced form comes before the semi-voiced one. Entries with
/// no derived form are left alone.
pub fn extend_with_dakuten(base: Vec<KanaEntry>) -> Vec<KanaEntry> {
	let derived: Vec<KanaEntry> = base
		.iter()
		.flat_map(|entry| {
			let voiced = dakuten_of(&entry.kana)
				.map(|kana| KanaEntry { kana: kana.to_owned(), romaji: dakuten_romaji(&entry.romaji) });
			let semi_voiced = handakuten_of(&entry.kana)
				.map(|kana| KanaEntry { kana: kana.to_owned(), romaji: handakuten_romaji(&entry.romaji) });
			voiced.into_iter().chain(semi_voiced)
		})
		.collect();

	let mut entries = base;
	entries.extend(derived);
	entries
}
