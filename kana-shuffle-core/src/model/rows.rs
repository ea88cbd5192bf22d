use serde::{Deserialize, Serialize};

/// A named group of kana rows used to narrow the pool.
///
/// Groups match on the romaji label of a base entry. Selecting several
/// groups keeps the union of their entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowGroup {
	Vowels,
	K,
	S,
	T,
	N,
	H,
	M,
	Y,
	R,
	W,
}

impl RowGroup {
	/// All groups in canonical order.
	pub const ALL: [RowGroup; 10] = [
		RowGroup::Vowels,
		RowGroup::K,
		RowGroup::S,
		RowGroup::T,
		RowGroup::N,
		RowGroup::H,
		RowGroup::M,
		RowGroup::Y,
		RowGroup::R,
		RowGroup::W,
	];

	/// Query key of the group.
	pub fn key(self) -> &'static str {
		match self {
			RowGroup::Vowels => "vowels",
			RowGroup::K => "k",
			RowGroup::S => "s",
			RowGroup::T => "t",
			RowGroup::N => "n",
			RowGroup::H => "h",
			RowGroup::M => "m",
			RowGroup::Y => "y",
			RowGroup::R => "r",
			RowGroup::W => "w",
		}
	}

	/// Parses a group key. Unknown keys yield `None`.
	pub fn from_key(key: &str) -> Option<Self> {
		RowGroup::ALL.into_iter().find(|group| group.key() == key.trim())
	}

	/// Whether a base entry with this romaji belongs to the group.
	pub fn matches(self, romaji: &str) -> bool {
		match self {
			RowGroup::Vowels => matches!(romaji, "a" | "i" | "u" | "e" | "o"),
			RowGroup::K => romaji.starts_with('k'),
			RowGroup::S => romaji.starts_with('s'),
			RowGroup::T => romaji.starts_with('t') || romaji == "chi",
			RowGroup::N => romaji.starts_with('n'),
			RowGroup::H => romaji.starts_with('h') || romaji == "fu",
			RowGroup::M => romaji.starts_with('m'),
			RowGroup::Y => romaji.starts_with('y'),
			RowGroup::R => romaji.starts_with('r'),
			RowGroup::W => matches!(romaji, "wa" | "wo" | "n"),
		}
	}
}

/// Parses a comma-separated list of group keys.
///
/// Unknown keys are dropped, duplicates removed, and the result is
/// returned in canonical order.
pub fn parse_rows(raw: &str) -> Vec<RowGroup> {
	let mut rows: Vec<RowGroup> = raw.split(',').filter_map(RowGroup::from_key).collect();
	rows.sort();
	rows.dedup();
	rows
}

/// Joins groups into their comma-separated query form.
pub fn join_rows(rows: &[RowGroup]) -> String {
	rows.iter().map(|group| group.key()).collect::<Vec<_>>().join(",")
}

/// Whether an entry survives the filter.
///
/// An empty selection keeps everything.
pub fn row_filter_accepts(rows: &[RowGroup], romaji: &str) -> bool {
	rows.is_empty() || rows.iter().any(|group| group.matches(romaji))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::kana::ROMAJI;

	fn count(group: RowGroup) -> usize {
		ROMAJI.iter().filter(|r| group.matches(r)).count()
	}

	#[test]
	fn group_sizes() {
		assert_eq!(count(RowGroup::Vowels), 5);
		assert_eq!(count(RowGroup::K), 5);
		assert_eq!(count(RowGroup::S), 5);
		assert_eq!(count(RowGroup::T), 5);
		assert_eq!(count(RowGroup::H), 5);
		assert_eq!(count(RowGroup::Y), 3);
		assert_eq!(count(RowGroup::W), 3);
	}

	#[test]
	fn n_row_includes_syllabic_n() {
		// "n" starts with 'n', so it sits in both the n and w groups.
		assert_eq!(count(RowGroup::N), 6);
		assert!(RowGroup::W.matches("n"));
	}

	#[test]
	fn parse_is_lenient_and_canonical() {
		assert_eq!(parse_rows("w, k,bogus,k"), vec![RowGroup::K, RowGroup::W]);
		assert!(parse_rows("").is_empty());
		assert_eq!(join_rows(&parse_rows("vowels,t")), "vowels,t");
	}

	#[test]
	fn empty_selection_keeps_everything() {
		assert!(ROMAJI.iter().all(|r| row_filter_accepts(&[], r)));
		assert!(!row_filter_accepts(&[RowGroup::Vowels], "ka"));
	}
}
