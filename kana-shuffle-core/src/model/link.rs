use serde::{Deserialize, Serialize};

use super::grid_input::GridInput;
use super::kana::KanaType;
use super::rows::{join_rows, parse_rows};
use super::seed::{sanitize_seed, SeedChoice};
use crate::error::ShuffleError;

/// Query parameters of a share link.
///
/// Field names are the short query keys: `type`, `seed`, `d` (dakuten),
/// `rows` and `r` (romaji shown). Values are kept as raw strings so that
/// parsing can stay lenient, the way links have always been read:
/// - unknown `type` → hiragana
/// - unknown row keys are dropped
/// - `d` and `r` are on only for `"1"`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkParams {
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub kana_type: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub seed: Option<String>,

	#[serde(rename = "d", default, skip_serializing_if = "Option::is_none")]
	pub dakuten: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub rows: Option<String>,

	#[serde(rename = "r", default, skip_serializing_if = "Option::is_none")]
	pub romaji: Option<String>,
}

impl LinkParams {
	/// Builds the link for an input whose seed resolved to `seed`.
	///
	/// Defaults are omitted (hiragana, no dakuten, no rows, romaji hidden);
	/// the seed is always written so the link pins the exact grid.
	pub fn from_input(input: &GridInput, seed: &str) -> Self {
		let flag = |on: bool| on.then(|| "1".to_owned());
		Self {
			kana_type: (input.kana_type != KanaType::Hiragana).then(|| input.kana_type.key().to_owned()),
			seed: Some(sanitize_seed(seed)).filter(|s| !s.is_empty()),
			dakuten: flag(input.dakuten),
			rows: Some(join_rows(input.rows())).filter(|s| !s.is_empty()),
			romaji: flag(input.show_romaji),
		}
	}

	/// Reads the parameters back into a grid input.
	///
	/// The seed goes through `SeedChoice::parse`, so `random:N` is accepted
	/// here too; a missing seed means the daily seed. Seeds written by
	/// `from_input` are normalized and always read back as custom seeds,
	/// `seed=daily` included.
	///
	/// # Errors
	/// Returns an error if the seed grammar is invalid.
	pub fn to_grid_input(&self) -> Result<GridInput, ShuffleError> {
		let mut input = GridInput::new(KanaType::from_key(self.kana_type.as_deref().unwrap_or_default()));
		input.dakuten = is_on(self.dakuten.as_deref());
		input.show_romaji = is_on(self.romaji.as_deref());
		input.set_rows(parse_rows(self.rows.as_deref().unwrap_or_default()));
		input.seed = SeedChoice::parse(self.seed.as_deref().unwrap_or_default())?;
		Ok(input)
	}

	/// Present parameters as `(key, value)` pairs, in link order.
	pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
		[
			("type", &self.kana_type),
			("seed", &self.seed),
			("d", &self.dakuten),
			("rows", &self.rows),
			("r", &self.romaji),
		]
		.into_iter()
		.filter_map(|(key, value)| value.as_ref().map(|v| (key, v.clone())))
		.collect()
	}

	/// Percent-encoded query string, without the leading `?`.
	pub fn to_query_string(&self) -> String {
		self.to_pairs()
			.iter()
			.map(|(key, value)| format!("{key}={}", encode_component(value)))
			.collect::<Vec<_>>()
			.join("&")
	}

	/// Appends the query string to `base_url`, replacing any existing query.
	pub fn share_url(&self, base_url: &str) -> String {
		let base = base_url.split(['?', '#']).next().unwrap_or_default();
		let query = self.to_query_string();
		if query.is_empty() {
			base.to_owned()
		} else {
			format!("{base}?{query}")
		}
	}
}

fn is_on(flag: Option<&str>) -> bool {
	flag.is_some_and(|value| value.trim() == "1")
}

/// Percent-encodes everything outside the URL unreserved set.
fn encode_component(value: &str) -> String {
	value
		.bytes()
		.map(|b| match b {
			b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => (b as char).to_string(),
			_ => format!("%{b:02X}"),
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::rows::RowGroup;

	#[test]
	fn defaults_are_omitted() {
		let input = GridInput::default();
		let link = LinkParams::from_input(&input, "day20240101");
		assert_eq!(link.to_query_string(), "seed=day20240101");
	}

	#[test]
	fn full_link() {
		let mut input = GridInput::new(KanaType::Katakana);
		input.dakuten = true;
		input.show_romaji = true;
		input.set_rows([RowGroup::T, RowGroup::K]);
		let link = LinkParams::from_input(&input, "abc");
		assert_eq!(link.to_query_string(), "type=katakana&seed=abc&d=1&rows=k%2Ct&r=1");
		assert_eq!(
			link.share_url("https://example.org/kana/?old=1#top"),
			"https://example.org/kana/?type=katakana&seed=abc&d=1&rows=k%2Ct&r=1"
		);
	}

	#[test]
	fn round_trip_through_input() {
		let mut input = GridInput::new(KanaType::Katakana);
		input.dakuten = true;
		input.set_rows([RowGroup::Vowels, RowGroup::H]);
		let link = LinkParams::from_input(&input, "seed42");

		let back = link.to_grid_input().unwrap();
		assert_eq!(back.kana_type, KanaType::Katakana);
		assert!(back.dakuten);
		assert!(!back.show_romaji);
		assert_eq!(back.rows(), input.rows());
		assert_eq!(back.seed, SeedChoice::Custom("seed42".to_owned()));
	}

	#[test]
	fn parsing_is_lenient() {
		let link = LinkParams {
			kana_type: Some("kanji".to_owned()),
			seed: None,
			dakuten: Some("yes".to_owned()),
			rows: Some("k,zz,,vowels".to_owned()),
			romaji: Some("1".to_owned()),
		};
		let input = link.to_grid_input().unwrap();
		assert_eq!(input.kana_type, KanaType::Hiragana);
		assert!(!input.dakuten);
		assert!(input.show_romaji);
		assert_eq!(input.rows(), &[RowGroup::Vowels, RowGroup::K]);
		assert_eq!(input.seed, SeedChoice::Daily);
	}

	#[test]
	fn bad_random_length_is_rejected() {
		let link = LinkParams { seed: Some("random:abc".to_owned()), ..LinkParams::default() };
		assert!(link.to_grid_input().is_err());
		let huge = LinkParams { seed: Some(format!("random:{}", usize::MAX)), ..LinkParams::default() };
		assert!(huge.to_grid_input().is_err());
	}

	#[test]
	fn word_seeds_stay_custom() {
		for seed in ["daily", "none", "random"] {
			let link = LinkParams::from_input(&GridInput::default(), seed);
			assert_eq!(link.seed.as_deref(), Some(seed));
			assert_eq!(link.to_grid_input().unwrap().seed, SeedChoice::Custom(seed.to_owned()));
		}
	}
}
