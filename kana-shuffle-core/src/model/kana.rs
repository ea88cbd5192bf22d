use serde::{Deserialize, Serialize};

/// Number of base kana in each script table.
pub const BASE_LEN: usize = 46;

/// Basic hiragana, in gojūon order.
pub const HIRAGANA: [&str; BASE_LEN] = [
	"あ", "い", "う", "え", "お",
	"か", "き", "く", "け", "こ",
	"さ", "し", "す", "せ", "そ",
	"た", "ち", "つ", "て", "と",
	"な", "に", "ぬ", "ね", "の",
	"は", "ひ", "ふ", "へ", "ほ",
	"ま", "み", "む", "め", "も",
	"や", "ゆ", "よ",
	"ら", "り", "る", "れ", "ろ",
	"わ", "を", "ん",
];

/// Basic katakana, aligned with `HIRAGANA`.
pub const KATAKANA: [&str; BASE_LEN] = [
	"ア", "イ", "ウ", "エ", "オ",
	"カ", "キ", "ク", "ケ", "コ",
	"サ", "シ", "ス", "セ", "ソ",
	"タ", "チ", "ツ", "テ", "ト",
	"ナ", "ニ", "ヌ", "ネ", "ノ",
	"ハ", "ヒ", "フ", "ヘ", "ホ",
	"マ", "ミ", "ム", "メ", "モ",
	"ヤ", "ユ", "ヨ",
	"ラ", "リ", "ル", "レ", "ロ",
	"ワ", "ヲ", "ン",
];

/// Hepburn romaji shared by both scripts.
pub const ROMAJI: [&str; BASE_LEN] = [
	"a", "i", "u", "e", "o",
	"ka", "ki", "ku", "ke", "ko",
	"sa", "shi", "su", "se", "so",
	"ta", "chi", "tsu", "te", "to",
	"na", "ni", "nu", "ne", "no",
	"ha", "hi", "fu", "he", "ho",
	"ma", "mi", "mu", "me", "mo",
	"ya", "yu", "yo",
	"ra", "ri", "ru", "re", "ro",
	"wa", "wo", "n",
];

/// Which script the grid is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KanaType {
	#[default]
	Hiragana,
	Katakana,
}

impl KanaType {
	/// Query / display key of the script.
	pub fn key(self) -> &'static str {
		match self {
			KanaType::Hiragana => "hiragana",
			KanaType::Katakana => "katakana",
		}
	}

	/// Parses a key leniently: anything but `"katakana"` is hiragana.
	pub fn from_key(key: &str) -> Self {
		if key.trim().eq_ignore_ascii_case("katakana") {
			KanaType::Katakana
		} else {
			KanaType::Hiragana
		}
	}

	/// The base symbol table of the script.
	pub fn symbols(self) -> &'static [&'static str; BASE_LEN] {
		match self {
			KanaType::Hiragana => &HIRAGANA,
			KanaType::Katakana => &KATAKANA,
		}
	}
}

/// Voiced (dakuten) form of a base kana, if it has one.
pub fn dakuten_of(kana: &str) -> Option<&'static str> {
	let voiced = match kana {
		"か" => "が", "き" => "ぎ", "く" => "ぐ", "け" => "げ", "こ" => "ご",
		"さ" => "ざ", "し" => "じ", "す" => "ず", "せ" => "ぜ", "そ" => "ぞ",
		"た" => "だ", "ち" => "ぢ", "つ" => "づ", "て" => "で", "と" => "ど",
		"は" => "ば", "ひ" => "び", "ふ" => "ぶ", "へ" => "べ", "ほ" => "ぼ",
		"カ" => "ガ", "キ" => "ギ", "ク" => "グ", "ケ" => "ゲ", "コ" => "ゴ",
		"サ" => "ザ", "シ" => "ジ", "ス" => "ズ", "セ" => "ゼ", "ソ" => "ゾ",
		"タ" => "ダ", "チ" => "ヂ", "ツ" => "ヅ", "テ" => "デ", "ト" => "ド",
		"ハ" => "バ", "ヒ" => "ビ", "フ" => "ブ", "ヘ" => "ベ", "ホ" => "ボ",
		_ => return None,
	};
	Some(voiced)
}

/// Semi-voiced (handakuten) form of a base kana, if it has one.
pub fn handakuten_of(kana: &str) -> Option<&'static str> {
	let semi_voiced = match kana {
		"は" => "ぱ", "ひ" => "ぴ", "ふ" => "ぷ", "へ" => "ぺ", "ほ" => "ぽ",
		"ハ" => "パ", "ヒ" => "ピ", "フ" => "プ", "ヘ" => "ペ", "ホ" => "ポ",
		_ => return None,
	};
	Some(semi_voiced)
}

/// Romaji of the voiced form derived from a base romaji.
///
/// `h` becomes `b`, and the three irregular syllables are rewritten
/// (`shi`/`chi` → `ji`, `tsu` → `zu`). Other labels are kept unchanged.
pub fn dakuten_romaji(romaji: &str) -> String {
	match romaji {
		"shi" | "chi" => "ji".to_owned(),
		"tsu" => "zu".to_owned(),
		r => match r.strip_prefix('h') {
			Some(rest) => format!("b{rest}"),
			None => r.to_owned(),
		},
	}
}

/// Romaji of the semi-voiced form: `h` becomes `p`.
pub fn handakuten_romaji(romaji: &str) -> String {
	match romaji.strip_prefix('h') {
		Some(rest) => format!("p{rest}"),
		None => romaji.to_owned(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tables_are_aligned() {
		assert_eq!(HIRAGANA.len(), ROMAJI.len());
		assert_eq!(KATAKANA.len(), ROMAJI.len());
	}

	#[test]
	fn kana_type_keys() {
		assert_eq!(KanaType::from_key("katakana"), KanaType::Katakana);
		assert_eq!(KanaType::from_key("Katakana "), KanaType::Katakana);
		assert_eq!(KanaType::from_key("kanji"), KanaType::Hiragana);
		assert_eq!(KanaType::from_key(KanaType::Katakana.key()), KanaType::Katakana);
	}

	#[test]
	fn substitution_counts() {
		for kana_type in [KanaType::Hiragana, KanaType::Katakana] {
			let symbols = kana_type.symbols();
			assert_eq!(symbols.iter().filter(|k| dakuten_of(k).is_some()).count(), 20);
			assert_eq!(symbols.iter().filter(|k| handakuten_of(k).is_some()).count(), 5);
		}
	}

	#[test]
	fn irregular_voiced_romaji() {
		assert_eq!(dakuten_romaji("shi"), "ji");
		assert_eq!(dakuten_romaji("chi"), "ji");
		assert_eq!(dakuten_romaji("tsu"), "zu");
		assert_eq!(dakuten_romaji("hi"), "bi");
		assert_eq!(dakuten_romaji("fu"), "fu");
		assert_eq!(dakuten_romaji("ka"), "ka");
		assert_eq!(handakuten_romaji("ho"), "po");
	}
}
