//! English pluralization for resource type keys
//!
//! Deterministic and locale-independent. Only the last `_`-separated word of
//! a type name is inflected, so `tv_show` becomes `tv_shows`. Words that are
//! already plural are returned unchanged wherever the rules can tell.

use std::collections::HashMap;

const UNCOUNTABLE: &[&str] = &[
	"equipment",
	"feedback",
	"fish",
	"information",
	"metadata",
	"money",
	"news",
	"rice",
	"series",
	"sheep",
	"species",
];

const IRREGULAR: &[(&str, &str)] = &[
	("child", "children"),
	("criterion", "criteria"),
	("datum", "data"),
	("foot", "feet"),
	("goose", "geese"),
	("leaf", "leaves"),
	("man", "men"),
	("mouse", "mice"),
	("ox", "oxen"),
	("person", "people"),
	("tooth", "teeth"),
	("woman", "women"),
];

// Singular nouns ending in "us" or "as" that take "es"
const ES_AFTER_S: &[&str] = &["alias", "bonus", "bus", "campus", "census", "status", "virus"];

// Nouns ending in consonant + "o" that take "es"
const ES_AFTER_O: &[&str] = &["buffalo", "echo", "hero", "potato", "tomato", "veto"];

/// Pluralizer with optional per-word overrides.
///
/// # Examples
///
/// ```
/// use sideload_jsonapi::inflection::Pluralizer;
///
/// let pluralizer = Pluralizer::new().with_override("cactus", "cacti");
///
/// assert_eq!(pluralizer.pluralize("show"), "shows");
/// assert_eq!(pluralizer.pluralize("shows"), "shows");
/// assert_eq!(pluralizer.pluralize("category"), "categories");
/// assert_eq!(pluralizer.pluralize("cactus"), "cacti");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pluralizer {
	overrides: HashMap<String, String>,
}

impl Pluralizer {
	/// Pluralizer using only the built-in rules.
	pub fn new() -> Self {
		Self::default()
	}

	/// Force `singular` to pluralize as `plural`.
	pub fn with_override(mut self, singular: impl Into<String>, plural: impl Into<String>) -> Self {
		self.overrides.insert(singular.into(), plural.into());
		self
	}

	/// Add several overrides at once.
	pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.overrides.extend(
			overrides
				.into_iter()
				.map(|(singular, plural)| (singular.into(), plural.into())),
		);
		self
	}

	/// Plural form of `word`.
	pub fn pluralize(&self, word: &str) -> String {
		if let Some(plural) = self.overrides.get(word) {
			return plural.clone();
		}
		if self.overrides.values().any(|plural| plural == word) {
			return word.to_string();
		}
		pluralize(word)
	}
}

/// Plural form of `word` using the built-in rules.
pub fn pluralize(word: &str) -> String {
	let (head, last) = match word.rsplit_once('_') {
		Some((head, last)) => (&word[..head.len() + 1], last),
		None => ("", word),
	};
	if last.is_empty() {
		return word.to_string();
	}
	format!("{head}{}", pluralize_word(last))
}

fn pluralize_word(word: &str) -> String {
	let lower = word.to_lowercase();

	if UNCOUNTABLE.contains(&lower.as_str()) {
		return word.to_string();
	}
	for (singular, plural) in IRREGULAR {
		if lower == *singular {
			return (*plural).to_string();
		}
		if lower == *plural {
			return word.to_string();
		}
	}

	if lower.ends_with("quiz") {
		return format!("{word}zes");
	}
	if ["matrix", "vertex", "index"].iter().any(|s| lower.ends_with(s)) {
		return format!("{}ices", &word[..word.len() - 2]);
	}
	if lower.ends_with("ss") || ES_AFTER_S.iter().any(|s| lower.ends_with(s)) {
		return format!("{word}es");
	}
	if lower.ends_with("sis") || lower.ends_with("xis") {
		return format!("{}es", &word[..word.len() - 2]);
	}
	if lower.ends_with('s') {
		return word.to_string();
	}
	if lower.ends_with('x') || lower.ends_with('z') || lower.ends_with("ch") || lower.ends_with("sh") {
		return format!("{word}es");
	}
	if lower.ends_with('y') && !ends_with_vowel_then(&lower, 'y') {
		return format!("{}ies", &word[..word.len() - 1]);
	}
	// knife -> knives, but giraffe -> giraffes
	if lower.ends_with("fe") && lower.chars().rev().nth(2).is_some_and(|c| c != 'f') {
		return format!("{}ves", &word[..word.len() - 2]);
	}
	if lower.ends_with("lf") || lower.ends_with("rf") {
		return format!("{}ves", &word[..word.len() - 1]);
	}
	if ES_AFTER_O.iter().any(|s| lower.ends_with(s)) {
		return format!("{word}es");
	}
	format!("{word}s")
}

fn ends_with_vowel_then(word: &str, last: char) -> bool {
	let mut chars = word.chars().rev();
	chars.next() == Some(last) && matches!(chars.next(), Some('a' | 'e' | 'i' | 'o' | 'u'))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("show", "shows")]
	#[case("network", "networks")]
	#[case("episode", "episodes")]
	#[case("category", "categories")]
	#[case("day", "days")]
	#[case("box", "boxes")]
	#[case("match", "matches")]
	#[case("class", "classes")]
	#[case("status", "statuses")]
	#[case("analysis", "analyses")]
	#[case("knife", "knives")]
	#[case("wolf", "wolves")]
	#[case("scarf", "scarves")]
	#[case("giraffe", "giraffes")]
	#[case("chief", "chiefs")]
	#[case("hero", "heroes")]
	#[case("photo", "photos")]
	#[case("quiz", "quizzes")]
	#[case("index", "indices")]
	#[case("person", "people")]
	#[case("child", "children")]
	#[case("series", "series")]
	#[case("tv_show", "tv_shows")]
	#[case("tv_person", "tv_people")]
	fn test_pluralize(#[case] singular: &str, #[case] plural: &str) {
		assert_eq!(pluralize(singular), plural);
	}

	#[rstest]
	#[case("shows")]
	#[case("categories")]
	#[case("boxes")]
	#[case("classes")]
	#[case("statuses")]
	#[case("analyses")]
	#[case("people")]
	#[case("children")]
	#[case("quizzes")]
	#[case("tv_shows")]
	fn test_pluralize_is_idempotent_for_plurals(#[case] plural: &str) {
		assert_eq!(pluralize(plural), plural);
		assert_eq!(pluralize(&pluralize(plural)), plural);
	}

	#[rstest]
	fn test_pluralize_edge_inputs() {
		assert_eq!(pluralize(""), "");
		assert_eq!(pluralize("show_"), "show_");
	}

	#[rstest]
	fn test_overrides() {
		// Arrange
		let pluralizer = Pluralizer::new().with_overrides([("octopus", "octopi"), ("moose", "moose")]);

		// Act & Assert
		assert_eq!(pluralizer.pluralize("octopus"), "octopi");
		assert_eq!(pluralizer.pluralize("octopi"), "octopi");
		assert_eq!(pluralizer.pluralize("moose"), "moose");
		assert_eq!(pluralizer.pluralize("show"), "shows");
	}
}
