//! Text normalizer: free-form chat input to a set of candidate keywords.
//!
//! Only ASCII letters, digits and whitespace survive; everything else,
//! underscores included, is dropped before tokenising. "Whitespace" is the
//! ECMAScript `\s` class, so U+FEFF separates words and U+0085 does not.
//! Tokens of two characters or fewer are noise, as is anything on the
//! stoplists below.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use rand::{Rng, seq::SliceRandom};

// ─── Stoplists ───────────────────────────────────────────────────────────────

pub const CONJUNCTIONS: &[&str] = &[
  "and", "that", "but", "or", "as", "if", "when", "than", "because", "while",
  "where", "after", "so", "though", "since", "until", "whether", "before",
  "although", "nor", "like", "once", "unless", "now", "except",
];

pub const ADJECTIVES: &[&str] = &[
  "good", "new", "first", "last", "long", "great", "little", "own", "other",
  "old", "right", "big", "high", "different", "small", "large", "next",
  "early", "young", "important", "few", "public", "bad", "same", "able",
];

pub const ADVERBS: &[&str] = &[
  "up", "so", "out", "just", "now", "how", "then", "more", "also", "here",
  "well", "only", "very", "even", "back", "there", "down", "still", "in",
  "as", "too", "when", "never", "really", "most",
];

/// Tokens that are never keywords regardless of length.
const NOISE: &[&str] = &["hi"];

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
  CONJUNCTIONS
    .iter()
    .chain(ADJECTIVES)
    .chain(ADVERBS)
    .copied()
    .collect()
});

/// Whether `word` (already lower-cased) is on any stoplist.
pub fn is_stopword(word: &str) -> bool { STOPWORDS.contains(word) }

// ─── Keywords ────────────────────────────────────────────────────────────────

/// A deduplicated set of keywords, kept in first-seen order so that sampling
/// with a seeded RNG is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keywords {
  ordered: Vec<String>,
  seen:    HashSet<String>,
}

impl Keywords {
  pub fn is_empty(&self) -> bool { self.ordered.is_empty() }

  pub fn len(&self) -> usize { self.ordered.len() }

  pub fn contains(&self, word: &str) -> bool { self.seen.contains(word) }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.ordered.iter().map(String::as_str)
  }

  /// Draw one keyword uniformly at random; `None` when empty.
  pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
    self.ordered.choose(rng).map(String::as_str)
  }

  /// Space-joined form, suitable for feeding back into [`normalize`].
  pub fn join(&self) -> String { self.ordered.join(" ") }

  fn insert(&mut self, word: &str) {
    if !self.seen.contains(word) {
      self.seen.insert(word.to_owned());
      self.ordered.push(word.to_owned());
    }
  }
}

// ─── Normalizer ──────────────────────────────────────────────────────────────

/// ECMAScript `\s`: WhiteSpace plus LineTerminator.
fn is_space(c: char) -> bool {
  matches!(
    c,
    '\t'
      | '\n'
      | '\u{0B}'
      | '\u{0C}'
      | '\r'
      | ' '
      | '\u{A0}'
      | '\u{1680}'
      | '\u{2000}'..='\u{200A}'
      | '\u{2028}'
      | '\u{2029}'
      | '\u{202F}'
      | '\u{205F}'
      | '\u{3000}'
      | '\u{FEFF}'
  )
}

/// Reduce `text` to its candidate keywords. Pure; an empty result is a normal
/// outcome, not an error.
pub fn normalize(text: &str) -> Keywords {
  let cleaned: String = text
    .chars()
    .filter_map(|c| {
      if c.is_ascii_alphanumeric() {
        Some(c.to_ascii_lowercase())
      } else if is_space(c) {
        Some(' ')
      } else {
        None
      }
    })
    .collect();

  let mut keywords = Keywords::default();
  for token in cleaned.split(' ').filter(|t| !t.is_empty()) {
    if token.len() <= 2 || NOISE.contains(&token) || is_stopword(token) {
      continue;
    }
    keywords.insert(token);
  }
  keywords
}

#[cfg(test)]
mod tests {
  use rand::{SeedableRng, rngs::StdRng};

  use super::*;

  fn words(k: &Keywords) -> Vec<&str> { k.iter().collect() }

  #[test]
  fn strips_punctuation_and_case() {
    let k = normalize("Hello, WORLD!! it's a  cat-dog.");
    assert_eq!(words(&k), ["hello", "world", "its", "catdog"]);
  }

  #[test]
  fn underscores_are_stripped() {
    let k = normalize("snake_case");
    assert_eq!(words(&k), ["snakecase"]);
  }

  #[test]
  fn non_ascii_letters_are_dropped() {
    let k = normalize("café naïve");
    assert_eq!(words(&k), ["caf", "nave"]);
  }

  #[test]
  fn unicode_separators_follow_ecmascript() {
    assert_eq!(words(&normalize("cat\u{FEFF}dog")), ["cat", "dog"]);
    assert_eq!(words(&normalize("cat\u{3000}dog\u{2028}owl")), ["cat", "dog", "owl"]);
    assert_eq!(words(&normalize("cat\u{85}dog")), ["catdog"]);
  }

  #[test]
  fn many_distinct_tokens_stay_ordered() {
    let text: String = (0..60_000).map(|i| format!("w{i:06}x ")).collect();
    let k = normalize(&text);

    assert_eq!(k.len(), 60_000);
    assert_eq!(k.iter().next(), Some("w000000x"));
    assert_eq!(k.iter().last(), Some("w059999x"));
    assert!(k.contains("w031337x"));

    let doubled = normalize(&format!("{text}{text}"));
    assert_eq!(doubled, k);
  }

  #[test]
  fn short_tokens_are_dropped() {
    let k = normalize("a an is to cat");
    assert_eq!(words(&k), ["cat"]);
  }

  #[test]
  fn greeting_is_noise() {
    assert!(normalize("hi Hi HI!").is_empty());
  }

  #[test]
  fn stoplists_are_removed() {
    let k = normalize("because the important dog really barked");
    assert_eq!(words(&k), ["the", "dog", "barked"]);
  }

  #[test]
  fn every_stopword_is_filtered() {
    for w in CONJUNCTIONS.iter().chain(ADJECTIVES).chain(ADVERBS) {
      assert!(normalize(w).is_empty(), "{w} survived");
    }
  }

  #[test]
  fn duplicates_collapse() {
    let k = normalize("Cat cat CAT cat.");
    assert_eq!(k.len(), 1);
    assert!(k.contains("cat"));
  }

  #[test]
  fn empty_and_whitespace_input() {
    assert!(normalize("").is_empty());
    assert!(normalize("   \t\n ").is_empty());
    assert!(normalize("?!... ---").is_empty());
  }

  #[test]
  fn idempotent_on_own_output() {
    for text in [
      "Where is the cat? The CAT sat on the mat!",
      "so, when will you be back up here?",
      "Tell me about your dog_house and your 3 kittens",
    ] {
      let once = normalize(text);
      let twice = normalize(&once.join());
      assert_eq!(once, twice);
    }
  }

  #[test]
  fn choose_is_reproducible_with_seed() {
    let k = normalize("apple banana cherry durian elderberry");
    let a = k.choose(&mut StdRng::seed_from_u64(7)).map(str::to_owned);
    let b = k.choose(&mut StdRng::seed_from_u64(7)).map(str::to_owned);
    assert_eq!(a, b);
    assert!(k.contains(a.as_deref().unwrap()));
  }

  #[test]
  fn choose_on_empty_is_none() {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(Keywords::default().choose(&mut rng).is_none());
  }
}
