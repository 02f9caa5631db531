//! Student-name extraction from event titles.
//!
//! Pipeline:
//!   raw title
//!     └─ strip_parenthetical()   → drop "(Cafe)" / "(Online)" modifiers
//!          └─ strip_child_marker()  → drop 子
//!               └─ split_conjunction()  → one token per student
//!                    └─ strip_trial_marker()  → drop "D/L" per token
//!                         └─ shared_surname()  → fill first-name-only tokens

use std::sync::LazyLock;

use regex::Regex;

/// Glyph marking a kids' lesson in a title.
pub const CHILD_MARKER: char = '子';

static CONJUNCTION: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)\s+and\s+").expect("conjunction pattern"));

static TRIAL_MARKER: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)D/L").expect("trial marker pattern"));

// ─── Individual rules ────────────────────────────────────────────────────────

/// Everything before the first `(`.
pub fn strip_parenthetical(title: &str) -> &str {
  match title.find('(') {
    Some(i) => &title[..i],
    None => title,
  }
}

pub fn strip_child_marker(s: &str) -> String { s.replace(CHILD_MARKER, "") }

/// Whether `s` carries the trial-lesson marker anywhere.
pub fn has_trial_marker(s: &str) -> bool { TRIAL_MARKER.is_match(s) }

/// Split on a whitespace-delimited `and`; tokens are trimmed and empty ones
/// dropped.
pub fn split_conjunction(s: &str) -> Vec<String> {
  CONJUNCTION
    .split(s)
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .map(str::to_string)
    .collect()
}

/// Remove every trial marker from `token` and collapse the whitespace left
/// behind.
pub fn strip_trial_marker(token: &str) -> String {
  normalize_whitespace(&TRIAL_MARKER.replace_all(token, " "))
}

fn normalize_whitespace(s: &str) -> String {
  s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn word_count(s: &str) -> usize { s.split_whitespace().count() }

fn last_word(s: &str) -> Option<&str> { s.split_whitespace().last() }

/// The surname shared by a multi-student title.
///
/// If the first candidate is a bare first name, the surname is the last word
/// of the first later candidate with at least two words. Otherwise it is the
/// first candidate's own last word. Fewer than two candidates never share a
/// surname.
pub fn shared_surname<S: AsRef<str>>(candidates: &[S]) -> Option<String> {
  let [first, rest @ ..] = candidates else {
    return None;
  };
  if rest.is_empty() {
    return None;
  }

  let first = first.as_ref();
  let source = if word_count(first) == 1 {
    rest.iter().map(|c| c.as_ref()).find(|c| word_count(c) >= 2)?
  } else {
    first
  };
  last_word(source).map(str::to_string)
}

/// Append `surname` to a single-word `token`; other tokens pass through.
pub fn apply_surname(token: &str, surname: Option<&str>) -> String {
  match surname {
    Some(surname) if word_count(token) == 1 => format!("{token} {surname}"),
    _ => token.to_string(),
  }
}

// ─── Composition ─────────────────────────────────────────────────────────────

/// Extract the ordered list of full student names from a raw event title.
///
/// An empty or whitespace-only title yields no names.
pub fn parse_names(title: &str) -> Vec<String> {
  let base = strip_child_marker(strip_parenthetical(title));

  let tokens: Vec<String> = split_conjunction(&base)
    .iter()
    .map(|t| strip_trial_marker(t))
    .filter(|t| !t.is_empty())
    .collect();

  let surname = shared_surname(&tokens);
  tokens
    .iter()
    .map(|t| apply_surname(t, surname.as_deref()))
    .collect()
}
