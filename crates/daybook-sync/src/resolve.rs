//! Identity resolution: student name → storage folder.

use std::collections::HashMap;

use daybook_core::{lesson::placeholder_folder, store::RosterEntry};

/// The outcome of resolving one student name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
  /// The student is on the roster.
  Registered(String),
  /// Unregistered trial student; synthesized `"<name> DEMO"` identifier.
  Placeholder(String),
  /// Unregistered regular student. The lesson is kept without a folder.
  Unresolved,
}

impl Resolution {
  pub fn folder_name(&self) -> &str {
    match self {
      Self::Registered(f) | Self::Placeholder(f) => f,
      Self::Unresolved => "",
    }
  }

  pub fn into_folder_name(self) -> String {
    match self {
      Self::Registered(f) | Self::Placeholder(f) => f,
      Self::Unresolved => String::new(),
    }
  }
}

/// Immutable name → folder snapshot, taken once per sync.
#[derive(Debug, Clone, Default)]
pub struct Roster {
  folders: HashMap<String, String>,
}

impl Roster {
  /// Build from roster rows. Rows with a blank name or folder are skipped;
  /// for a duplicated name the first row wins.
  pub fn from_entries(entries: impl IntoIterator<Item = RosterEntry>) -> Self {
    let mut folders = HashMap::new();
    for entry in entries {
      let name = entry.student_name.trim();
      let folder = entry.folder_name.trim();
      if name.is_empty() || folder.is_empty() {
        continue;
      }
      folders
        .entry(name.to_string())
        .or_insert_with(|| folder.to_string());
    }
    Self { folders }
  }

  pub fn len(&self) -> usize { self.folders.len() }

  pub fn is_empty(&self) -> bool { self.folders.is_empty() }

  /// The roster folder for `name`, if registered.
  pub fn folder_for(&self, name: &str) -> Option<&str> {
    self.folders.get(name.trim()).map(String::as_str)
  }

  pub fn resolve(&self, name: &str, is_demo: bool) -> Resolution {
    match self.folder_for(name) {
      Some(folder) => Resolution::Registered(folder.to_string()),
      None if is_demo => Resolution::Placeholder(placeholder_folder(name.trim())),
      None => Resolution::Unresolved,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entry(name: &str, folder: &str) -> RosterEntry {
    RosterEntry { student_name: name.into(), folder_name: folder.into() }
  }

  fn roster() -> Roster {
    Roster::from_entries([
      entry("Alice Smith", "0012 Alice Smith"),
      entry("", "0099 Nobody"),
      entry("Ghost", ""),
      entry("Alice Smith", "0013 Alice Smith"),
    ])
  }

  #[test]
  fn blank_rows_skipped_and_first_duplicate_wins() {
    let r = roster();
    assert_eq!(r.len(), 1);
    assert!(!r.is_empty());
    assert!(Roster::from_entries([entry("", "0099 Nobody")]).is_empty());
    assert_eq!(r.folder_for("Alice Smith"), Some("0012 Alice Smith"));
  }

  #[test]
  fn registered_student_resolves_to_folder() {
    let r = roster();
    assert_eq!(
      r.resolve(" Alice Smith ", false),
      Resolution::Registered("0012 Alice Smith".into())
    );
    // Registration wins over the trial marker.
    assert_eq!(r.resolve("Alice Smith", true).folder_name(), "0012 Alice Smith");
  }

  #[test]
  fn unregistered_trial_student_gets_placeholder() {
    let r = roster();
    let res = r.resolve("Jane", true);
    assert_eq!(res, Resolution::Placeholder("Jane DEMO".into()));
    assert_eq!(res.into_folder_name(), "Jane DEMO");
  }

  #[test]
  fn unregistered_regular_student_is_unresolved() {
    let r = roster();
    let res = r.resolve("Jane", false);
    assert_eq!(res, Resolution::Unresolved);
    assert_eq!(res.folder_name(), "");
  }
}
