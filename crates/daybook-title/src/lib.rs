//! Rule-based text processing for calendar event titles and descriptions.
//!
//! Every rule is a pure function over strings; nothing here performs I/O or
//! keeps state between calls.
//!
//! ```
//! use daybook_title::parse_names;
//!
//! assert_eq!(parse_names("Alice and Bob Smith"), ["Alice Smith", "Bob Smith"]);
//! ```

pub mod classify;
pub mod kind;
pub mod names;

pub use classify::{Category, Classified, ExclusionReason, LessonTraits, classify};
pub use kind::LessonKind;
pub use names::parse_names;
