//! The daily lesson sync.
//!
//! [`Daybook::sync`] reads the previous cache, fetches the target day's
//! events from the main and demo calendars, classifies them, resolves every
//! student to a folder, folds students into one lesson per event, carries
//! over state from the previous cache, and rewrites the cache.
//!
//! The remaining [`Daybook`] methods are the point reads and updates that
//! the outer layer calls between syncs.

pub mod aggregate;
pub mod occurrence;
pub mod pipeline;
pub mod reconcile;
pub mod resolve;

pub use aggregate::aggregate;
pub use pipeline::Daybook;
pub use reconcile::reconcile;
pub use resolve::{Resolution, Roster};
