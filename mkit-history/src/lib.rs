//! Persisted generation history.
//!
//! One JSON object on disk maps each case-folded service name to the
//! timestamp and file list of the run that generated it. This is the only
//! state outside the aggregation files, and it is what makes removal
//! possible at all.

mod error;
mod store;

pub use error::{Error, Result};
pub use store::{HISTORY_FILE, HistoryEntry, HistoryStore};
