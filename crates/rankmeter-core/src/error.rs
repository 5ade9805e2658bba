//! Error types for rankmeter-core.
//!
//! The metrics engine itself never fails: degenerate inputs resolve to a
//! numeric zero or an undefined (`None`) value. Errors only arise when the
//! list controller is asked to do something impossible, such as editing a
//! position that does not exist.

use crate::ranking::ItemId;
use thiserror::Error;

/// Errors that can occur while editing a ranked list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// Index is past the end of the list
    #[error("Index {index} is out of range for a list of {len} items")]
    IndexOutOfRange { index: usize, len: usize },
    /// The list must always keep at least one item
    #[error("Cannot remove the last remaining item")]
    LastItem,
    /// No item carries the given identifier
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),
}
