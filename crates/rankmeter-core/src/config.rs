//! Default configuration constants.
//!
//! These values define the initial state of a fresh ranked list and the
//! formatting used when metrics are displayed.
//!
//! # Usage
//!
//! ```
//! use rankmeter_core::config::{DEFAULT_LIST_LEN, DEFAULT_MAX_GRADE};
//! use rankmeter_core::ranking::RankingList;
//!
//! let list = RankingList::new();
//! assert_eq!(list.len(), DEFAULT_LIST_LEN);
//! assert_eq!(list.max_grade(), DEFAULT_MAX_GRADE);
//! ```

// =============================================================================
// List Defaults
// =============================================================================

/// Number of items in a freshly created list.
///
/// Every item starts with an empty grade (read as 0) and is not relevant,
/// and the cutoff starts at the full list length.
pub const DEFAULT_LIST_LEN: usize = 10;

/// Upper bound on grades for a freshly created list.
pub const DEFAULT_MAX_GRADE: u32 = 5;

/// Smallest accepted max grade. Lower requests are raised to this value.
pub const MIN_MAX_GRADE: u32 = 1;

/// Seed used for randomize/shuffle when none is supplied.
pub const DEFAULT_SEED: u64 = 0x5EED;

// =============================================================================
// Display
// =============================================================================

/// Decimal places used when rendering a metric value.
pub const DISPLAY_PRECISION: usize = 4;

/// Text rendered in place of an undefined metric.
pub const UNDEFINED_LABEL: &str = "N/A";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_usable() {
        // Using explicit bindings to avoid clippy::assertions_on_constants
        let len = DEFAULT_LIST_LEN;
        let max_grade = DEFAULT_MAX_GRADE;
        assert!(len >= 1, "a list must hold at least one item");
        assert!(max_grade >= MIN_MAX_GRADE);
    }
}
