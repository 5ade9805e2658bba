//! Editable ranked list (the state the metrics are computed over).
//!
//! - [`RankedItem`] - one position: stable id, grade text, relevance flag
//! - [`RankingList`] - the ordered items plus cutoff and max grade, with
//!   every edit operation; recomputes the metrics after each one

mod item;
mod list;
mod rng;

pub use item::{parse_grade, ItemId, RankedItem};
pub use list::{RankingList, SortOrder};
