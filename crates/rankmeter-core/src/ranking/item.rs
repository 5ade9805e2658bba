use serde::Serialize;
use std::fmt;

/// Stable identifier of a ranked item.
///
/// Positions change whenever the list is reordered; the identifier does not.
/// Identifiers are allocated by the owning [`RankingList`](super::RankingList)
/// and carry no meaning for the metrics themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ItemId(u64);

impl ItemId {
    /// Creates an ItemId from a raw u64 value.
    ///
    /// Useful for testing and for addressing items by the number shown in
    /// their display form. Be careful not to create duplicate IDs in one list.
    pub fn from_u64(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw u64 value of this ID.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item-{}", self.0)
    }
}

/// One position in the ranking under evaluation.
///
/// The grade is kept as the text the user typed so that an unparsable entry
/// survives edits and reorders unchanged. Graded relevance (for NDCG) and
/// the binary relevance flag (for everything else) are independent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedItem {
    /// Stable identifier
    pub id: ItemId,
    /// Grade text as entered (empty means 0)
    pub grade: String,
    /// Binary relevance judgment
    pub relevant: bool,
}

impl RankedItem {
    /// Creates an item with an empty grade that is not relevant.
    pub fn new(id: ItemId) -> Self {
        Self::with_grade(id, String::new(), false)
    }

    /// Creates an item with the given grade text and relevance flag.
    pub fn with_grade(id: ItemId, grade: impl Into<String>, relevant: bool) -> Self {
        Self {
            id,
            grade: grade.into(),
            relevant,
        }
    }

    /// Returns the numeric grade, or `NaN` when the text does not parse.
    pub fn grade_value(&self) -> f64 {
        parse_grade(&self.grade)
    }

    /// Returns true if the grade text parses as a number.
    pub fn has_valid_grade(&self) -> bool {
        !self.grade_value().is_nan()
    }
}

/// Parses grade text into the value consumed by the metrics engine.
///
/// Empty or whitespace-only text reads as 0. Text that is not a finite
/// decimal number yields `NaN`, the invalid-grade marker that makes NDCG
/// undefined. That includes `inf`, `NaN` and overflowing exponents such as
/// `1e400`; hex forms like `0x10` are not numbers here either.
pub fn parse_grade(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(f64::NAN)
}
