//! All five metrics computed together from one (ranking, k) pair.

use super::metrics::{
    average_precision_at_k, clamp_cutoff, dcg_at_k, ideal_dcg_at_k, ndcg_at_k, precision_at_k,
    recall_at_k, reciprocal_rank_at_k,
};
use crate::config::{DISPLAY_PRECISION, UNDEFINED_LABEL};
use crate::ranking::RankedItem;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// The metrics reported for a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Ndcg,
    Precision,
    Recall,
    Map,
    Mrr,
}

impl MetricKind {
    /// Returns all reported metrics in display order.
    pub fn all() -> &'static [MetricKind] {
        &[
            MetricKind::Ndcg,
            MetricKind::Precision,
            MetricKind::Recall,
            MetricKind::Map,
            MetricKind::Mrr,
        ]
    }

    /// Display label, without the `@k` suffix.
    pub fn label(self) -> &'static str {
        match self {
            MetricKind::Ndcg => "NDCG",
            MetricKind::Precision => "Precision",
            MetricKind::Recall => "Recall",
            MetricKind::Map => "MAP",
            MetricKind::Mrr => "MRR",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Metrics for one ranking at one cutoff.
///
/// Every field comes from the same inputs, so a snapshot is never a mix of
/// stale and fresh values. `None` marks an undefined value; it serializes
/// as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    /// Cutoff the metrics were computed at
    pub k: usize,
    /// DCG@k in the current order (None if a grade is invalid)
    pub dcg: Option<f64>,
    /// DCG@k of the ideal order (None if a grade is invalid)
    pub idcg: Option<f64>,
    /// NDCG@k (None if a grade is invalid or IDCG@k is 0)
    pub ndcg: Option<f64>,
    /// Precision@k
    pub precision: f64,
    /// Recall@k (0 when nothing is relevant)
    pub recall: f64,
    /// Average Precision@k (0 when no relevant item is in the top k)
    pub map: f64,
    /// Reciprocal Rank@k (0 when no relevant item is in the top k)
    pub mrr: f64,
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        Self {
            k: 1,
            dcg: Some(0.0),
            idcg: Some(0.0),
            ndcg: None,
            precision: 0.0,
            recall: 0.0,
            map: 0.0,
            mrr: 0.0,
        }
    }
}

impl MetricsSnapshot {
    /// Computes every metric from grades and relevance flags in ranked order.
    ///
    /// `k` is clamped into `[1, len]` before use.
    ///
    /// # Arguments
    ///
    /// * `grades` - Graded relevance per position; `NaN` marks an invalid grade
    /// * `relevant` - Binary relevance per position
    /// * `k` - Cutoff position
    pub fn compute(grades: &[f64], relevant: &[bool], k: usize) -> Self {
        let k = clamp_cutoff(k, grades.len().max(relevant.len()));
        let grades_valid = !grades.iter().any(|grade| grade.is_nan());

        Self {
            k,
            dcg: grades_valid.then(|| dcg_at_k(grades, k)),
            idcg: grades_valid.then(|| ideal_dcg_at_k(grades, k)),
            ndcg: ndcg_at_k(grades, k),
            precision: precision_at_k(relevant, k),
            recall: recall_at_k(relevant, k),
            map: average_precision_at_k(relevant, k),
            mrr: reciprocal_rank_at_k(relevant, k),
        }
    }

    /// Returns the value of one metric.
    pub fn value(&self, kind: MetricKind) -> Option<f64> {
        match kind {
            MetricKind::Ndcg => self.ndcg,
            MetricKind::Precision => Some(self.precision),
            MetricKind::Recall => Some(self.recall),
            MetricKind::Map => Some(self.map),
            MetricKind::Mrr => Some(self.mrr),
        }
    }

    /// Returns `(metric, value)` pairs in display order.
    pub fn values(&self) -> impl Iterator<Item = (MetricKind, Option<f64>)> + '_ {
        MetricKind::all()
            .iter()
            .map(move |&kind| (kind, self.value(kind)))
    }
}

/// Formats a metric value with four decimals, or `N/A` when undefined.
pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.prec$}", v, prec = DISPLAY_PRECISION),
        None => UNDEFINED_LABEL.to_string(),
    }
}

/// Recomputes the full snapshot for a ranking at cutoff `k`.
///
/// This is the single entry point the list controller calls after each
/// edit. It reads the items without modifying them.
pub fn recompute(items: &[RankedItem], k: usize) -> MetricsSnapshot {
    let grades: Vec<f64> = items.iter().map(RankedItem::grade_value).collect();
    let relevant: Vec<bool> = items.iter().map(|item| item.relevant).collect();
    MetricsSnapshot::compute(&grades, &relevant, k)
}

/// Computes snapshots for several cutoffs of the same ranking.
///
/// Cutoffs are clamped into `[1, len]` and keyed by their clamped value, so
/// duplicates collapse into one entry.
pub fn evaluate_at_cutoffs(
    items: &[RankedItem],
    cutoffs: impl IntoIterator<Item = usize>,
) -> BTreeMap<usize, MetricsSnapshot> {
    let grades: Vec<f64> = items.iter().map(RankedItem::grade_value).collect();
    let relevant: Vec<bool> = items.iter().map(|item| item.relevant).collect();

    cutoffs
        .into_iter()
        .map(|k| {
            let snapshot = MetricsSnapshot::compute(&grades, &relevant, k);
            (snapshot.k, snapshot)
        })
        .collect()
}
