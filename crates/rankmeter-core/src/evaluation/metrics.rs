//! Standard Information Retrieval metrics for a single ranked list.
//!
//! This module implements the metrics computed for every edit of a ranking:
//! - NDCG (Normalized Discounted Cumulative Gain), over graded relevance
//! - Precision@k, Recall@k, over binary relevance
//! - Average Precision@k (reported as MAP for the single query)
//! - Reciprocal Rank@k (reported as MRR for the single query)
//!
//! Graded and binary relevance are independent inputs: NDCG reads grades,
//! everything else reads the relevance flags.
//!
//! # Undefined vs. zero
//!
//! NDCG returns `None` when it has no meaningful value: an unparsed grade
//! anywhere in the sequence (marked as `NaN`) or an ideal DCG of zero.
//! Recall, AP and RR instead return `0.0` when there is nothing relevant to
//! find, since their numerators are counts that are legitimately zero.
//!
//! # References
//!
//! - Järvelin & Kekäläinen (2002). "Cumulated gain-based evaluation of IR techniques"
//! - Voorhees & Harman (2005). "TREC: Experiment and Evaluation in Information Retrieval"

/// Clamps a requested cutoff into `[1, len]`.
///
/// Callers are expected to pass an in-range cutoff already; every metric
/// still clamps internally so an out-of-range value never panics or divides
/// by zero. An empty sequence yields a cutoff of 1.
pub fn clamp_cutoff(k: usize, len: usize) -> usize {
    k.clamp(1, len.max(1))
}

// ============================================================================
// NDCG (Normalized Discounted Cumulative Gain)
// ============================================================================

/// Computes DCG@k (Discounted Cumulative Gain at k) over grades in their current order.
///
/// # Formula
///
/// ```text
/// DCG@k = Σ (2^grade_i - 1) / log₂(i + 1)  for i in 1..=k
/// ```
///
/// Positions past the end of `grades` contribute nothing. A `NaN` grade
/// makes the whole sum `NaN`.
pub fn dcg_at_k(grades: &[f64], k: usize) -> f64 {
    let k = clamp_cutoff(k, grades.len());
    grades
        .iter()
        .take(k)
        .enumerate()
        .map(|(i, &grade)| gain(grade) / discount(i + 1))
        .sum()
}

/// Computes IDCG@k, the DCG of the ideal ordering.
///
/// The ideal ordering is the full grade sequence sorted descending, so the
/// ideal top k may contain grades that currently sit below the cutoff.
pub fn ideal_dcg_at_k(grades: &[f64], k: usize) -> f64 {
    let mut ideal = grades.to_vec();
    ideal.sort_by(|a, b| b.total_cmp(a));
    dcg_at_k(&ideal, k)
}

/// Computes NDCG@k (Normalized Discounted Cumulative Gain at k).
///
/// # Formula
///
/// ```text
/// NDCG@k = DCG@k / IDCG@k
/// ```
///
/// # Arguments
///
/// * `grades` - Relevance grades in ranked order; `NaN` marks a grade that failed to parse
/// * `k` - Cutoff position (only considers top k positions)
///
/// # Returns
///
/// `Some(score)` for a finite ratio. `None` if any grade is `NaN`, or if the
/// ratio is not finite (IDCG@k = 0 because every grade is 0).
///
/// # Example
///
/// ```
/// use rankmeter_core::evaluation::ndcg_at_k;
///
/// assert_eq!(ndcg_at_k(&[2.0, 1.0, 0.0], 3), Some(1.0));
/// assert_eq!(ndcg_at_k(&[0.0, 0.0], 2), None);
/// assert_eq!(ndcg_at_k(&[1.0, f64::NAN], 1), None);
/// ```
pub fn ndcg_at_k(grades: &[f64], k: usize) -> Option<f64> {
    if grades.iter().any(|grade| grade.is_nan()) {
        return None;
    }

    let dcg = dcg_at_k(grades, k);
    let idcg = ideal_dcg_at_k(grades, k);

    Some(dcg / idcg).filter(|ndcg| ndcg.is_finite())
}

/// Computes the gain from a relevance grade.
///
/// Uses exponential gain: 2^grade - 1
/// This gives: grade=0 -> 0, grade=1 -> 1, grade=2 -> 3
#[inline]
fn gain(grade: f64) -> f64 {
    grade.exp2() - 1.0
}

/// Computes the discount factor for position (1-indexed).
///
/// Uses logarithmic discount: log₂(position + 1)
#[inline]
fn discount(position: usize) -> f64 {
    (position as f64 + 1.0).log2()
}

// ============================================================================
// Set-Based Metrics: Precision, Recall
// ============================================================================

/// Computes Precision@k, the fraction of the top k positions that are relevant.
///
/// # Formula
///
/// ```text
/// P@k = |relevant ∩ top_k| / k
/// ```
pub fn precision_at_k(relevant: &[bool], k: usize) -> f64 {
    let k = clamp_cutoff(k, relevant.len());
    relevant_in_top_k(relevant, k) as f64 / k as f64
}

/// Computes Recall@k, the fraction of all relevant items that appear in the top k.
///
/// # Formula
///
/// ```text
/// R@k = |relevant ∩ top_k| / |relevant|
/// ```
///
/// # Returns
///
/// Recall between 0.0 and 1.0. Returns 0.0 if no item is relevant.
pub fn recall_at_k(relevant: &[bool], k: usize) -> f64 {
    let total_relevant = relevant.iter().filter(|&&flag| flag).count();
    if total_relevant == 0 {
        return 0.0;
    }

    let k = clamp_cutoff(k, relevant.len());
    relevant_in_top_k(relevant, k) as f64 / total_relevant as f64
}

fn relevant_in_top_k(relevant: &[bool], k: usize) -> usize {
    relevant.iter().take(k).filter(|&&flag| flag).count()
}

// ============================================================================
// MAP (Average Precision for a single query)
// ============================================================================

/// Computes Average Precision@k for a single ranked list.
///
/// Precision is sampled at each relevant position within the top k and
/// averaged over the number of relevant positions found there.
///
/// # Formula
///
/// ```text
/// AP@k = (1 / |relevant ∩ top_k|) * Σ P(i) * rel(i)  for i in 1..=k
/// ```
///
/// # Returns
///
/// Average Precision between 0.0 and 1.0. Returns 0.0 if no relevant item
/// appears in the top k.
pub fn average_precision_at_k(relevant: &[bool], k: usize) -> f64 {
    let k = clamp_cutoff(k, relevant.len());

    let mut precision_sum = 0.0;
    let mut relevant_found = 0;

    for (i, &flag) in relevant.iter().take(k).enumerate() {
        if flag {
            relevant_found += 1;
            // Precision at this position
            precision_sum += relevant_found as f64 / (i + 1) as f64;
        }
    }

    if relevant_found == 0 {
        0.0
    } else {
        precision_sum / relevant_found as f64
    }
}

// ============================================================================
// MRR (Reciprocal Rank for a single query)
// ============================================================================

/// Computes Reciprocal Rank@k: 1 / position of the first relevant item.
///
/// # Returns
///
/// Reciprocal Rank between 0.0 and 1.0. Returns 0.0 if no relevant item
/// appears in the top k.
pub fn reciprocal_rank_at_k(relevant: &[bool], k: usize) -> f64 {
    let k = clamp_cutoff(k, relevant.len());
    relevant
        .iter()
        .take(k)
        .position(|&flag| flag)
        .map_or(0.0, |i| 1.0 / (i + 1) as f64)
}

// ============================================================================
// Tests
// ============================================================================
