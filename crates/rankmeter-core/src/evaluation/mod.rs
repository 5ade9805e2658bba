//! Metrics engine for measuring ranking quality.
//!
//! This module provides standard Information Retrieval (IR) metrics computed
//! over one ranked list at a cutoff k. Every function is pure: it reads the
//! grades and relevance flags it is given and returns a value, keeping no
//! state between calls.
//!
//! # Example
//!
//! ```
//! use rankmeter_core::evaluation::{ndcg_at_k, precision_at_k, MetricsSnapshot};
//!
//! let grades = [3.0, 2.0, 3.0, 0.0, 1.0, 2.0];
//! let relevant = [true, true, false, false, true, false];
//!
//! let ndcg = ndcg_at_k(&grades, 6).unwrap();
//! assert!((ndcg - 0.9488).abs() < 1e-4);
//! assert_eq!(precision_at_k(&relevant, 6), 0.5);
//!
//! let snapshot = MetricsSnapshot::compute(&grades, &relevant, 6);
//! assert_eq!(snapshot.recall, 1.0);
//! ```
//!
//! # Metrics Reference
//!
//! | Metric | Input | Empty/degenerate case |
//! |--------|-------|-----------------------|
//! | NDCG@k | grades | undefined (invalid grade, or IDCG@k = 0) |
//! | P@k | flags | never degenerate (k ≥ 1) |
//! | R@k | flags | 0 when nothing is relevant |
//! | MAP@k | flags | 0 when no relevant item in the top k |
//! | MRR@k | flags | 0 when no relevant item in the top k |

pub mod metrics;
pub mod snapshot;

pub use metrics::{
    average_precision_at_k, clamp_cutoff, dcg_at_k, ideal_dcg_at_k, ndcg_at_k, precision_at_k,
    recall_at_k, reciprocal_rank_at_k,
};
pub use snapshot::{evaluate_at_cutoffs, format_value, recompute, MetricKind, MetricsSnapshot};
