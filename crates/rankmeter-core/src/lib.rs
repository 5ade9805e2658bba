//! # Rankmeter Core
//!
//! Ranking-quality metrics over a user-editable ranked list.
//!
//! This crate holds the metrics engine and the list state it is evaluated
//! over, with no dependency on any particular front end.
//!
//! ## Modules
//!
//! - [`evaluation`] - NDCG, Precision, Recall, MAP and MRR at a cutoff k
//! - [`ranking`] - Ranked items and the editable list controller
//! - [`config`] - Default list settings and display constants
//! - [`error`] - Error types for list edits

pub mod config;
pub mod error;
pub mod evaluation;
pub mod ranking;

pub use error::ListError;
pub use evaluation::{recompute, MetricsSnapshot};
pub use ranking::{ItemId, RankedItem, RankingList};
