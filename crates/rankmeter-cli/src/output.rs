//! Output formatting for rankings and their metrics.
//!
//! Supports both human-readable terminal output and JSON for scripting.
//! Undefined metrics render as `N/A` for humans and `null` in JSON.

use rankmeter_core::evaluation::{format_value, MetricsSnapshot};
use rankmeter_core::ranking::{ItemId, RankedItem, RankingList};
use serde::Serialize;
use std::collections::BTreeMap;

/// Width of the grade bar at the max grade.
const BAR_WIDTH: usize = 20;

/// JSON output structure for a ranking and its metrics
#[derive(Serialize)]
pub struct JsonOutput<'a> {
    pub max_grade: u32,
    pub items: Vec<JsonItem<'a>>,
    pub metrics: &'a MetricsSnapshot,
}

/// One ranked item in JSON format
#[derive(Serialize)]
pub struct JsonItem<'a> {
    /// 1-indexed rank
    pub position: usize,
    pub id: ItemId,
    /// Grade text as entered
    pub grade: &'a str,
    /// Parsed grade, `null` when the text is not a number
    pub grade_value: Option<f64>,
    pub relevant: bool,
    /// Whether the item lies within the cutoff
    pub in_cutoff: bool,
}

impl<'a> JsonItem<'a> {
    fn new(position: usize, item: &'a RankedItem, k: usize) -> Self {
        let value = item.grade_value();
        Self {
            position,
            id: item.id,
            grade: &item.grade,
            grade_value: (!value.is_nan()).then_some(value),
            relevant: item.relevant,
            in_cutoff: position <= k,
        }
    }
}

/// Formats the list and its metrics as JSON.
pub fn format_json(list: &RankingList) -> String {
    let k = list.cutoff();
    let output = JsonOutput {
        max_grade: list.max_grade(),
        items: list
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| JsonItem::new(i + 1, item, k))
            .collect(),
        metrics: list.snapshot(),
    };
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}

/// Formats the metrics line, e.g. `NDCG@6: 0.9488  Precision@6: 0.5000 ...`.
pub fn format_metrics(snapshot: &MetricsSnapshot) -> String {
    snapshot
        .values()
        .map(|(kind, value)| format!("{}@{}: {}", kind, snapshot.k, format_value(value)))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Formats the list and its metrics for human-readable terminal output.
pub fn format_human(list: &RankingList) -> String {
    let snapshot = list.snapshot();
    let mut output = String::new();

    output.push_str(&format!(
        "Ranking ({} item{}, max grade {})\n",
        list.len(),
        if list.len() == 1 { "" } else { "s" },
        list.max_grade()
    ));
    output.push_str(&format_metrics(snapshot));
    output.push('\n');
    output.push_str(&format!(
        "DCG@{k}: {}  IDCG@{k}: {}\n\n",
        format_value(snapshot.dcg),
        format_value(snapshot.idcg),
        k = snapshot.k
    ));

    for (i, item) in list.items().iter().enumerate() {
        output.push_str(&format_row(i + 1, item, list.max_grade()));
        output.push('\n');
        if i + 1 == snapshot.k && snapshot.k < list.len() {
            output.push_str(&format!("    ---- k = {} ----\n", snapshot.k));
        }
    }

    output.trim_end().to_string()
}

/// Formats one row: position, relevance box, grade, bar and id.
fn format_row(position: usize, item: &RankedItem, max_grade: u32) -> String {
    let grade = if item.grade.is_empty() {
        "-"
    } else {
        item.grade.as_str()
    };
    let bar = if item.has_valid_grade() {
        grade_bar(item.grade_value(), max_grade)
    } else {
        "(invalid)".to_string()
    };

    format!(
        "{:>3}. [{}] {:<6} {:<width$} {}",
        position,
        if item.relevant { 'x' } else { ' ' },
        grade,
        bar,
        item.id,
        width = BAR_WIDTH
    )
}

/// Draws a bar proportional to `grade / max_grade`, capped at full width.
fn grade_bar(grade: f64, max_grade: u32) -> String {
    let ratio = (grade / f64::from(max_grade.max(1))).clamp(0.0, 1.0);
    let filled = (ratio * BAR_WIDTH as f64).round() as usize;
    "#".repeat(filled)
}

/// Formats metrics at every cutoff as a table.
pub fn format_sweep_human(sweep: &BTreeMap<usize, MetricsSnapshot>) -> String {
    let mut output = format!(
        "{:>4}  {:>9}  {:>9}  {:>9}  {:>9}  {:>9}\n",
        "k", "NDCG", "Precision", "Recall", "MAP", "MRR"
    );
    for (k, snapshot) in sweep {
        output.push_str(&format!(
            "{:>4}  {:>9}  {:>9}  {:>9}  {:>9}  {:>9}\n",
            k,
            format_value(snapshot.ndcg),
            format_value(Some(snapshot.precision)),
            format_value(Some(snapshot.recall)),
            format_value(Some(snapshot.map)),
            format_value(Some(snapshot.mrr)),
        ));
    }
    output.trim_end().to_string()
}

/// Formats metrics at every cutoff as a JSON array.
pub fn format_sweep_json(sweep: &BTreeMap<usize, MetricsSnapshot>) -> String {
    let snapshots: Vec<&MetricsSnapshot> = sweep.values().collect();
    serde_json::to_string_pretty(&snapshots).unwrap_or_else(|_| "[]".to_string())
}

/// Metric definitions, printed by the `formulas` command.
pub const FORMULAS: &str = "\
NDCG@k      = DCG@k / IDCG@k
  DCG@k     = sum_{i=1..k} (2^rel_i - 1) / log2(i + 1)
  IDCG@k    = DCG@k of the grades sorted descending (the ideal ordering)
  N/A when a grade is not a number or IDCG@k = 0

Precision@k = (relevant items in the top k) / k

Recall@k    = (relevant items in the top k) / (relevant items overall)
  0 when no item is relevant

MAP@k       = sum_{i=1..k} P(i) * rel(i) / (relevant items in the top k)
  P(i) is the precision at rank i, rel(i) is 1 if item i is relevant
  0 when no relevant item is in the top k

MRR@k       = 1 / rank of the first relevant item
  0 when no relevant item is in the top k";

/// Interactive command reference, printed by the `help` command.
pub const HELP: &str = "\
grade <pos> [value]   set the grade at a position (no value clears it)
rel <pos> [on|off]    set or toggle the relevance flag
max <n>               set the max grade (clamps existing grades)
k <n>                 set the cutoff
add | pop             append an item / remove the last item
insert <pos>          insert an empty item
remove <pos>          remove an item
move <from> <to>      move an item
random                random grades and relevance flags
shuffle               random order
sort [desc|asc]       sort by grade (desc gives the maximal NDCG)
show | sweep          print the list / metrics at every cutoff
formulas | help       print metric definitions / this help
quit                  leave";
