use super::item::{ItemId, RankedItem};
use super::rng::LcgRng;
use crate::config::{DEFAULT_LIST_LEN, DEFAULT_MAX_GRADE, DEFAULT_SEED, MIN_MAX_GRADE};
use crate::error::ListError;
use crate::evaluation::{clamp_cutoff, evaluate_at_cutoffs, recompute, MetricsSnapshot};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

/// Direction for [`RankingList::sort_by_grade`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Highest grade first (the ideal ordering, maximal NDCG)
    Descending,
    /// Lowest grade first (minimal NDCG)
    Ascending,
}

/// Editable ranked list with its cutoff and max grade.
///
/// `RankingList` owns the ordered items and recomputes the full
/// [`MetricsSnapshot`] after every mutation, so [`snapshot`](Self::snapshot)
/// always reflects the current items and cutoff together. Positions are
/// 0-indexed; failed edits return a [`ListError`] and leave the list untouched.
///
/// # Example
///
/// ```
/// use rankmeter_core::ranking::RankingList;
///
/// let mut list = RankingList::with_len(3);
/// list.set_grade(0, "2").unwrap();
/// list.set_relevance(0, true).unwrap();
///
/// let snapshot = list.snapshot();
/// assert_eq!(snapshot.k, 3);
/// assert_eq!(snapshot.ndcg, Some(1.0));
/// assert_eq!(snapshot.mrr, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct RankingList {
    items: Vec<RankedItem>,
    cutoff: usize,
    max_grade: u32,
    next_id: u64,
    rng: LcgRng,
    snapshot: MetricsSnapshot,
}

impl Default for RankingList {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingList {
    /// Creates the default list: empty grades, nothing relevant, k = length.
    pub fn new() -> Self {
        Self::with_len(DEFAULT_LIST_LEN)
    }

    /// Creates a list of `len` empty items (at least one).
    pub fn with_len(len: usize) -> Self {
        Self::from_entries((0..len.max(1)).map(|_| (String::new(), false)))
    }

    /// Creates a list from `(grade text, relevant)` pairs in ranked order.
    ///
    /// An empty input produces a single empty item, since a ranking always
    /// holds at least one position. The cutoff starts at the full length.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        let mut list = Self {
            items: Vec::new(),
            cutoff: 0,
            max_grade: DEFAULT_MAX_GRADE,
            next_id: 0,
            rng: LcgRng::new(DEFAULT_SEED),
            snapshot: MetricsSnapshot::default(),
        };

        for (grade, relevant) in entries {
            let id = list.allocate_id();
            list.items.push(RankedItem::with_grade(id, grade, relevant));
        }
        if list.items.is_empty() {
            let id = list.allocate_id();
            list.items.push(RankedItem::new(id));
        }

        list.cutoff = list.items.len();
        list.refresh();
        list
    }

    /// Reseeds the generator used by [`randomize`](Self::randomize) and
    /// [`shuffle`](Self::shuffle).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = LcgRng::new(seed);
        self
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Items in ranked order.
    pub fn items(&self) -> &[RankedItem] {
        &self.items
    }

    /// Item at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&RankedItem> {
        self.items.get(index)
    }

    /// Number of items (always at least one).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; a ranking keeps at least one item.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current cutoff k, within `[1, len]`.
    pub fn cutoff(&self) -> usize {
        self.cutoff
    }

    /// Current upper bound on grades.
    pub fn max_grade(&self) -> u32 {
        self.max_grade
    }

    /// Metrics computed from the current items and cutoff.
    pub fn snapshot(&self) -> &MetricsSnapshot {
        &self.snapshot
    }

    /// Metrics at every cutoff from 1 to the list length.
    pub fn sweep(&self) -> BTreeMap<usize, MetricsSnapshot> {
        evaluate_at_cutoffs(&self.items, 1..=self.items.len())
    }

    // ------------------------------------------------------------------------
    // Field edits
    // ------------------------------------------------------------------------

    /// Replaces the grade text at `index`.
    ///
    /// Any text is accepted; text that does not parse as a number makes NDCG
    /// undefined until it is corrected.
    pub fn set_grade(&mut self, index: usize, grade: impl Into<String>) -> Result<(), ListError> {
        self.check_index(index)?;
        self.items[index].grade = grade.into();
        self.refresh();
        Ok(())
    }

    /// Sets the binary relevance flag at `index`.
    pub fn set_relevance(&mut self, index: usize, relevant: bool) -> Result<(), ListError> {
        self.check_index(index)?;
        self.items[index].relevant = relevant;
        self.refresh();
        Ok(())
    }

    /// Flips the binary relevance flag at `index`, returning the new value.
    pub fn toggle_relevance(&mut self, index: usize) -> Result<bool, ListError> {
        self.check_index(index)?;
        let relevant = !self.items[index].relevant;
        self.set_relevance(index, relevant)?;
        Ok(relevant)
    }

    /// Changes the max grade and clamps existing grades to it.
    ///
    /// The new bound is raised to at least [`MIN_MAX_GRADE`]. Every parseable
    /// grade is rewritten as `min(grade, max_grade)`, so empty grades become
    /// `"0"`. Unparseable grade text is left as is.
    pub fn set_max_grade(&mut self, max_grade: u32) {
        let max_grade = max_grade.max(MIN_MAX_GRADE);
        self.max_grade = max_grade;

        for item in &mut self.items {
            let value = item.grade_value();
            if !value.is_nan() {
                item.grade = value.min(f64::from(max_grade)).to_string();
            }
        }
        self.refresh();
    }

    /// Sets the cutoff, clamped into `[1, len]`. Returns the applied cutoff.
    pub fn set_cutoff(&mut self, k: usize) -> usize {
        self.cutoff = clamp_cutoff(k, self.items.len());
        self.refresh();
        self.cutoff
    }

    // ------------------------------------------------------------------------
    // Structural edits
    // ------------------------------------------------------------------------

    /// Appends an empty item and extends the cutoff by one.
    pub fn push_item(&mut self) -> ItemId {
        let id = self.allocate_id();
        self.items.push(RankedItem::new(id));
        self.cutoff += 1;
        self.refresh();
        id
    }

    /// Removes the last item. Refused when only one item remains.
    pub fn pop_item(&mut self) -> Result<RankedItem, ListError> {
        if self.items.len() <= 1 {
            return Err(ListError::LastItem);
        }
        let item = self.items.pop().ok_or(ListError::LastItem)?;
        self.refresh();
        Ok(item)
    }

    /// Inserts an empty item at `index` (which may equal the length).
    ///
    /// The cutoff is left unchanged.
    pub fn insert_item(&mut self, index: usize) -> Result<ItemId, ListError> {
        if index > self.items.len() {
            return Err(ListError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let id = self.allocate_id();
        self.items.insert(index, RankedItem::new(id));
        self.refresh();
        Ok(id)
    }

    /// Removes the item at `index`. Refused when only one item remains.
    pub fn remove_item(&mut self, index: usize) -> Result<RankedItem, ListError> {
        self.check_index(index)?;
        if self.items.len() <= 1 {
            return Err(ListError::LastItem);
        }
        let item = self.items.remove(index);
        self.refresh();
        Ok(item)
    }

    /// Moves the item at `from` so it ends up at `to`, shifting the items between.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), ListError> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from != to {
            let item = self.items.remove(from);
            self.items.insert(to, item);
        }
        self.refresh();
        Ok(())
    }

    /// Drag-and-drop form of [`move_item`](Self::move_item): moves `active`
    /// to the position currently held by `over`.
    pub fn move_item_by_id(&mut self, active: ItemId, over: ItemId) -> Result<(), ListError> {
        if active == over {
            return Ok(());
        }
        let from = self.position_of(active)?;
        let to = self.position_of(over)?;
        self.move_item(from, to)
    }

    /// Position of the item with the given id.
    pub fn position_of(&self, id: ItemId) -> Result<usize, ListError> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or(ListError::ItemNotFound(id))
    }

    // ------------------------------------------------------------------------
    // Bulk edits
    // ------------------------------------------------------------------------

    /// Assigns every item a uniform integer grade in `[0, max_grade]` and
    /// marks it relevant with probability 1/2.
    pub fn randomize(&mut self) {
        let choices = self.max_grade as usize + 1;
        for item in &mut self.items {
            item.grade = self.rng.next_usize(choices).to_string();
            item.relevant = self.rng.next_f64() < 0.5;
        }
        self.refresh();
    }

    /// Shuffles the items in place (Fisher–Yates).
    pub fn shuffle(&mut self) {
        for i in (1..self.items.len()).rev() {
            let j = self.rng.next_usize(i + 1);
            self.items.swap(i, j);
        }
        self.refresh();
    }

    /// Sorts highest grade first, producing the maximal NDCG.
    pub fn sort_descending(&mut self) {
        self.sort_by_grade(SortOrder::Descending);
    }

    /// Sorts lowest grade first, producing the minimal NDCG.
    pub fn sort_ascending(&mut self) {
        self.sort_by_grade(SortOrder::Ascending);
    }

    /// Stable sort by numeric grade. Items with unparseable grades go last
    /// in either order.
    pub fn sort_by_grade(&mut self, order: SortOrder) {
        self.items.sort_by(|a, b| {
            let (x, y) = (a.grade_value(), b.grade_value());
            match (x.is_nan(), y.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => {
                    let ordering = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
                    match order {
                        SortOrder::Ascending => ordering,
                        SortOrder::Descending => ordering.reverse(),
                    }
                }
            }
        });
        self.refresh();
    }

    // ------------------------------------------------------------------------
    // Internal
    // ------------------------------------------------------------------------

    fn allocate_id(&mut self) -> ItemId {
        let id = ItemId::from_u64(self.next_id);
        self.next_id += 1;
        id
    }

    fn check_index(&self, index: usize) -> Result<(), ListError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(ListError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }

    /// Re-clamps the cutoff and recomputes every metric from the current items.
    fn refresh(&mut self) {
        self.cutoff = clamp_cutoff(self.cutoff, self.items.len());
        self.snapshot = recompute(&self.items, self.cutoff);
        debug!(
            len = self.items.len(),
            k = self.cutoff,
            ndcg = ?self.snapshot.ndcg,
            precision = self.snapshot.precision,
            "Recomputed metrics"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grades(list: &RankingList) -> Vec<&str> {
        list.items().iter().map(|item| item.grade.as_str()).collect()
    }

    fn ids(list: &RankingList) -> Vec<u64> {
        list.items().iter().map(|item| item.id.as_u64()).collect()
    }

    fn scenario() -> RankingList {
        RankingList::from_entries([
            ("3", true),
            ("2", true),
            ("3", false),
            ("0", false),
            ("1", true),
            ("2", false),
        ])
    }

    #[test]
    fn test_default_list() {
        let list = RankingList::new();
        assert_eq!(list.len(), DEFAULT_LIST_LEN);
        assert_eq!(list.cutoff(), DEFAULT_LIST_LEN);
        assert_eq!(list.max_grade(), DEFAULT_MAX_GRADE);
        assert!(list.items().iter().all(|item| item.grade.is_empty()));

        // Empty grades read as 0, so NDCG has no ideal gain to normalize by
        let snapshot = list.snapshot();
        assert_eq!(snapshot.ndcg, None);
        assert_eq!(snapshot.precision, 0.0);
        assert_eq!(snapshot.recall, 0.0);
        assert_eq!(snapshot.map, 0.0);
        assert_eq!(snapshot.mrr, 0.0);
    }

    #[test]
    fn test_with_len_keeps_one_item() {
        let list = RankingList::with_len(0);
        assert_eq!(list.len(), 1);
        assert_eq!(list.cutoff(), 1);
    }

    #[test]
    fn test_edits_refresh_snapshot() {
        let mut list = RankingList::with_len(2);
        list.set_grade(1, "2").unwrap();
        assert!(list.snapshot().ndcg.unwrap() < 1.0);

        list.set_relevance(1, true).unwrap();
        assert!((list.snapshot().mrr - 0.5).abs() < 1e-9);

        assert!(!list.toggle_relevance(1).unwrap());
        assert_eq!(list.snapshot().mrr, 0.0);
    }

    #[test]
    fn test_invalid_grade_only_affects_ndcg() {
        let mut list = scenario();
        let precision = list.snapshot().precision;
        list.set_grade(5, "oops").unwrap();

        let snapshot = list.snapshot();
        assert_eq!(snapshot.ndcg, None);
        assert_eq!(snapshot.precision, precision);
        assert_eq!(snapshot.recall, 1.0);
    }

    #[test]
    fn test_index_errors_leave_list_untouched() {
        let mut list = scenario();
        let before = list.items().to_vec();

        assert_eq!(
            list.set_grade(6, "1"),
            Err(ListError::IndexOutOfRange { index: 6, len: 6 })
        );
        assert!(list.move_item(0, 9).is_err());
        assert!(list.insert_item(7).is_err());
        assert_eq!(list.items(), before.as_slice());
    }

    #[test]
    fn test_set_max_grade_clamps_grades() {
        let mut list =
            RankingList::from_entries([("5", false), ("", false), ("x", false), ("1.5", false)]);
        list.set_max_grade(2);
        assert_eq!(grades(&list), vec!["2", "0", "x", "1.5"]);
        assert_eq!(list.max_grade(), 2);

        list.set_max_grade(0);
        assert_eq!(list.max_grade(), MIN_MAX_GRADE);
        assert_eq!(grades(&list), vec!["1", "0", "x", "1"]);
    }

    #[test]
    fn test_set_cutoff_clamps() {
        let mut list = scenario();
        assert_eq!(list.set_cutoff(0), 1);
        assert_eq!(list.set_cutoff(100), 6);
        assert_eq!(list.set_cutoff(3), 3);
        assert_eq!(list.snapshot().k, 3);
    }

    #[test]
    fn test_push_extends_cutoff() {
        let mut list = scenario();
        list.set_cutoff(4);
        list.push_item();
        assert_eq!(list.len(), 7);
        assert_eq!(list.cutoff(), 5);
    }

    #[test]
    fn test_pop_reclamps_cutoff() {
        let mut list = scenario();
        list.pop_item().unwrap();
        assert_eq!(list.len(), 5);
        assert_eq!(list.cutoff(), 5);
        assert_eq!(list.snapshot().k, 5);
    }

    #[test]
    fn test_last_item_cannot_be_removed() {
        let mut list = RankingList::with_len(1);
        assert_eq!(list.pop_item(), Err(ListError::LastItem));
        assert_eq!(list.remove_item(0), Err(ListError::LastItem));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_ids_stay_unique_after_pop_and_push() {
        let mut list = RankingList::with_len(3);
        list.move_item(2, 0).unwrap();
        list.pop_item().unwrap();
        list.push_item();

        let mut seen = ids(&list);
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_insert_and_remove() {
        let mut list = scenario();
        list.set_cutoff(2);
        let id = list.insert_item(0).unwrap();
        assert_eq!(list.items()[0].id, id);
        assert_eq!(list.cutoff(), 2);
        // The new empty item pushes the first relevant item down
        assert!((list.snapshot().mrr - 0.5).abs() < 1e-9);

        let removed = list.remove_item(0).unwrap();
        assert_eq!(removed.id, id);
        assert_eq!(list.snapshot().mrr, 1.0);
    }

    #[test]
    fn test_move_item() {
        let mut list = RankingList::from_entries([("a", false), ("b", false), ("c", false)]);
        list.move_item(0, 2).unwrap();
        assert_eq!(grades(&list), vec!["b", "c", "a"]);
        list.move_item(2, 0).unwrap();
        assert_eq!(grades(&list), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_move_item_by_id() {
        let mut list = RankingList::from_entries([("1", false), ("2", false), ("3", false)]);
        let first = list.items()[0].id;
        let last = list.items()[2].id;

        list.move_item_by_id(last, first).unwrap();
        assert_eq!(grades(&list), vec!["3", "1", "2"]);

        list.move_item_by_id(first, first).unwrap();
        assert_eq!(grades(&list), vec!["3", "1", "2"]);

        let missing = ItemId::from_u64(99);
        assert_eq!(
            list.move_item_by_id(missing, first),
            Err(ListError::ItemNotFound(missing))
        );
    }

    #[test]
    fn test_sort_descending_maximizes_ndcg() {
        let mut list = scenario();
        assert!(list.snapshot().ndcg.unwrap() < 1.0);
        list.sort_descending();
        assert_eq!(grades(&list), vec!["3", "3", "2", "2", "1", "0"]);
        assert!((list.snapshot().ndcg.unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sort_is_stable_and_keeps_relevance() {
        let mut list = scenario();
        list.sort_descending();
        let flags: Vec<bool> = list.items().iter().map(|item| item.relevant).collect();
        assert_eq!(flags, vec![true, false, true, false, true, false]);
    }

    #[test]
    fn test_sort_ascending_puts_invalid_last() {
        let mut list =
            RankingList::from_entries([("x", false), ("2", false), ("", false), ("1", false)]);
        list.sort_ascending();
        assert_eq!(grades(&list), vec!["", "1", "2", "x"]);
        list.sort_descending();
        assert_eq!(grades(&list), vec!["2", "1", "", "x"]);
    }

    #[test]
    fn test_randomize_respects_max_grade() {
        let mut list = RankingList::with_len(50).with_seed(3);
        list.set_max_grade(2);
        list.randomize();

        for item in list.items() {
            let grade = item.grade_value();
            assert!((0.0..=2.0).contains(&grade));
            assert_eq!(grade.fract(), 0.0);
        }
        assert!(list.items().iter().any(|item| item.relevant));
        assert!(list.items().iter().any(|item| !item.relevant));
    }

    #[test]
    fn test_randomize_is_reproducible() {
        let mut a = RankingList::with_len(8).with_seed(11);
        let mut b = RankingList::with_len(8).with_seed(11);
        a.randomize();
        b.randomize();
        assert_eq!(a.items(), b.items());
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut list = RankingList::with_len(12).with_seed(5);
        list.randomize();
        let mut before = ids(&list);
        list.shuffle();
        let mut after = ids(&list);
        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(before, after);
    }

    #[test]
    fn test_sweep_covers_every_cutoff() {
        let list = scenario();
        let sweep = list.sweep();
        assert_eq!(sweep.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(sweep[&6], *list.snapshot());
    }
}
