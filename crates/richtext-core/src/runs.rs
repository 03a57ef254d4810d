//! Styled runs and the run list.
//!
//! A [`RunList`] is an ordered sequence of [`StyledRun`]s that exactly
//! partitions the document's char range `[0, len)`: no gaps, no overlaps,
//! and no two adjacent runs with equal attribute sets. Attribute mutation
//! is split-mutate-merge: split runs at the target range boundaries, apply
//! the mutation to the covered runs, then coalesce equal neighbors. The
//! same mutation applied twice yields the same run layout.
//!
//! All offsets are char offsets (Unicode scalar values), matching the
//! rope-backed document text.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::attrs::AttributeSet;

/// A maximal contiguous text range sharing one attribute set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledRun {
    /// Start char offset (inclusive).
    pub start: usize,
    /// End char offset (exclusive).
    pub end: usize,
    /// Attributes applied to `[start, end)`.
    pub attrs: AttributeSet,
}

impl StyledRun {
    /// Create a new run over `[start, end)`.
    pub fn new(start: usize, end: usize, attrs: AttributeSet) -> Self {
        Self { start, end, attrs }
    }

    /// Char length of the run.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the run is zero-length.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// The run's range as a std range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Check if the run contains a specific offset.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Ordered run sequence partitioning `[0, len)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunList {
    runs: Vec<StyledRun>,
}

impl RunList {
    /// Create an empty run list (for a zero-length document).
    pub fn new() -> Self {
        Self { runs: Vec::new() }
    }

    /// Build a run list from an already-validated partition of `[0, len)`.
    ///
    /// Runs must be sorted by start, gap-free, and overlap-free; equal
    /// neighbors are coalesced here. Returns `None` when the runs do not
    /// partition `[0, len)`.
    pub fn try_from_runs(runs: Vec<StyledRun>, len: usize) -> Option<Self> {
        let mut expected = 0usize;
        for run in &runs {
            if run.start != expected || run.end <= run.start {
                return None;
            }
            expected = run.end;
        }
        if expected != len {
            return None;
        }

        let mut list = Self { runs };
        list.coalesce();
        Some(list)
    }

    /// The runs, in order.
    pub fn runs(&self) -> &[StyledRun] {
        &self.runs
    }

    /// Number of runs.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Whether there are no runs (zero-length document).
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// The attribute set of the run containing `offset`.
    pub fn attrs_at(&self, offset: usize) -> Option<&AttributeSet> {
        let idx = self
            .runs
            .binary_search_by(|run| {
                if run.end <= offset {
                    std::cmp::Ordering::Less
                } else if run.start > offset {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .ok()?;
        Some(&self.runs[idx].attrs)
    }

    /// Iterate the runs overlapping `[start, end)`, in order.
    pub fn runs_in(&self, range: Range<usize>) -> impl Iterator<Item = &StyledRun> {
        self.runs
            .iter()
            .filter(move |run| run.start < range.end && run.end > range.start)
    }

    /// Update offsets for an insertion of `delta` chars at `offset`.
    ///
    /// The run covering `offset` (or the run ending there, so new text at a
    /// style boundary continues the preceding style) absorbs the inserted
    /// text; later runs shift right. Inserting into an empty document
    /// creates a single plain run.
    pub fn update_for_insertion(&mut self, offset: usize, delta: usize) {
        if delta == 0 {
            return;
        }
        if self.runs.is_empty() {
            self.runs.push(StyledRun::new(0, delta, AttributeSet::default()));
            return;
        }

        let absorb = if offset == 0 {
            0
        } else {
            // Partition guarantees exactly one run with start < offset <= end.
            let mut idx = self.runs.len() - 1;
            for (i, run) in self.runs.iter().enumerate() {
                if run.start < offset && offset <= run.end {
                    idx = i;
                    break;
                }
            }
            idx
        };

        self.runs[absorb].end += delta;
        for run in &mut self.runs[absorb + 1..] {
            run.start += delta;
            run.end += delta;
        }
    }

    /// Update offsets for a deletion of `[start, end)`.
    ///
    /// Runs are truncated, shifted, or removed; equal neighbors exposed by
    /// the deletion are coalesced.
    pub fn update_for_deletion(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let delta = end - start;

        for run in &mut self.runs {
            if run.end <= start {
                // Run is before the deleted range, unaffected.
            } else if run.start >= end {
                // Run is after the deleted range, shift left.
                run.start -= delta;
                run.end -= delta;
            } else if run.start >= start && run.end <= end {
                // Run is entirely deleted, zero it for the retain pass.
                run.end = run.start;
            } else if run.start < start && run.end > end {
                // Run spans the deleted range, shrink.
                run.end -= delta;
            } else if run.start < start {
                // Deletion removed the tail of the run.
                run.end = start;
            } else {
                // Deletion removed the head of the run.
                run.start = start;
                run.end -= delta;
            }
        }

        self.runs.retain(|run| !run.is_empty());
        self.coalesce();
    }

    /// Apply `edit` to the attributes of every char in `[start, end)`.
    ///
    /// Splits runs at the range boundaries so the range aligns exactly with
    /// run boundaries, mutates the covered runs, then coalesces. Applying
    /// the same edit twice yields the same layout and values.
    pub fn edit_attrs(&mut self, range: Range<usize>, mut edit: impl FnMut(&mut AttributeSet)) {
        if range.start >= range.end {
            return;
        }

        self.split_at(range.start);
        self.split_at(range.end);

        for run in &mut self.runs {
            if run.start >= range.start && run.end <= range.end {
                edit(&mut run.attrs);
            }
        }

        self.coalesce();
    }

    /// Split the run containing `offset` so that a run boundary falls at
    /// `offset`. No-op when `offset` already sits on a boundary.
    fn split_at(&mut self, offset: usize) {
        let Some(idx) = self
            .runs
            .iter()
            .position(|run| run.start < offset && offset < run.end)
        else {
            return;
        };

        let tail = StyledRun::new(offset, self.runs[idx].end, self.runs[idx].attrs.clone());
        self.runs[idx].end = offset;
        self.runs.insert(idx + 1, tail);
    }

    /// Merge adjacent runs with equal attribute sets.
    pub fn coalesce(&mut self) {
        self.runs.dedup_by(|cur, prev| {
            if prev.attrs == cur.attrs {
                prev.end = cur.end;
                true
            } else {
                false
            }
        });
    }

    /// Verify the partition invariant against a document of `len` chars:
    /// sorted, gap-free, overlap-free coverage of `[0, len)` with no
    /// equal-attribute neighbors.
    pub fn check_partition(&self, len: usize) -> bool {
        if self.runs.is_empty() {
            return len == 0;
        }

        let mut expected = 0usize;
        let mut prev_attrs: Option<&AttributeSet> = None;
        for run in &self.runs {
            if run.start != expected || run.end <= run.start {
                return false;
            }
            if prev_attrs.is_some_and(|prev| *prev == run.attrs) {
                return false;
            }
            expected = run.end;
            prev_attrs = Some(&run.attrs);
        }
        expected == len
    }

    /// Consume the list, returning the runs.
    pub fn into_runs(self) -> Vec<StyledRun> {
        self.runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold() -> AttributeSet {
        let mut attrs = AttributeSet::new();
        attrs.bold = true;
        attrs
    }

    fn plain_list(len: usize) -> RunList {
        RunList::try_from_runs(vec![StyledRun::new(0, len, AttributeSet::new())], len).unwrap()
    }

    #[test]
    fn test_run_contains() {
        let run = StyledRun::new(10, 20, AttributeSet::new());
        assert!(run.contains(10));
        assert!(run.contains(19));
        assert!(!run.contains(20));
        assert!(!run.contains(9));
    }

    #[test]
    fn test_try_from_runs_rejects_gaps_and_overlaps() {
        let gap = vec![
            StyledRun::new(0, 5, AttributeSet::new()),
            StyledRun::new(6, 10, bold()),
        ];
        assert!(RunList::try_from_runs(gap, 10).is_none());

        let overlap = vec![
            StyledRun::new(0, 6, AttributeSet::new()),
            StyledRun::new(5, 10, bold()),
        ];
        assert!(RunList::try_from_runs(overlap, 10).is_none());

        let short = vec![StyledRun::new(0, 5, AttributeSet::new())];
        assert!(RunList::try_from_runs(short, 10).is_none());
    }

    #[test]
    fn test_try_from_runs_coalesces_equal_neighbors() {
        let runs = vec![
            StyledRun::new(0, 5, bold()),
            StyledRun::new(5, 10, bold()),
        ];
        let list = RunList::try_from_runs(runs, 10).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.runs()[0].range(), 0..10);
    }

    #[test]
    fn test_insertion_extends_covering_run() {
        let mut list = RunList::try_from_runs(
            vec![
                StyledRun::new(0, 5, bold()),
                StyledRun::new(5, 10, AttributeSet::new()),
            ],
            10,
        )
        .unwrap();

        list.update_for_insertion(2, 3);
        assert_eq!(list.runs()[0].range(), 0..8);
        assert_eq!(list.runs()[1].range(), 8..13);
        assert!(list.check_partition(13));
    }

    #[test]
    fn test_insertion_at_boundary_extends_preceding_run() {
        let mut list = RunList::try_from_runs(
            vec![
                StyledRun::new(0, 5, bold()),
                StyledRun::new(5, 10, AttributeSet::new()),
            ],
            10,
        )
        .unwrap();

        // Typing at offset 5 continues the bold run, not the plain one.
        list.update_for_insertion(5, 2);
        assert_eq!(list.runs()[0].range(), 0..7);
        assert!(list.runs()[0].attrs.bold);
        assert_eq!(list.runs()[1].range(), 7..12);
    }

    #[test]
    fn test_insertion_at_start_extends_first_run() {
        let mut list = plain_list(4);
        list.update_for_insertion(0, 3);
        assert_eq!(list.len(), 1);
        assert_eq!(list.runs()[0].range(), 0..7);
    }

    #[test]
    fn test_insertion_into_empty_creates_plain_run() {
        let mut list = RunList::new();
        list.update_for_insertion(0, 5);
        assert_eq!(list.len(), 1);
        assert!(list.runs()[0].attrs.is_plain());
        assert!(list.check_partition(5));
    }

    #[test]
    fn test_deletion_cases() {
        let mut list = RunList::try_from_runs(
            vec![
                StyledRun::new(0, 10, bold()),
                StyledRun::new(10, 20, AttributeSet::new()),
                StyledRun::new(20, 30, bold()),
            ],
            30,
        )
        .unwrap();

        // Delete across the middle run's tail and the last run's head.
        list.update_for_deletion(15, 25);
        assert_eq!(list.runs()[0].range(), 0..10);
        assert_eq!(list.runs()[1].range(), 10..15);
        assert_eq!(list.runs()[2].range(), 15..20);
        assert!(list.check_partition(20));
    }

    #[test]
    fn test_deletion_merges_rejoined_neighbors() {
        let mut list = RunList::try_from_runs(
            vec![
                StyledRun::new(0, 5, bold()),
                StyledRun::new(5, 10, AttributeSet::new()),
                StyledRun::new(10, 15, bold()),
            ],
            15,
        )
        .unwrap();

        // Removing the plain middle run leaves two equal bold neighbors.
        list.update_for_deletion(5, 10);
        assert_eq!(list.len(), 1);
        assert_eq!(list.runs()[0].range(), 0..10);
        assert!(list.check_partition(10));
    }

    #[test]
    fn test_deletion_of_everything() {
        let mut list = plain_list(10);
        list.update_for_deletion(0, 10);
        assert!(list.is_empty());
        assert!(list.check_partition(0));
    }

    #[test]
    fn test_edit_attrs_splits_and_merges() {
        let mut list = plain_list(11);

        list.edit_attrs(0..5, |attrs| attrs.bold = true);
        assert_eq!(list.len(), 2);
        assert_eq!(list.runs()[0].range(), 0..5);
        assert!(list.runs()[0].attrs.bold);
        assert_eq!(list.runs()[1].range(), 5..11);
        assert!(!list.runs()[1].attrs.bold);

        // Clearing bold merges back into a single plain run.
        list.edit_attrs(0..5, |attrs| attrs.bold = false);
        assert_eq!(list.len(), 1);
        assert_eq!(list.runs()[0].range(), 0..11);
        assert!(list.check_partition(11));
    }

    #[test]
    fn test_edit_attrs_is_idempotent() {
        let mut list = plain_list(20);
        list.edit_attrs(3..9, |attrs| attrs.italic = true);
        let snapshot = list.clone();

        list.edit_attrs(3..9, |attrs| attrs.italic = true);
        assert_eq!(list, snapshot);
    }

    #[test]
    fn test_edit_attrs_interior_range() {
        let mut list = plain_list(10);
        list.edit_attrs(3..7, |attrs| attrs.underline = true);
        assert_eq!(list.len(), 3);
        assert_eq!(list.runs()[1].range(), 3..7);
        assert!(list.runs()[1].attrs.underline);
        assert!(list.check_partition(10));
    }

    #[test]
    fn test_attrs_at() {
        let mut list = plain_list(10);
        list.edit_attrs(4..8, |attrs| attrs.bold = true);

        assert!(!list.attrs_at(3).unwrap().bold);
        assert!(list.attrs_at(4).unwrap().bold);
        assert!(list.attrs_at(7).unwrap().bold);
        assert!(!list.attrs_at(8).unwrap().bold);
        assert!(list.attrs_at(10).is_none());
    }

    #[test]
    fn test_runs_in_range() {
        let mut list = plain_list(12);
        list.edit_attrs(4..8, |attrs| attrs.bold = true);

        let covered: Vec<_> = list.runs_in(2..6).map(|r| r.range()).collect();
        assert_eq!(covered, vec![0..4, 4..8]);

        assert_eq!(list.runs_in(4..4).count(), 0);
    }
}
