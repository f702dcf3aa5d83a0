//! Inclusive rectangular slicers addressing regions of the store.

use crate::types::{CellShape, RowId};

/// A rectangular region against the store: inclusive `[start, end]`
/// multi-index with integer coordinates, innermost dimension first.
///
/// The format is bit-exact with the store's own slicers: both bounds are
/// inclusive, and the dimension order matches storage order. Row slicers are
/// always one-dimensional; section slicers have the dimensionality of the
/// column's cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slicer {
    start: Vec<u64>,
    end: Vec<u64>,
}

impl Slicer {
    /// Build a slicer from inclusive bounds.
    ///
    /// # Panics
    ///
    /// Panics if `start` and `end` differ in dimensionality. Per-dimension
    /// ordering (`start <= end`) is debug-asserted; callers producing
    /// slicers from planned ranges already guarantee it.
    pub fn new(start: Vec<u64>, end: Vec<u64>) -> Self {
        assert_eq!(
            start.len(),
            end.len(),
            "slicer bounds differ in dimensionality"
        );
        debug_assert!(start.iter().zip(&end).all(|(s, e)| s <= e));
        Self { start, end }
    }

    /// One-dimensional slicer covering rows `start..=end`.
    pub fn row(start: RowId, end: RowId) -> Self {
        Self::new(vec![start], vec![end])
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.start.len()
    }

    #[inline]
    pub fn start(&self) -> &[u64] {
        &self.start
    }

    #[inline]
    pub fn end(&self) -> &[u64] {
        &self.end
    }

    /// Extent along `dim`; inclusive bounds make this `end - start + 1`.
    #[inline]
    pub fn len(&self, dim: usize) -> u64 {
        self.end[dim] - self.start[dim] + 1
    }

    /// Shape of the region described by this slicer.
    pub fn shape(&self) -> CellShape {
        (0..self.ndim()).map(|d| self.len(d)).collect()
    }

    /// Total number of elements in the region.
    pub fn num_elements(&self) -> u64 {
        self.shape().num_elements()
    }
}
