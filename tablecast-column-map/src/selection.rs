//! Per-dimension row-id selections.

use tablecast_storage::RowId;

/// Ids selected along one dimension, in the caller's requested output order.
pub type RowIds = Vec<RowId>;

/// Order of the id lists supplied to [`Selection::new`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputOrder {
    /// Outermost dimension first, the caller-natural order. The default.
    #[default]
    OuterFirst,
    /// Innermost dimension first (storage order), passed through unchanged.
    InnerFirst,
}

/// A per-dimension selection of ids, held in storage order.
///
/// Each entry selects ids along one dimension; an empty entry means the full
/// dimension in natural order, and an empty selection means the whole column.
/// Entries are right-justified against the column's storage-order dimensions:
/// when fewer entries than dimensions are supplied, the missing outermost
/// dimensions are unselected, and the last entry always addresses the row
/// dimension.
///
/// Callers supply id lists in their natural outer-to-inner order; the lists
/// are reversed once here at the boundary and everything downstream operates
/// in storage order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    dims: Vec<RowIds>,
}

impl Selection {
    /// Selection over no dimensions: the whole column in natural order.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(mut dims: Vec<RowIds>, order: InputOrder) -> Self {
        if order == InputOrder::OuterFirst {
            dims.reverse();
        }
        Self { dims }
    }

    /// Selection from id lists in outermost-first order.
    pub fn from_outer(dims: Vec<RowIds>) -> Self {
        Self::new(dims, InputOrder::OuterFirst)
    }

    /// Number of dimensions the selection names.
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    /// Entry index covering `dim` of an `ndim`-dimensional column, or `None`
    /// when the right-justified selection does not reach that far out.
    fn aligned_index(&self, dim: usize, ndim: usize) -> Option<usize> {
        let idx = (dim + self.dims.len()).checked_sub(ndim)?;
        (idx < self.dims.len()).then_some(idx)
    }

    /// Ids selected along `dim` of an `ndim`-dimensional column; `None` when
    /// the dimension has no entry or an empty one.
    pub fn ids(&self, dim: usize, ndim: usize) -> Option<&[RowId]> {
        let ids = &self.dims[self.aligned_index(dim, ndim)?];
        (!ids.is_empty()).then_some(ids.as_slice())
    }

    /// The row-dimension ids. Right-justification puts them in the last
    /// entry; `None` when absent or empty.
    pub fn row_ids(&self) -> Option<&[RowId]> {
        let ids = self.dims.last()?;
        (!ids.is_empty()).then_some(ids.as_slice())
    }
}
