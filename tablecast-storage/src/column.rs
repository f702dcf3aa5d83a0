//! The column handle consumed by the mapping core.

use tablecast_result::Result;

use crate::slicer::Slicer;
use crate::types::{CellShape, RowId};

/// A readable column of multi-dimensional cells.
///
/// The mapping core consumes columns exclusively through this trait: metadata
/// queries during construction, and rectangular range reads during gather.
/// Implementations must keep the answers stable for the lifetime of any
/// mapping built on top of them.
pub trait CellColumn {
    /// Element type stored in the column's cells.
    type Value: Clone;

    fn name(&self) -> &str;

    /// Whether the column declares a fixed cell shape. A `false` here only
    /// means the declaration allows per-row shapes; the stored rows may
    /// still all share one shape in practice.
    fn is_fixed_shape(&self) -> bool;

    /// Number of cell dimensions, excluding the row dimension.
    fn cell_ndim(&self) -> usize;

    /// The declared cell shape; `Some` iff [`is_fixed_shape`] is true.
    ///
    /// [`is_fixed_shape`]: CellColumn::is_fixed_shape
    fn fixed_cell_shape(&self) -> Option<&CellShape>;

    fn num_rows(&self) -> u64;

    /// Whether `row` holds a cell. Out-of-range rows are simply undefined.
    fn is_defined(&self, row: RowId) -> bool;

    /// Shape of the cell at `row`.
    fn row_shape(&self, row: RowId) -> Result<CellShape>;

    /// Read the rectangle named by a 1-D row slicer and a `cell_ndim`-D
    /// section slicer, dense in storage order: the innermost dimension
    /// varies fastest and the row dimension slowest.
    fn read_range(&self, rows: &Slicer, section: &Slicer) -> Result<Vec<Self::Value>>;
}
