//! Shape classification for a column under a selection.

use tablecast_result::{Error, Result};
use tablecast_storage::{CellColumn, CellShape, RowId};

use crate::selection::Selection;

/// Per-row shape data for declared-variable columns.
///
/// Built by a single pass over the rows in scope: each stored shape is
/// clipped against the selection, accumulated, and compared against the
/// first. Rows that happen to all share one clipped shape make the column
/// effectively fixed even though it is declared variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct VariableShapeData {
    /// Clipped shape of each row in scope, in selection order. Inner
    /// dimensions only; the row dimension is excluded.
    row_shapes: Vec<CellShape>,
    /// `offsets[dim][row]`: product of the row's clipped sizes up to and
    /// including `dim`. Feeds flat offsets into variably-shaped output.
    offsets: Vec<Vec<u64>>,
    ndim: usize,
    /// Set iff every row shape equals the first.
    uniform_shape: Option<CellShape>,
}

impl VariableShapeData {
    /// Clip a stored row shape against the selection: each selected inner
    /// dimension shrinks to its selection length after bound-checking the
    /// ids against the stored extent.
    fn clip_shape(shape: CellShape, selection: &Selection, column_name: &str) -> Result<CellShape> {
        // No selection, or only a row selection: nothing to clip.
        if selection.ndim() <= 1 {
            return Ok(shape);
        }

        let ndim = shape.ndim() + 1;
        let mut clipped: Vec<u64> = shape.dims().to_vec();
        for dim in 0..shape.ndim() {
            if let Some(ids) = selection.ids(dim, ndim) {
                for &id in ids {
                    if id >= clipped[dim] {
                        return Err(Error::InvalidArgumentError(format!(
                            "selection index {id} exceeds dimension {dim} of shape {shape} \
                             in column {column_name}"
                        )));
                    }
                }
                clipped[dim] = ids.len() as u64;
            }
        }

        Ok(CellShape::new(clipped))
    }

    fn build<C: CellColumn + ?Sized>(column: &C, selection: &Selection) -> Result<Self> {
        debug_assert!(!column.is_fixed_shape());

        let rows_in_scope: Vec<RowId> = match selection.row_ids() {
            Some(ids) => ids.to_vec(),
            None => (0..column.num_rows()).collect(),
        };

        let mut row_shapes = Vec::with_capacity(rows_in_scope.len());
        for &row in &rows_in_scope {
            if !column.is_defined(row) {
                return Err(Error::NotImplemented(format!(
                    "row {row} in column {} is not defined",
                    column.name()
                )));
            }
            let shape = Self::clip_shape(column.row_shape(row)?, selection, column.name())?;
            row_shapes.push(shape);
        }

        let ndim = row_shapes.first().map_or(column.cell_ndim(), CellShape::ndim);
        if row_shapes.iter().any(|s| s.ndim() != ndim) {
            return Err(Error::NotImplemented(format!(
                "column {} dimensions vary per row",
                column.name()
            )));
        }

        let uniform_shape = match row_shapes.first() {
            Some(first) if row_shapes.iter().all(|s| s == first) => Some(first.clone()),
            _ => None,
        };

        let num_rows = row_shapes.len();
        let mut offsets = vec![vec![0u64; num_rows]; ndim];
        for (row, shape) in row_shapes.iter().enumerate() {
            let mut product = 1u64;
            for (dim, dim_offsets) in offsets.iter_mut().enumerate() {
                product *= shape.size(dim);
                dim_offsets[row] = product;
            }
        }

        Ok(Self {
            row_shapes,
            offsets,
            ndim,
            uniform_shape,
        })
    }

    #[inline]
    fn is_effectively_fixed(&self) -> bool {
        self.uniform_shape.is_some()
    }
}

/// Shape information for a column under a selection.
///
/// Declared-fixed columns answer every query from their metadata. Declared
/// variable columns get a per-row scan at construction, after which they are
/// classified as effectively fixed (all clipped row shapes equal) or truly
/// varying (no single size exists for their unselected inner dimensions).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeProvider {
    column_name: String,
    num_rows: u64,
    cell_ndim: usize,
    /// The declared cell shape; `Some` iff the column declares fixed shape.
    declared_shape: Option<CellShape>,
    selection: Selection,
    var_data: Option<VariableShapeData>,
}

impl ShapeProvider {
    pub fn new<C: CellColumn + ?Sized>(column: &C, selection: Selection) -> Result<Self> {
        let ndim = column.cell_ndim() + 1;
        if selection.ndim() > ndim {
            return Err(Error::InvalidArgumentError(format!(
                "selection names {} dimensions but column {} has {ndim}",
                selection.ndim(),
                column.name()
            )));
        }

        // Row ids must address stored rows regardless of shape class.
        if let Some(ids) = selection.row_ids() {
            for &id in ids {
                if id >= column.num_rows() {
                    return Err(Error::InvalidArgumentError(format!(
                        "selection row id {id} exceeds row count {} of column {}",
                        column.num_rows(),
                        column.name()
                    )));
                }
            }
        }

        let (declared_shape, var_data) = if column.is_fixed_shape() {
            let shape = column.fixed_cell_shape().cloned().ok_or_else(|| {
                Error::Internal(format!(
                    "column {} declares a fixed shape but reports none",
                    column.name()
                ))
            })?;
            // Inner selections must fit the declared shape.
            for dim in 0..shape.ndim() {
                if let Some(ids) = selection.ids(dim, ndim) {
                    for &id in ids {
                        if id >= shape.size(dim) {
                            return Err(Error::InvalidArgumentError(format!(
                                "selection index {id} exceeds dimension {dim} of shape {shape} \
                                 in column {}",
                                column.name()
                            )));
                        }
                    }
                }
            }
            (Some(shape), None)
        } else {
            (None, Some(VariableShapeData::build(column, &selection)?))
        };

        Ok(Self {
            column_name: column.name().to_string(),
            num_rows: column.num_rows(),
            cell_ndim: column.cell_ndim(),
            declared_shape,
            selection,
            var_data,
        })
    }

    /// Whether the column declares a fixed cell shape.
    #[inline]
    pub fn is_declared_fixed(&self) -> bool {
        self.var_data.is_none()
    }

    /// Whether the column declares per-row shapes.
    #[inline]
    pub fn is_varying(&self) -> bool {
        !self.is_declared_fixed()
    }

    /// Whether a single cell shape holds in practice: declared fixed, or
    /// declared variable with every clipped row shape equal.
    #[inline]
    pub fn is_effectively_fixed(&self) -> bool {
        match &self.var_data {
            None => true,
            Some(var) => var.is_effectively_fixed(),
        }
    }

    /// Number of dimensions, including the appended row dimension.
    #[inline]
    pub fn ndim(&self) -> usize {
        match &self.var_data {
            None => self.cell_ndim + 1,
            Some(var) => var.ndim + 1,
        }
    }

    #[inline]
    pub fn row_dim(&self) -> usize {
        self.ndim() - 1
    }

    #[inline]
    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    #[inline]
    pub fn num_rows(&self) -> u64 {
        self.num_rows
    }

    #[inline]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Clipped per-row shapes; `None` for declared-fixed columns.
    pub fn row_shapes(&self) -> Option<&[CellShape]> {
        self.var_data.as_ref().map(|v| v.row_shapes.as_slice())
    }

    /// The single clipped shape shared by every row of a declared-variable
    /// column, when one exists.
    pub fn uniform_shape(&self) -> Option<&CellShape> {
        self.var_data.as_ref().and_then(|v| v.uniform_shape.as_ref())
    }

    /// Size of `dim` under the selection.
    ///
    /// Resolution order: the selection's id count for the dimension, then the
    /// row count for the row dimension, then the declared shape, then the
    /// uniform row shape. A varying dimension with none of these has no
    /// single size and reports [`Error::IndexError`].
    pub fn dim_size(&self, dim: usize) -> Result<u64> {
        let ndim = self.ndim();
        if let Some(ids) = self.selection.ids(dim, ndim) {
            return Ok(ids.len() as u64);
        }
        if dim >= ndim {
            return Err(Error::Internal(format!(
                "dimension {dim} out of range for column {}",
                self.column_name
            )));
        }
        if dim == self.row_dim() {
            return Ok(self.num_rows);
        }
        if let Some(shape) = &self.declared_shape {
            return Ok(shape.size(dim));
        }
        match self.uniform_shape() {
            Some(shape) => Ok(shape.size(dim)),
            None => Err(Error::IndexError(format!(
                "dimension {dim} in column {} is not fixed",
                self.column_name
            ))),
        }
    }

    /// Size of `dim` for the row at position `row` of the mapping's row
    /// order. Only meaningful for varying columns.
    pub(crate) fn row_dim_size(&self, row: usize, dim: usize) -> u64 {
        debug_assert!(dim < self.row_dim());
        let var = self
            .var_data
            .as_ref()
            .expect("per-row sizes only exist for varying columns");
        var.row_shapes[row].size(dim)
    }

    /// Per-row partial-product offset tables. Only meaningful for varying
    /// columns.
    pub(crate) fn var_offsets(&self) -> &[Vec<u64>] {
        let var = self
            .var_data
            .as_ref()
            .expect("offset tables only exist for varying columns");
        &var.offsets
    }
}
