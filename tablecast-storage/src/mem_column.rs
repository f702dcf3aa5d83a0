//! In-memory cell column used by tests, benchmarks and examples.

use tablecast_result::{Error, Result};

use crate::column::CellColumn;
use crate::slicer::Slicer;
use crate::types::{CellShape, RowId};

#[derive(Clone, Debug)]
struct Cell<T> {
    shape: CellShape,
    values: Vec<T>,
}

/// An in-memory [`CellColumn`].
///
/// Cells are stored per row as a shape plus a dense value buffer in storage
/// order (innermost dimension fastest). Declared-fixed columns validate every
/// row against the declared shape; declared-variable columns accept any shape
/// of the declared dimensionality, including none at all for undefined rows.
#[derive(Clone, Debug)]
pub struct MemColumn<T> {
    name: String,
    declared_shape: Option<CellShape>,
    cell_ndim: usize,
    rows: Vec<Option<Cell<T>>>,
}

impl<T: Clone> MemColumn<T> {
    /// Build a declared-fixed column with `num_rows` rows, each cell filled
    /// by `fill(row, flat_index)` where `flat_index` walks the cell in
    /// storage order.
    pub fn fixed<F>(name: impl Into<String>, shape: CellShape, num_rows: u64, fill: F) -> Self
    where
        F: Fn(RowId, u64) -> T,
    {
        let cell_elems = shape.num_elements();
        let rows = (0..num_rows)
            .map(|r| {
                Some(Cell {
                    shape: shape.clone(),
                    values: (0..cell_elems).map(|i| fill(r, i)).collect(),
                })
            })
            .collect();

        Self {
            name: name.into(),
            cell_ndim: shape.ndim(),
            declared_shape: Some(shape),
            rows,
        }
    }

    /// Build an empty declared-variable column whose cells have `cell_ndim`
    /// dimensions. Rows are appended with [`push_cell`] / [`push_undefined`].
    ///
    /// [`push_cell`]: MemColumn::push_cell
    /// [`push_undefined`]: MemColumn::push_undefined
    pub fn variable(name: impl Into<String>, cell_ndim: usize) -> Self {
        Self {
            name: name.into(),
            declared_shape: None,
            cell_ndim,
            rows: Vec::new(),
        }
    }

    /// Append a cell of the given shape. The value buffer must be dense in
    /// storage order.
    pub fn push_cell(&mut self, shape: CellShape, values: Vec<T>) -> Result<()> {
        if let Some(declared) = &self.declared_shape {
            if declared != &shape {
                return Err(Error::InvalidArgumentError(format!(
                    "cell shape {shape} does not match declared shape {declared} of column {}",
                    self.name
                )));
            }
        }
        if values.len() as u64 != shape.num_elements() {
            return Err(Error::InvalidArgumentError(format!(
                "cell of shape {shape} requires {} values, got {}",
                shape.num_elements(),
                values.len()
            )));
        }
        self.rows.push(Some(Cell { shape, values }));
        Ok(())
    }

    /// Append a cell whose values are produced by `fill(flat_index)`.
    pub fn push_cell_with<F>(&mut self, shape: CellShape, fill: F) -> Result<()>
    where
        F: Fn(u64) -> T,
    {
        let values = (0..shape.num_elements()).map(fill).collect();
        self.push_cell(shape, values)
    }

    /// Append a row with no cell.
    pub fn push_undefined(&mut self) {
        self.rows.push(None);
    }

    fn cell(&self, row: RowId) -> Result<&Cell<T>> {
        self.rows
            .get(row as usize)
            .and_then(|c| c.as_ref())
            .ok_or_else(|| {
                Error::InvalidArgumentError(format!(
                    "row {row} of column {} is undefined",
                    self.name
                ))
            })
    }
}

impl<T: Clone> CellColumn for MemColumn<T> {
    type Value = T;

    fn name(&self) -> &str {
        &self.name
    }

    fn is_fixed_shape(&self) -> bool {
        self.declared_shape.is_some()
    }

    fn cell_ndim(&self) -> usize {
        self.cell_ndim
    }

    fn fixed_cell_shape(&self) -> Option<&CellShape> {
        self.declared_shape.as_ref()
    }

    fn num_rows(&self) -> u64 {
        self.rows.len() as u64
    }

    fn is_defined(&self, row: RowId) -> bool {
        matches!(self.rows.get(row as usize), Some(Some(_)))
    }

    fn row_shape(&self, row: RowId) -> Result<CellShape> {
        Ok(self.cell(row)?.shape.clone())
    }

    fn read_range(&self, rows: &Slicer, section: &Slicer) -> Result<Vec<T>> {
        if rows.ndim() != 1 {
            return Err(Error::InvalidArgumentError(format!(
                "row slicer must be one-dimensional, got {} dimensions",
                rows.ndim()
            )));
        }
        if section.ndim() != self.cell_ndim {
            return Err(Error::InvalidArgumentError(format!(
                "section slicer has {} dimensions, column {} cells have {}",
                section.ndim(),
                self.name,
                self.cell_ndim
            )));
        }
        let (row_start, row_end) = (rows.start()[0], rows.end()[0]);
        if row_end >= self.num_rows() {
            return Err(Error::InvalidArgumentError(format!(
                "row slicer end {row_end} exceeds row count {} of column {}",
                self.num_rows(),
                self.name
            )));
        }

        let ndim = self.cell_ndim;
        let mut out =
            Vec::with_capacity((section.num_elements() * (row_end - row_start + 1)) as usize);

        for row in row_start..=row_end {
            let cell = self.cell(row)?;
            for dim in 0..ndim {
                if section.end()[dim] >= cell.shape.size(dim) {
                    return Err(Error::InvalidArgumentError(format!(
                        "section slicer end {} exceeds dimension {dim} of cell shape {} \
                         at row {row} of column {}",
                        section.end()[dim],
                        cell.shape,
                        self.name
                    )));
                }
            }

            let mut strides = vec![1u64; ndim];
            for dim in 1..ndim {
                strides[dim] = strides[dim - 1] * cell.shape.size(dim - 1);
            }

            // Odometer over the section rectangle, innermost dimension fastest.
            let mut index = section.start().to_vec();
            loop {
                let flat: u64 = index.iter().zip(&strides).map(|(i, s)| i * s).sum();
                out.push(cell.values[flat as usize].clone());

                let mut dim = 0;
                while dim < ndim {
                    index[dim] += 1;
                    if index[dim] <= section.end()[dim] {
                        break;
                    }
                    index[dim] = section.start()[dim];
                    dim += 1;
                }
                if dim == ndim {
                    break;
                }
            }
        }

        Ok(out)
    }
}
