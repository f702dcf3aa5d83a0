//! The column mapping: planned reads plus iteration entry points.

use tablecast_result::{Error, Result};
use tablecast_storage::{CellColumn, CellShape};

use crate::iter::RangeIter;
use crate::maps::{DimMap, IdMap, build_maps};
use crate::ranges::{DimRange, DimRanges, RangeKind, build_ranges, derive_output_shape};
use crate::selection::{InputOrder, RowIds, Selection};
use crate::shape::ShapeProvider;

/// A mapping between a column selection and a flat output buffer.
///
/// Built once per `(column, selection)` pair. Construction performs all
/// validation and metadata reads; the result is immutable and can be shared
/// across threads, with each observer obtaining its own iterators through
/// [`ranges`](ColumnMapping::ranges). Iteration order is deterministic:
/// equal selections on equal columns produce identical sequences.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnMapping {
    shape_provider: ShapeProvider,
    maps: Vec<DimMap>,
    ranges: Vec<DimRanges>,
    output_shape: Option<CellShape>,
}

impl ColumnMapping {
    /// Build a mapping for `column` under `selection`, with id lists in
    /// outermost-first order (the caller-natural default). Each entry
    /// selects ids along one dimension; an empty entry means the full
    /// dimension, and missing outer entries are treated as full dimensions
    /// by right-justifying the list against the column.
    pub fn new<C: CellColumn + ?Sized>(column: &C, selection: Vec<RowIds>) -> Result<Self> {
        Self::with_order(column, selection, InputOrder::OuterFirst)
    }

    /// Build a mapping with an explicit id-list order.
    pub fn with_order<C: CellColumn + ?Sized>(
        column: &C,
        selection: Vec<RowIds>,
        order: InputOrder,
    ) -> Result<Self> {
        let selection = Selection::new(selection, order);
        let shape_provider = ShapeProvider::new(column, selection)?;
        let maps = build_maps(&shape_provider);
        let ranges = build_ranges(&shape_provider, &maps)?;

        if ranges.is_empty() {
            return Err(Error::ExecutionError(format!(
                "zero ranges generated for column {}",
                shape_provider.column_name()
            )));
        }

        let output_shape = derive_output_shape(&ranges);

        Ok(Self {
            shape_provider,
            maps,
            ranges,
            output_shape,
        })
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape_provider.ndim()
    }

    #[inline]
    pub fn row_dim(&self) -> usize {
        self.ndim() - 1
    }

    #[inline]
    pub fn shape_provider(&self) -> &ShapeProvider {
        &self.shape_provider
    }

    #[inline]
    pub fn dim_maps(&self, dim: usize) -> &[IdMap] {
        &self.maps[dim]
    }

    #[inline]
    pub fn dim_ranges(&self, dim: usize) -> &[DimRange] {
        &self.ranges[dim]
    }

    /// Whether a single output shape exists in practice: either the column
    /// declares a fixed shape, or every clipped row shape coincides.
    #[inline]
    pub fn is_fixed_shape(&self) -> bool {
        self.shape_provider.is_effectively_fixed()
    }

    /// The dense output shape, or `None` when it is only known per row.
    #[inline]
    pub fn output_shape(&self) -> Option<&CellShape> {
        self.output_shape.as_ref()
    }

    /// Number of disjoint ranges (read requests) this mapping plans.
    pub fn n_ranges(&self) -> u64 {
        self.ranges.iter().map(|r| r.len() as u64).product()
    }

    /// Whether the whole selection collapses to one contiguous read whose
    /// destination is also contiguous, letting the caller bypass per-element
    /// scatter with a single bulk copy.
    pub fn is_simple(&self) -> bool {
        for dim in 0..self.ndim() {
            let map = self.dim_maps(dim);
            let ranges = self.dim_ranges(dim);

            if ranges.len() > 1 {
                return false;
            }

            for range in ranges {
                if range.kind != RangeKind::Map {
                    // FREE and UNCONSTRAINED spans are trivially contiguous.
                    continue;
                }
                for i in (range.start as usize + 1)..range.end as usize {
                    if map[i].mem.wrapping_sub(map[i - 1].mem) != 1 {
                        return false;
                    }
                    if map[i].disk - map[i - 1].disk != 1 {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Total number of logical elements the mapping produces.
    pub fn n_elements(&self) -> u64 {
        let row_dim = self.row_dim();
        let row_ranges = self.dim_ranges(row_dim);

        let mut elements = 0u64;
        for (rr_id, row_range) in row_ranges.iter().enumerate() {
            let mut row_elements = row_range.len();
            for dim in 0..row_dim {
                let mut dim_elements = 0u64;
                for range in self.dim_ranges(dim) {
                    if range.is_unconstrained() {
                        debug_assert!(row_range.is_single());
                        dim_elements += self.shape_provider.row_dim_size(rr_id, dim);
                    } else {
                        dim_elements += range.len();
                    }
                }
                row_elements *= dim_elements;
            }
            elements += row_elements;
        }
        elements
    }

    /// Number of output elements contributed by each row, in output row
    /// order. Fixed-shape mappings repeat the shared per-row product for
    /// every row in a range; varying mappings resolve each single-row range
    /// through its own shape. The counts sum to [`n_elements`].
    ///
    /// [`n_elements`]: ColumnMapping::n_elements
    pub fn row_element_counts(&self) -> Vec<u64> {
        let row_dim = self.row_dim();
        let mut counts = Vec::new();
        for (rr_id, row_range) in self.dim_ranges(row_dim).iter().enumerate() {
            let mut per_row = 1u64;
            for dim in 0..row_dim {
                let mut dim_elements = 0u64;
                for range in self.dim_ranges(dim) {
                    if range.is_unconstrained() {
                        dim_elements += self.shape_provider.row_dim_size(rr_id, dim);
                    } else {
                        dim_elements += range.len();
                    }
                }
                per_row *= dim_elements;
            }
            counts.extend(std::iter::repeat_n(per_row, row_range.len() as usize));
        }
        counts
    }

    /// Iterate the disjoint ranges in storage order, innermost dimension
    /// fastest.
    pub fn ranges(&self) -> RangeIter<'_> {
        RangeIter::new(self)
    }

    /// Flat offset into the global output buffer of the element at
    /// `index` (a storage-order N-D index in output coordinates).
    pub(crate) fn flat_offset(&self, index: &[u64]) -> u64 {
        let row_dim = self.row_dim();

        if let Some(shape) = &self.output_shape {
            // Uniform output shape: plain row-major in storage order.
            let mut result = 0u64;
            let mut product = 1u64;
            for dim in 0..row_dim {
                result += index[dim] * product;
                product *= shape.size(dim);
            }
            return result + product * index[row_dim];
        }

        // Variably shaped output: the row picks a per-row offset table. The
        // innermost dimension is stride one; preceding rows contribute their
        // complete size.
        let row = index[row_dim] as usize;
        let offsets = self.shape_provider.var_offsets();
        if offsets.is_empty() {
            // Zero-dimensional cells: one element per row.
            return index[0];
        }

        let mut result = index[0];
        for dim in 1..row_dim {
            result += index[dim] * offsets[dim - 1][row];
        }
        let row_totals = &offsets[offsets.len() - 1];
        result + row_totals[..row].iter().sum::<u64>()
    }

    /// Size of `dim` for the row at position `row` of the mapping's row
    /// order. Only meaningful for varying columns.
    pub(crate) fn row_dim_size(&self, row: usize, dim: usize) -> u64 {
        self.shape_provider.row_dim_size(row, dim)
    }
}
