//! Materialize planned ranges into flat buffers and Arrow arrays.

use std::sync::Arc;

use arrow::array::{ListArray, PrimitiveArray};
use arrow::buffer::OffsetBuffer;
use arrow::datatypes::{ArrowPrimitiveType, Field};
use tablecast_column_map::ColumnMapping;
use tablecast_result::{Error, Result};
use tablecast_storage::CellColumn;
use tracing::debug;

/// Strategy for materializing a mapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GatherPolicy {
    /// Bulk-copy simple mappings, scatter everything else. The default.
    #[default]
    Auto,
    /// Always walk the per-element scatter loop, even for simple mappings.
    ForceScatter,
}

/// Gather the selected cells into a flat buffer in output order.
///
/// Allocates `n_elements` slots up front. Simple mappings resolve to a
/// single `read_range` whose result is already in output order; everything
/// else walks the disjoint ranges, reading each and scattering its elements
/// by `(chunk_offset, global_offset)`.
pub fn gather_cells<C>(
    column: &C,
    mapping: &ColumnMapping,
    policy: GatherPolicy,
) -> Result<Vec<C::Value>>
where
    C: CellColumn + ?Sized,
    C::Value: Default,
{
    let total = mapping.n_elements() as usize;

    if policy == GatherPolicy::Auto && mapping.is_simple() {
        let chunk = mapping
            .ranges()
            .next()
            .ok_or_else(|| Error::Internal("simple mapping produced no ranges".into()))?;
        let data = column.read_range(&chunk.row_slicer(), &chunk.section_slicer())?;
        if data.len() != total {
            return Err(Error::Internal(format!(
                "simple read returned {} elements, expected {total}",
                data.len()
            )));
        }
        debug!(
            column = column.name(),
            elements = total,
            "gathered via bulk copy"
        );
        return Ok(data);
    }

    let mut out = vec![C::Value::default(); total];
    let mut n_ranges = 0u64;
    for chunk in mapping.ranges() {
        let data = column.read_range(&chunk.row_slicer(), &chunk.section_slicer())?;
        for element in chunk.elements() {
            out[element.global_offset as usize] = data[element.chunk_offset as usize].clone();
        }
        n_ranges += 1;
    }
    debug!(
        column = column.name(),
        elements = total,
        ranges = n_ranges,
        "gathered via scatter"
    );
    Ok(out)
}

/// Gather into an Arrow primitive array.
///
/// The array holds the flat output buffer; the mapping's `output_shape`
/// (when defined) describes how consumers should view it.
pub fn gather_array<A, C>(
    column: &C,
    mapping: &ColumnMapping,
    policy: GatherPolicy,
) -> Result<PrimitiveArray<A>>
where
    A: ArrowPrimitiveType,
    C: CellColumn<Value = A::Native> + ?Sized,
{
    let values = gather_cells(column, mapping, policy)?;
    Ok(PrimitiveArray::<A>::from_iter_values(values))
}

/// Gather into an Arrow list array with one entry per output row.
///
/// Each entry is the row's cell flattened in storage order. This is the
/// ragged consumer format for mappings without a single output shape, and
/// also works for fixed-shape mappings (every entry then has equal length).
pub fn gather_list_array<A, C>(
    column: &C,
    mapping: &ColumnMapping,
    policy: GatherPolicy,
) -> Result<ListArray>
where
    A: ArrowPrimitiveType,
    C: CellColumn<Value = A::Native> + ?Sized,
{
    let values = gather_array::<A, C>(column, mapping, policy)?;
    let counts = mapping.row_element_counts();
    let offsets = OffsetBuffer::<i32>::from_lengths(counts.iter().map(|&c| c as usize));
    let field = Arc::new(Field::new_list_field(A::DATA_TYPE, false));
    Ok(ListArray::try_new(field, offsets, Arc::new(values), None)?)
}
