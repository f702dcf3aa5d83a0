//! Disk-side range planning.
//!
//! Ranges describe contiguous-on-disk spans along one dimension, tagged with
//! how they were derived. The planner runs in one of two modes: when every
//! row shares one shape it may span many rows per range; when shapes vary it
//! splits the row dimension into single-row ranges so that per-row sizes can
//! be resolved unambiguously.

use tablecast_result::Result;
use tablecast_storage::CellShape;

use crate::maps::DimMap;
use crate::shape::ShapeProvider;

/// How a range was derived, which decides how it resolves to disk
/// coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeKind {
    /// A contiguous run within the sorted id map; `start`/`end` index the
    /// map, not the disk.
    Map,
    /// A natural contiguous span; `start`/`end` are disk coordinates.
    Free,
    /// Size known only once a specific row is chosen. Planned only on inner
    /// dimensions of varying columns, where the companion row range always
    /// covers a single row.
    Unconstrained,
}

/// Half-open `[start, end)` span along one dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DimRange {
    pub start: u64,
    pub end: u64,
    pub kind: RangeKind,
}

impl DimRange {
    pub fn free(start: u64, end: u64) -> Self {
        Self {
            start,
            end,
            kind: RangeKind::Free,
        }
    }

    pub fn map(start: u64, end: u64) -> Self {
        Self {
            start,
            end,
            kind: RangeKind::Map,
        }
    }

    pub fn unconstrained() -> Self {
        Self {
            start: 0,
            end: 0,
            kind: RangeKind::Unconstrained,
        }
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn is_single(&self) -> bool {
        self.len() == 1
    }

    #[inline]
    pub fn is_map(&self) -> bool {
        self.kind == RangeKind::Map
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.kind == RangeKind::Free
    }

    #[inline]
    pub fn is_unconstrained(&self) -> bool {
        self.kind == RangeKind::Unconstrained
    }
}

/// Ranges for one dimension.
pub type DimRanges = Vec<DimRange>;

/// Coalesce a sorted id map into MAP runs of adjacent disk ids.
fn coalesce(map: &DimMap) -> DimRanges {
    debug_assert!(!map.is_empty());

    let mut ranges = DimRanges::new();
    let mut current = DimRange::map(0, 1);
    for i in 1..map.len() {
        if map[i].disk - map[i - 1].disk == 1 {
            current.end += 1;
        } else {
            ranges.push(current);
            current = DimRange::map(i as u64, i as u64 + 1);
        }
    }
    ranges.push(current);
    ranges
}

/// Plan ranges when every row shares one shape: unselected dimensions become
/// single FREE spans covering the dimension, selected dimensions become
/// coalesced MAP runs. Ranges may span many rows.
pub(crate) fn build_fixed_ranges(
    shape: &ShapeProvider,
    maps: &[DimMap],
) -> Result<Vec<DimRanges>> {
    debug_assert!(shape.is_effectively_fixed());

    let ndim = shape.ndim();
    let mut ranges = Vec::with_capacity(ndim);
    for dim in 0..ndim {
        if maps[dim].is_empty() {
            let dim_size = shape.dim_size(dim)?;
            ranges.push(vec![DimRange::free(0, dim_size)]);
        } else {
            ranges.push(coalesce(&maps[dim]));
        }
    }
    Ok(ranges)
}

/// Plan ranges when row shapes vary. Inner dimensions without a selection
/// have no single size and become UNCONSTRAINED, resolved per row during
/// iteration; the row dimension is split into single-row ranges so exactly
/// one row is in scope at a time.
pub(crate) fn build_variable_ranges(
    shape: &ShapeProvider,
    maps: &[DimMap],
) -> Result<Vec<DimRanges>> {
    debug_assert!(!shape.is_effectively_fixed());

    let ndim = shape.ndim();
    let row_dim = ndim - 1;
    let mut ranges = Vec::with_capacity(ndim);

    for dim in 0..row_dim {
        if maps[dim].is_empty() {
            ranges.push(vec![DimRange::unconstrained()]);
        } else {
            ranges.push(coalesce(&maps[dim]));
        }
    }

    let row_ranges: DimRanges = if maps[row_dim].is_empty() {
        let dim_size = shape.dim_size(row_dim)?;
        (0..dim_size).map(|r| DimRange::free(r, r + 1)).collect()
    } else {
        (0..maps[row_dim].len() as u64)
            .map(|r| DimRange::map(r, r + 1))
            .collect()
    };
    ranges.push(row_ranges);

    Ok(ranges)
}

pub(crate) fn build_ranges(shape: &ShapeProvider, maps: &[DimMap]) -> Result<Vec<DimRanges>> {
    if shape.is_effectively_fixed() {
        build_fixed_ranges(shape, maps)
    } else {
        build_variable_ranges(shape, maps)
    }
}

/// Output shape from planned ranges: the per-dimension sum of range lengths,
/// or `None` when any dimension's size is only known per row.
pub(crate) fn derive_output_shape(ranges: &[DimRanges]) -> Option<CellShape> {
    let mut shape = Vec::with_capacity(ranges.len());
    for dim_ranges in ranges {
        let mut size = 0u64;
        for range in dim_ranges {
            match range.kind {
                RangeKind::Free | RangeKind::Map => size += range.len(),
                RangeKind::Unconstrained => return None,
            }
        }
        shape.push(size);
    }
    Some(CellShape::new(shape))
}
