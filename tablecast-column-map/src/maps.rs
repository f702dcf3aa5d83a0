//! Per-dimension disk-to-memory id maps.

use tablecast_storage::RowId;

use crate::shape::ShapeProvider;

/// Association between a position in the store and the destination position
/// along one dimension of the output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdMap {
    pub disk: RowId,
    pub mem: RowId,
}

/// Sorted id map for one dimension; empty when the dimension has no
/// selection.
pub type DimMap = Vec<IdMap>;

/// Build one map per dimension from the selection.
///
/// Each selected id becomes a `(disk, mem)` pair where `mem` is the id's
/// position in the caller's list, then the pairs are stable-sorted by disk
/// id. Sorting is what lets the planner coalesce adjacent disk ids into
/// single reads; `mem` carries the requested destination position through
/// the reorder. Duplicate ids are preserved in occurrence order, each with
/// its own destination slot.
pub(crate) fn build_maps(shape: &ShapeProvider) -> Vec<DimMap> {
    let ndim = shape.ndim();
    let mut maps = Vec::with_capacity(ndim);

    for dim in 0..ndim {
        let Some(ids) = shape.selection().ids(dim, ndim) else {
            maps.push(DimMap::new());
            continue;
        };

        let mut map: DimMap = ids
            .iter()
            .enumerate()
            .map(|(mem, &disk)| IdMap {
                disk,
                mem: mem as RowId,
            })
            .collect();
        map.sort_by_key(|entry| entry.disk);
        maps.push(map);
    }

    maps
}
