mod common;

use common::{NUM_ROWS, var_data_column, var_fixed_column, var_shapes};
use tablecast_column_map::{ColumnMapping, RangeKind};
use tablecast_storage::{CellShape, MemColumn, Slicer};

#[test]
fn varying_rows_split_into_single_row_ranges() {
    let col = var_data_column();
    let map = ColumnMapping::new(&col, vec![]).unwrap();

    let shape = map.shape_provider();
    assert!(shape.is_varying());
    assert!(!shape.is_declared_fixed());
    assert!(!shape.is_effectively_fixed());
    assert_eq!(map.ndim(), 3);
    assert_eq!(map.n_ranges(), NUM_ROWS);
    assert_eq!(map.output_shape(), None);
    assert_eq!(shape.row_shapes().unwrap(), var_shapes().as_slice());

    // Per-row element products: (6 + 4 + 8 + 4 + 2) * 2.
    assert_eq!(map.n_elements(), 48);

    assert_eq!(map.dim_ranges(0)[0].kind, RangeKind::Unconstrained);
    assert_eq!(map.dim_ranges(1)[0].kind, RangeKind::Unconstrained);
    assert_eq!(map.dim_ranges(2).len(), NUM_ROWS as usize);

    for (row, chunk) in map.ranges().enumerate() {
        let row = row as u64;
        assert_eq!(chunk.row_slicer(), Slicer::row(row, row));
        // Each section covers exactly that row's cell.
        let expected = &var_shapes()[row as usize];
        assert_eq!(chunk.section_slicer().shape(), *expected);
    }
}

#[test]
fn row_subset_keeps_per_row_resolution() {
    let col = var_data_column();
    let rows = vec![0u64, 1, 2, 3, 6, 7, 8, 9];
    let map = ColumnMapping::new(&col, vec![rows.clone()]).unwrap();

    assert_eq!(map.n_ranges(), 8);
    assert_eq!(map.output_shape(), None);
    // Products over the selected rows: (6+4+8+4) + (4+8+4+2).
    assert_eq!(map.n_elements(), 40);

    let all_shapes = var_shapes();
    let expected: Vec<CellShape> = rows.iter().map(|&r| all_shapes[r as usize].clone()).collect();
    assert_eq!(map.shape_provider().row_shapes().unwrap(), expected.as_slice());

    for (chunk, &row) in map.ranges().zip(&rows) {
        assert_eq!(chunk.row_slicer(), Slicer::row(row, row));
        assert_eq!(chunk.section_slicer().shape(), all_shapes[row as usize]);
    }
}

#[test]
fn uniform_rows_make_a_variable_column_effectively_fixed() {
    let col = var_fixed_column();
    let map = ColumnMapping::new(&col, vec![]).unwrap();

    let shape = map.shape_provider();
    assert!(shape.is_varying());
    assert!(!shape.is_declared_fixed());
    assert!(shape.is_effectively_fixed());
    assert_eq!(shape.uniform_shape(), Some(&CellShape::new(vec![2, 4])));

    assert_eq!(map.n_ranges(), 1);
    assert_eq!(map.n_elements(), 2 * 4 * NUM_ROWS);
    assert_eq!(map.output_shape(), Some(&CellShape::new(vec![2, 4, 10])));

    let chunks: Vec<_> = map.ranges().collect();
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].row_slicer(), Slicer::row(0, 9));
    assert_eq!(
        chunks[0].section_slicer(),
        Slicer::new(vec![0, 0], vec![1, 3])
    );
}

#[test]
fn inner_selections_clip_each_row_shape() {
    let col = var_data_column();
    // Caller order (row, chan, corr): all rows, all chans, corrs 0..=1.
    let map = ColumnMapping::new(&col, vec![vec![], vec![], vec![0, 1]]).unwrap();

    // Every row shape clips its innermost extent to 2; the chan extent still
    // varies, so no output shape exists.
    assert_eq!(map.output_shape(), None);
    let clipped: Vec<u64> = map
        .shape_provider()
        .row_shapes()
        .unwrap()
        .iter()
        .map(CellShape::num_elements)
        .collect();
    assert_eq!(clipped, vec![4, 2, 4, 4, 2, 4, 2, 4, 4, 2]);
    assert_eq!(map.n_elements(), 32);

    assert_eq!(map.dim_ranges(0)[0].kind, RangeKind::Map);
    assert_eq!(map.dim_ranges(1)[0].kind, RangeKind::Unconstrained);
}

#[test]
fn clip_rejects_ids_beyond_a_row_extent() {
    let col = var_data_column();
    // corr id 3 fits rows with corr extent 4 but not those with extent 2.
    let err = ColumnMapping::new(&col, vec![vec![], vec![], vec![3]]).unwrap_err();
    assert!(err.to_string().contains("exceeds dimension"));
}

#[test]
fn undefined_rows_fail_construction() {
    let mut col = MemColumn::<u64>::variable("gappy", 2);
    col.push_cell_with(CellShape::new(vec![2, 2]), |i| i).unwrap();
    col.push_undefined();
    col.push_cell_with(CellShape::new(vec![2, 2]), |i| i).unwrap();

    let err = ColumnMapping::new(&col, vec![]).unwrap_err();
    assert!(err.to_string().contains("not defined"));

    // Selecting around the hole works.
    let map = ColumnMapping::new(&col, vec![vec![0, 2]]).unwrap();
    assert_eq!(map.n_ranges(), 2);
    assert_eq!(map.n_elements(), 8);
}

#[test]
fn per_row_dimensionality_drift_is_rejected() {
    let mut col = MemColumn::<u64>::variable("drift", 2);
    col.push_cell_with(CellShape::new(vec![2, 2]), |i| i).unwrap();
    col.push_cell_with(CellShape::new(vec![4]), |i| i).unwrap();

    let err = ColumnMapping::new(&col, vec![]).unwrap_err();
    assert!(err.to_string().contains("vary per row"));
}

#[test]
fn varying_dims_have_no_single_size() {
    let col = var_data_column();
    let map = ColumnMapping::new(&col, vec![]).unwrap();

    let err = map.shape_provider().dim_size(0).unwrap_err();
    assert!(err.to_string().contains("not fixed"));
    // The row dimension still resolves.
    assert_eq!(map.shape_provider().dim_size(2).unwrap(), NUM_ROWS);
}

#[test]
fn single_row_selection_is_effectively_fixed() {
    let col = var_data_column();
    let map = ColumnMapping::new(&col, vec![vec![2]]).unwrap();

    // One row in scope means one (trivially uniform) shape.
    assert!(map.shape_provider().is_effectively_fixed());
    assert_eq!(map.n_ranges(), 1);
    // Row 2 has shape [4, 2].
    assert_eq!(map.n_elements(), 8);
    assert!(map.is_simple());

    let chunk = map.ranges().next().unwrap();
    assert_eq!(chunk.row_slicer(), Slicer::row(2, 2));
    assert_eq!(chunk.section_slicer(), Slicer::new(vec![0, 0], vec![3, 1]));
}
