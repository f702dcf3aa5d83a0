#![allow(dead_code)]

use tablecast_storage::{CellShape, MemColumn};

pub const NUM_ROWS: u64 = 10;

/// Declared-fixed column of `[2, 4]` cells (corr innermost, chan next);
/// every value encodes its (row, flat cell index) so scatter destinations
/// can be checked exactly.
pub fn fixed_data_column() -> MemColumn<u64> {
    MemColumn::fixed("model_data", CellShape::new(vec![2, 4]), NUM_ROWS, |row, i| {
        row * 1000 + i
    })
}

/// The per-row shapes of the genuinely varying column.
pub fn var_shapes() -> Vec<CellShape> {
    [
        [3, 2],
        [4, 1],
        [4, 2],
        [2, 2],
        [2, 1],
        [3, 2],
        [4, 1],
        [4, 2],
        [2, 2],
        [2, 1],
    ]
    .iter()
    .map(|dims| CellShape::new(dims.to_vec()))
    .collect()
}

/// Declared-variable column whose row shapes genuinely vary.
pub fn var_data_column() -> MemColumn<u64> {
    let mut col = MemColumn::variable("var_data", 2);
    for (row, shape) in var_shapes().into_iter().enumerate() {
        col.push_cell_with(shape, |i| row as u64 * 1000 + i).unwrap();
    }
    col
}

/// Declared-variable column whose stored rows all happen to share `[2, 4]`.
pub fn var_fixed_column() -> MemColumn<u64> {
    let mut col = MemColumn::variable("var_fixed_data", 2);
    for row in 0..NUM_ROWS {
        col.push_cell_with(CellShape::new(vec![2, 4]), |i| row * 1000 + i)
            .unwrap();
    }
    col
}
