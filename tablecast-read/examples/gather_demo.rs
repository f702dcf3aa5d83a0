//! Plan and gather a sparse selection end to end.
//!
//! Run with `RUST_LOG=debug cargo run -p tablecast-read --example gather_demo`
//! to see the gather path decisions.

use arrow::array::Array;
use arrow::datatypes::UInt64Type;
use tablecast_column_map::ColumnMapping;
use tablecast_read::{GatherPolicy, gather_cells, gather_list_array};
use tablecast_storage::{CellShape, MemColumn};

fn main() -> tablecast_result::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let column = MemColumn::fixed("model_data", CellShape::new(vec![2, 4]), 10, |row, i| {
        row * 1000 + i
    });
    let mapping = ColumnMapping::new(&column, vec![vec![0, 1, 2, 3, 6, 7, 8, 9]])?;

    println!(
        "planned {} read ranges covering {} elements",
        mapping.n_ranges(),
        mapping.n_elements()
    );
    for chunk in mapping.ranges() {
        println!(
            "  rows {:?}..{:?} section {:?}..{:?}",
            chunk.row_slicer().start(),
            chunk.row_slicer().end(),
            chunk.section_slicer().start(),
            chunk.section_slicer().end()
        );
    }

    let cells = gather_cells(&column, &mapping, GatherPolicy::Auto)?;
    println!("first gathered cell: {:?}", &cells[..8]);

    let mut ragged = MemColumn::variable("var_data", 2);
    for (row, dims) in [[3u64, 2], [4, 1], [2, 2]].iter().enumerate() {
        ragged.push_cell_with(CellShape::new(dims.to_vec()), |i| row as u64 * 10 + i)?;
    }
    let mapping = ColumnMapping::new(&ragged, vec![])?;
    let list = gather_list_array::<UInt64Type, _>(&ragged, &mapping, GatherPolicy::Auto)?;
    println!(
        "ragged column gathered into {} list entries of lengths {:?}",
        list.len(),
        mapping.row_element_counts()
    );

    Ok(())
}
