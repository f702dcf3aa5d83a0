mod common;

use std::sync::Arc;
use std::thread;

use common::fixed_data_column;
use tablecast_column_map::ColumnMapping;

#[test]
fn shared_mappings_iterate_identically_across_threads() {
    let col = fixed_data_column();
    let map = Arc::new(ColumnMapping::new(&col, vec![vec![0, 2, 4, 6, 8]]).unwrap());

    let reference: Vec<u64> = map
        .ranges()
        .flat_map(|chunk| {
            chunk
                .elements()
                .map(|el| el.global_offset)
                .collect::<Vec<_>>()
        })
        .collect();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let map = Arc::clone(&map);
        let reference = reference.clone();
        handles.push(thread::spawn(move || {
            // Each observer gets its own iterator over the shared mapping.
            let offsets: Vec<u64> = map
                .ranges()
                .flat_map(|chunk| {
                    chunk
                        .elements()
                        .map(|el| el.global_offset)
                        .collect::<Vec<_>>()
                })
                .collect();
            assert_eq!(offsets, reference);
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}
