use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tablecast_column_map::ColumnMapping;
use tablecast_storage::{CellShape, MemColumn};

const SEED: u64 = 0x9E37_79B9_F701_3CAB;
const NUM_ROWS: u64 = 100;

fn wide_column() -> MemColumn<u64> {
    MemColumn::fixed("data", CellShape::new(vec![2, 4]), NUM_ROWS, |row, i| {
        row * 1000 + i
    })
}

fn sorted_offsets(map: &ColumnMapping) -> Vec<u64> {
    let mut offsets: Vec<u64> = map
        .ranges()
        .flat_map(|chunk| {
            chunk
                .elements()
                .map(|el| el.global_offset)
                .collect::<Vec<_>>()
        })
        .collect();
    offsets.sort_unstable();
    offsets
}

#[test]
fn random_row_subsets_plan_one_range_per_run() {
    let col = wide_column();
    let mut rng = StdRng::seed_from_u64(SEED);

    for _ in 0..32 {
        let k = rng.random_range(1..=NUM_ROWS as usize);
        let mut ids: Vec<u64> = (0..NUM_ROWS).collect();
        ids.shuffle(&mut rng);
        ids.truncate(k);
        ids.sort_unstable();

        let runs = ids.windows(2).filter(|w| w[1] != w[0] + 1).count() as u64 + 1;

        let map = ColumnMapping::new(&col, vec![ids.clone()]).unwrap();
        assert_eq!(map.n_ranges(), runs);
        assert_eq!(map.n_elements(), ids.len() as u64 * 8);

        let offsets = sorted_offsets(&map);
        assert_eq!(offsets.len() as u64, map.n_elements());
        assert!(offsets.iter().enumerate().all(|(i, &o)| o == i as u64));
    }
}

#[test]
fn shuffled_selections_keep_their_destinations_in_the_map() {
    let col = wide_column();
    let mut rng = StdRng::seed_from_u64(SEED ^ 0xFFFF);

    for _ in 0..16 {
        let k = rng.random_range(2..=NUM_ROWS as usize);
        let mut ids: Vec<u64> = (0..NUM_ROWS).collect();
        ids.shuffle(&mut rng);
        ids.truncate(k);

        let map = ColumnMapping::new(&col, vec![ids.clone()]).unwrap();

        // The sorted map keeps the requested destination for every disk id.
        let row_map = map.dim_maps(2);
        assert!(row_map.windows(2).all(|w| w[0].disk <= w[1].disk));
        for entry in row_map {
            assert_eq!(ids[entry.mem as usize], entry.disk);
        }

        // Reordering never loses or duplicates output slots.
        let offsets = sorted_offsets(&map);
        assert_eq!(offsets.len() as u64, map.n_elements());
        assert!(offsets.iter().enumerate().all(|(i, &o)| o == i as u64));
    }
}
