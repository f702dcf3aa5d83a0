//! Iteration over planned ranges and their element offsets.

use tablecast_storage::Slicer;

use crate::mapping::ColumnMapping;
use crate::ranges::{DimRange, RangeKind};

/// Iterator over the disjoint ranges of a mapping.
///
/// Walks the Cartesian product of the per-dimension range lists with the
/// innermost dimension varying fastest. Each emitted [`RangeChunk`] resolves
/// one range per dimension into disk coordinates and names one read request
/// against the store.
pub struct RangeIter<'a> {
    mapping: &'a ColumnMapping,
    /// Current range per dimension.
    index: Vec<usize>,
    /// Running total of previously emitted lengths per dimension.
    mem_start: Vec<u64>,
    done: bool,
}

impl<'a> RangeIter<'a> {
    pub(crate) fn new(mapping: &'a ColumnMapping) -> Self {
        let ndim = mapping.ndim();
        let done = (0..ndim).any(|dim| mapping.dim_ranges(dim).is_empty());
        Self {
            mapping,
            index: vec![0; ndim],
            mem_start: vec![0; ndim],
            done,
        }
    }

    fn current_range(&self, dim: usize) -> &DimRange {
        &self.mapping.dim_ranges(dim)[self.index[dim]]
    }

    /// Resolve the current per-dimension ranges into `(disk_start, length)`.
    fn resolve(&self) -> (Vec<u64>, Vec<u64>) {
        let ndim = self.mapping.ndim();
        let row_dim = ndim - 1;
        let mut disk_start = vec![0u64; ndim];
        let mut length = vec![0u64; ndim];

        for dim in 0..ndim {
            let range = self.current_range(dim);
            match range.kind {
                RangeKind::Free => {
                    disk_start[dim] = range.start;
                    length[dim] = range.len();
                }
                RangeKind::Map => {
                    let map = self.mapping.dim_maps(dim);
                    let start = map[range.start as usize].disk;
                    disk_start[dim] = start;
                    length[dim] = map[range.end as usize - 1].disk - start + 1;
                }
                RangeKind::Unconstrained => {
                    // Shapes vary per row; the size comes from the single row
                    // in scope.
                    let row_range = self.current_range(row_dim);
                    debug_assert!(row_range.is_single());
                    disk_start[dim] = 0;
                    length[dim] = self.mapping.row_dim_size(row_range.start as usize, dim);
                }
            }
        }

        (disk_start, length)
    }
}

impl<'a> Iterator for RangeIter<'a> {
    type Item = RangeChunk<'a>;

    fn next(&mut self) -> Option<RangeChunk<'a>> {
        if self.done {
            return None;
        }

        let (disk_start, range_length) = self.resolve();
        let chunk = RangeChunk {
            mapping: self.mapping,
            disk_start,
            mem_start: self.mem_start.clone(),
            range_length,
        };

        // Advance innermost-first, carrying into slower dimensions; the walk
        // ends when the row dimension overflows.
        let ndim = self.mapping.ndim();
        let mut dim = 0;
        loop {
            self.index[dim] += 1;
            self.mem_start[dim] += chunk.range_length[dim];
            if self.index[dim] < self.mapping.dim_ranges(dim).len() {
                break;
            }
            if dim + 1 == ndim {
                self.done = true;
                break;
            }
            self.index[dim] = 0;
            self.mem_start[dim] = 0;
            dim += 1;
        }

        Some(chunk)
    }
}

/// One disjoint range: a resolved read request plus its destination offsets.
pub struct RangeChunk<'a> {
    pub(crate) mapping: &'a ColumnMapping,
    disk_start: Vec<u64>,
    mem_start: Vec<u64>,
    range_length: Vec<u64>,
}

impl RangeChunk<'_> {
    #[inline]
    pub fn ndim(&self) -> usize {
        self.range_length.len()
    }

    #[inline]
    pub fn row_dim(&self) -> usize {
        self.ndim() - 1
    }

    /// Disk coordinate where this range starts, per dimension.
    #[inline]
    pub fn disk_start(&self) -> &[u64] {
        &self.disk_start
    }

    /// Output coordinate where this range's data starts, per dimension.
    #[inline]
    pub fn mem_start(&self) -> &[u64] {
        &self.mem_start
    }

    /// Extent of this range, per dimension.
    #[inline]
    pub fn range_length(&self) -> &[u64] {
        &self.range_length
    }

    /// Number of elements this read covers.
    pub fn num_elements(&self) -> u64 {
        self.range_length.iter().product()
    }

    /// 1-D inclusive slicer for the row dimension of this read.
    pub fn row_slicer(&self) -> Slicer {
        let row_dim = self.row_dim();
        debug_assert!(self.range_length[row_dim] > 0);
        let start = self.disk_start[row_dim];
        Slicer::row(start, start + self.range_length[row_dim] - 1)
    }

    /// Inclusive slicer for the inner (cell) dimensions of this read.
    pub fn section_slicer(&self) -> Slicer {
        let row_dim = self.row_dim();
        debug_assert!(self.range_length[..row_dim].iter().all(|&l| l > 0));
        let start = self.disk_start[..row_dim].to_vec();
        let end = (0..row_dim)
            .map(|dim| self.disk_start[dim] + self.range_length[dim] - 1)
            .collect();
        Slicer::new(start, end)
    }

    /// Walk the elements of this range, pairing each disk-local offset with
    /// its global output offset.
    pub fn elements(&self) -> ElementIter<'_> {
        ElementIter::new(self)
    }
}

/// Disk-local and global offsets of one element within a range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Element {
    /// Flat offset within the range's read buffer.
    pub chunk_offset: u64,
    /// Flat offset within the global output buffer.
    pub global_offset: u64,
}

/// Iterator over the dense N-D element index of a single range, innermost
/// dimension fastest.
pub struct ElementIter<'a> {
    chunk: &'a RangeChunk<'a>,
    /// Position within the range.
    chunk_index: Vec<u64>,
    /// Position within the global output.
    global_index: Vec<u64>,
    strides: Vec<u64>,
    done: bool,
}

impl<'a> ElementIter<'a> {
    fn new(chunk: &'a RangeChunk<'a>) -> Self {
        let ndim = chunk.ndim();
        let mut strides = vec![1u64; ndim];
        for dim in 1..ndim {
            let extent = chunk.range_length[dim - 1].wrapping_sub(chunk.disk_start[dim - 1]);
            strides[dim] = strides[dim - 1].wrapping_mul(extent);
        }
        Self {
            chunk,
            chunk_index: vec![0; ndim],
            global_index: chunk.mem_start.clone(),
            strides,
            done: chunk.range_length.iter().any(|&len| len == 0),
        }
    }
}

impl Iterator for ElementIter<'_> {
    type Item = Element;

    fn next(&mut self) -> Option<Element> {
        if self.done {
            return None;
        }

        let chunk_offset = self
            .chunk_index
            .iter()
            .zip(&self.strides)
            .fold(0u64, |acc, (i, s)| acc.wrapping_add(i.wrapping_mul(*s)));
        let global_offset = self.chunk.mapping.flat_offset(&self.global_index);

        let ndim = self.chunk.ndim();
        let mut dim = 0;
        loop {
            self.chunk_index[dim] += 1;
            self.global_index[dim] += 1;
            if self.chunk_index[dim] < self.chunk.range_length[dim] {
                break;
            }
            if dim + 1 == ndim {
                self.done = true;
                break;
            }
            self.chunk_index[dim] = 0;
            self.global_index[dim] = self.chunk.mem_start[dim];
            dim += 1;
        }

        Some(Element {
            chunk_offset,
            global_offset,
        })
    }
}
