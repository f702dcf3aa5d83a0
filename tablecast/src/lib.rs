//! tablecast: column mappings from cell tables to flat buffers.
//!
//! This crate is the entrypoint for the tablecast toolkit. It re-exports the
//! public surface of the underlying `tablecast-*` crates so downstream
//! applications see a single interface for planning and executing column
//! reads.
//!
//! # What tablecast Does
//!
//! Columnar table stores often hold multi-dimensional cells per row, and for
//! some columns the cell shape varies row by row. Row-major tabular
//! consumers, on the other hand, want one flat, densely packed buffer. Given
//! a possibly-sparse, possibly-reordered per-dimension row-id selection,
//! [`ColumnMapping`] bridges the two:
//!
//! - it decides the output shape, or proves that no single dense shape
//!   exists;
//! - it plans the minimum number of disjoint read requests against the store
//!   that together cover the selection, coalescing adjacent disk ids;
//! - it exposes iterators that pair every disk-side read with the
//!   destination offsets in the flat output buffer, so data can be scattered
//!   into place.
//!
//! # Crate Topology
//!
//! The workspace is layered; higher crates depend on the ones below:
//!
//! - **Gather**: [`tablecast_read`](https://docs.rs/tablecast-read) executes
//!   mappings against a column and materializes flat buffers or Arrow
//!   arrays, with a bulk path for simple mappings.
//! - **Mapping core**: [`tablecast_column_map`](https://docs.rs/tablecast-column-map)
//!   holds selection normalization, shape classification, range planning and
//!   the range/element iterators.
//! - **Store surface**: [`tablecast_storage`](https://docs.rs/tablecast-storage)
//!   defines the [`CellColumn`] collaborator trait, the inclusive [`Slicer`]
//!   read addressing format, and in-memory adapters for tests and examples.
//! - **Errors**: [`tablecast_result`](https://docs.rs/tablecast-result)
//!   provides the shared [`Error`]/[`Result`] types.
//!
//! Mappings are synchronous and immutable once built: construction performs
//! the only blocking metadata reads, and iteration is pure offset
//! arithmetic that may run concurrently across threads, one iterator per
//! observer.

pub use tablecast_column_map::{
    ColumnMapping, DimRange, Element, ElementIter, IdMap, InputOrder, RangeChunk, RangeIter,
    RangeKind, RowIds, Selection, ShapeProvider,
};
pub use tablecast_read::{GatherPolicy, gather_array, gather_cells, gather_list_array};
pub use tablecast_result::{Error, Result};
pub use tablecast_storage::{CellColumn, CellShape, MemColumn, MemTable, RowId, Slicer};
