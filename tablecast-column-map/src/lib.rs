//! Column mapping core.
//!
//! Bridges columns of multi-dimensional cells (possibly with per-row varying
//! shapes) to a flat, densely packed output buffer. Given a per-dimension
//! row-id selection, [`ColumnMapping`] decides the output shape (or proves
//! none exists), plans the minimum number of disjoint read requests against
//! the store, and exposes iterators that pair every disk-side read with the
//! destination offsets where its data lands in the output.
//!
//! Construction performs all validation and the only blocking metadata reads;
//! iteration is pure offset arithmetic. A constructed mapping is immutable
//! and may be shared across threads; iterators borrow it and are obtained per
//! observer via [`ColumnMapping::ranges`].

pub mod iter;
pub mod mapping;
pub mod maps;
pub mod ranges;
pub mod selection;
pub mod shape;

pub use iter::{Element, ElementIter, RangeChunk, RangeIter};
pub use mapping::ColumnMapping;
pub use maps::{DimMap, IdMap};
pub use ranges::{DimRange, DimRanges, RangeKind};
pub use selection::{InputOrder, RowIds, Selection};
pub use shape::ShapeProvider;
