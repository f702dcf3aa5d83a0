//! Gather layer: execute a column mapping against its column.
//!
//! The mapping core only plans reads and destination offsets; this crate
//! walks the planned ranges, issues the reads through [`CellColumn`], and
//! scatters the results into flat buffers or Arrow arrays. Simple mappings
//! (one contiguous read with a contiguous destination) skip the per-element
//! scatter entirely.
//!
//! [`CellColumn`]: tablecast_storage::CellColumn

pub mod gather;

pub use gather::{GatherPolicy, gather_array, gather_cells, gather_list_array};
