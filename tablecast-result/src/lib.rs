//! Error types and result definitions for the tablecast crates.
//!
//! A single error enum ([`Error`]) and result alias ([`Result<T>`]) are shared
//! by every crate in the workspace. All fallible operations return
//! `Result<T>`, letting errors propagate naturally across crate boundaries
//! with the `?` operator while still allowing structured matching on the
//! failure class.
//!
//! Mapping construction fails fast: a column mapping either constructs fully
//! or not at all, and iteration over a constructed mapping cannot fail. The
//! variants therefore describe construction-time failures:
//!
//! - **User input** ([`Error::InvalidArgumentError`]): selection ids out of
//!   bounds, selections wider than the column.
//! - **Unsupported data** ([`Error::NotImplemented`]): undefined rows,
//!   per-row dimensionality drift.
//! - **Unresolvable sizes** ([`Error::IndexError`]): a dimension size was
//!   requested for a varying dimension with no uniform resolution.
//! - **Degenerate plans** ([`Error::ExecutionError`]): planning produced
//!   zero dimensions.
//! - **Interchange** ([`Error::Arrow`]): Arrow array assembly failures.
//! - **Bugs** ([`Error::Internal`]): violated internal invariants.

pub mod error;
pub mod result;

pub use error::Error;
pub use result::Result;
