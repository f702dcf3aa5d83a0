//! Named-column registry over in-memory columns.

use rustc_hash::FxHashMap;
use tablecast_result::{Error, Result};

use crate::column::CellColumn;
use crate::mem_column::MemColumn;

/// A set of named in-memory columns.
///
/// Thin registry used by tests and examples to assemble a table-like
/// collaborator; all rows of a table share the same row count by convention,
/// but this is not enforced here.
#[derive(Clone, Debug, Default)]
pub struct MemTable<T> {
    columns: FxHashMap<String, MemColumn<T>>,
}

impl<T: Clone> MemTable<T> {
    pub fn new() -> Self {
        Self {
            columns: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, column: MemColumn<T>) {
        self.columns.insert(column.name().to_string(), column);
    }

    pub fn column(&self, name: &str) -> Result<&MemColumn<T>> {
        self.columns
            .get(name)
            .ok_or_else(|| Error::InvalidArgumentError(format!("column {name} does not exist")))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
