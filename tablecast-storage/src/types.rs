//! Core type definitions shared by the storage and mapping layers.

use std::fmt;
use std::ops::Index;

/// Position of a row in the store, or a destination position along one
/// dimension of the output buffer.
pub type RowId = u64;

/// Shape of a multi-dimensional cell, innermost (fastest-varying) dimension
/// first. The row dimension is never part of a cell shape; it is appended by
/// the mapping layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellShape(Vec<u64>);

impl CellShape {
    pub fn new(dims: impl Into<Vec<u64>>) -> Self {
        Self(dims.into())
    }

    /// Shape of a zero-dimensional (scalar) cell.
    pub fn scalar() -> Self {
        Self(Vec::new())
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn size(&self, dim: usize) -> u64 {
        self.0[dim]
    }

    #[inline]
    pub fn dims(&self) -> &[u64] {
        &self.0
    }

    /// Number of elements in a cell of this shape. The empty product is 1,
    /// so scalar cells hold one element.
    #[inline]
    pub fn num_elements(&self) -> u64 {
        self.0.iter().product()
    }
}

impl From<Vec<u64>> for CellShape {
    fn from(dims: Vec<u64>) -> Self {
        Self(dims)
    }
}

impl FromIterator<u64> for CellShape {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Index<usize> for CellShape {
    type Output = u64;

    fn index(&self, dim: usize) -> &u64 {
        &self.0[dim]
    }
}

impl fmt::Display for CellShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "]")
    }
}
