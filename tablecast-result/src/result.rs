use crate::error::Error;

/// Result type alias used throughout tablecast.
///
/// A shorthand for `std::result::Result<T, Error>`. All tablecast operations
/// that can fail should return this type.
pub type Result<T> = std::result::Result<T, Error>;
