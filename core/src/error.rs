//! Error types for the meal catalog core.
//!
//! # Design
//! Remote failures collapse to one `FetchError` per operation. A 404, a 500,
//! an unreachable host and an undecodable body all look the same to the
//! caller; the detail is logged where it happens and not carried further.
//! Validation errors live in `validation` and never reach the network.

use thiserror::Error;

/// The remote operation a `FetchError` belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Search,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Search => "search",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    const fn message(self) -> &'static str {
        match self {
            Operation::List => "failed to fetch meals",
            Operation::Search => "failed to search meals",
            Operation::Create => "failed to create meal",
            Operation::Update => "failed to update meal",
            Operation::Delete => "failed to delete meal",
        }
    }
}

/// A remote call did not produce a usable result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}", .operation.message())]
pub struct FetchError {
    pub operation: Operation,
}

impl FetchError {
    pub const fn new(operation: Operation) -> Self {
        Self { operation }
    }
}

/// The host could not complete an HTTP round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

/// A wire record carried a numeric field that does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("wire rating {0:?} is not a number")]
    Rating(String),

    #[error("wire price {0:?} is not a number")]
    Price(String),
}

/// The client could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_message_names_the_operation() {
        assert_eq!(FetchError::new(Operation::List).to_string(), "failed to fetch meals");
        assert_eq!(FetchError::new(Operation::Delete).to_string(), "failed to delete meal");
    }
}
