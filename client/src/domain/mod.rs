//! Domain primitives for the AccessManager client.
//!
//! Purpose: define the identifier stringifiers, value objects, and error
//! taxonomy shared by both facades, plus the transport port the client core
//! drives. Nothing in this layer knows which HTTP library is in use.
//!
//! Public surface:
//! - UniqueStringifier: bidirectional identifier to wire-string mapping.
//! - ApplicationComponentAndAccessLevel, EntityTypeAndEntity: mapping
//!   query results.
//! - StructuredError: the service's JSON error payload.
//! - AccessManagerError: the error every client operation returns.

pub mod error;
pub mod models;
pub mod ports;
pub mod stringifier;

pub use self::error::{AccessManagerError, MAX_INNER_ERROR_DEPTH, StructuredError};
pub use self::models::{
    ApplicationComponentAndAccessLevel, ElementKind, EntityTypeAndEntity, NameValuePair,
};
pub use self::stringifier::{
    DisplayFromStrStringifier, ElementStringifiers, StringUniqueStringifier, StringifierError,
    UniqueStringifier,
};

/// Result alias for client operations.
pub type AccessManagerResult<T> = Result<T, AccessManagerError>;
