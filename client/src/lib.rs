//! Typed REST client for AccessManager permission graph services.
//!
//! The crate is layered the usual ports-and-adapters way:
//! - [`domain`] holds identifier stringifiers, value objects, the error
//!   taxonomy, and the HTTP transport port.
//! - [`client`] builds request paths, classifies responses, and exposes the
//!   two facades: [`AccessManagerStringElementClient`] for string
//!   identifiers and [`AccessManagerClient`] for caller-defined identifier
//!   types.
//! - [`outbound`] provides the reqwest transport used by default.
//! - [`config`] loads connection settings via OrthoConfig.
//!
//! ```rust,no_run
//! use access_manager_client::AccessManagerStringElementClient;
//!
//! # async fn demo() -> Result<(), access_manager_client::AccessManagerError> {
//! let client = AccessManagerStringElementClient::new("http://127.0.0.1:5000/")?;
//! client.add_user("user1").await?;
//! client.add_group("group1").await?;
//! client.add_user_to_group_mapping("user1", "group1").await?;
//! let groups = client.get_user_to_group_mappings("user1", true).await?;
//! assert_eq!(groups, ["group1"]);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod domain;
pub mod outbound;
#[cfg(feature = "test-support")]
pub mod test_support;

pub use client::{
    AccessManagerClient, AccessManagerEventProcessor, AccessManagerQueryProcessor,
    AccessManagerStringElementClient, StringComponentMapping,
};
pub use config::AccessManagerClientSettings;
pub use domain::{
    AccessManagerError, AccessManagerResult, ApplicationComponentAndAccessLevel,
    DisplayFromStrStringifier, ElementKind, ElementStringifiers, EntityTypeAndEntity,
    StringUniqueStringifier, StringifierError, StructuredError, UniqueStringifier,
};
pub use outbound::http::ReqwestTransport;
