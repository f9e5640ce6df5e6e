//! Request/response core and the two AccessManager facades.
//!
//! [`AccessManagerStringElementClient`] talks to the service in plain
//! strings; [`AccessManagerClient`] layers identifier conversion on top. Both
//! implement [`AccessManagerEventProcessor`] and
//! [`AccessManagerQueryProcessor`].

mod access_manager;
mod dto;
mod error_response;
mod path;
mod processors;
mod request;
mod string_element;

pub use self::access_manager::AccessManagerClient;
pub use self::processors::{AccessManagerEventProcessor, AccessManagerQueryProcessor};
pub use self::request::API_PATH;
pub use self::string_element::{AccessManagerStringElementClient, StringComponentMapping};
