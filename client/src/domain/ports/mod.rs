//! Driven ports used by the client core.

mod macros;
pub(crate) use macros::define_port_error;

mod http_transport;

#[cfg(test)]
pub use http_transport::MockHttpTransport;
pub use http_transport::{HttpMethod, HttpResponse, HttpTransport, HttpTransportError};
