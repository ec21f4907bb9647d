//! Ports implemented by infrastructure adapters.

mod clock_port;
mod http_transport_port;
mod navigator_port;
mod token_storage_port;

pub use clock_port::Clock;
pub use http_transport_port::HttpTransport;
pub use navigator_port::{LOGIN_ROUTE, NavigatorPort};
pub use token_storage_port::TokenStoragePort;

#[cfg(test)]
pub mod mocks {
    pub use super::http_transport_port::mock::MockTransport;
    pub use super::navigator_port::mock::MockNavigator;
    pub use super::token_storage_port::mock::MockTokenStorage;
}
