// fruithub-api: Async Rust client for the Fruithub CMS REST backend

pub mod auth;
pub mod client;
pub mod error;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use transport::{DEFAULT_TIMEOUT, TransportConfig};
