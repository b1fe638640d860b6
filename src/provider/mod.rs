//! Provider module - client trait, wire types, capabilities, and the shared
//! connection handle

pub mod capability;
pub mod client;
pub mod connection;
pub mod types;

pub use capability::{Capability, CapabilitySet};
pub use client::{Connector, ProviderClient, RunwareClient, RunwareConnector};
pub use connection::ProviderConnection;
