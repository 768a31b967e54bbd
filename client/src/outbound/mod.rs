//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **storage**: in-memory and JSON-file implementations of
//!   `KeyValueStore` backing the session and locale preference.
//! - **http**: reqwest-backed implementations of the resource client ports.
//!
//! Adapters are thin translators between domain types and transport
//! representations. They contain no business logic.

pub mod http;
pub mod storage;
