//! Kudos client library: session state, localisation, and backend clients.
//!
//! Front ends build a [`context::ClientContext`] and call the resource
//! ports through it.

pub mod config;
pub mod context;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use context::{ClientContext, ContextError};
