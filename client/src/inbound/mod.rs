//! Inbound adapters driving the resource clients.

pub mod cli;
