//! Minimal content-addressed version-control client.
//!
//! The crate splits into the object store (framing, digests, loose files),
//! the pack codec (record parsing and delta resolution), and a thin
//! Smart-HTTP transport that together implement the clone pipeline.

pub mod commands;
pub mod config;
pub mod error;
pub mod object;
pub mod pack;
pub mod store;
pub mod transport;
pub mod worktree;
pub mod zlib;

pub use config::Config;
pub use error::{Error, Result};
