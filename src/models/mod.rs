//! Core data models for the application
//!
//! This module contains the primary data structures used throughout the application,
//! separated from the logic that operates on them.
//!
//! # Usage
//!
//! ```rust
//! use sharelink::models::{Protocol, Vmess};
//!
//! let link = "vmess://eyJhZGQiOiJhLmNvbSIsInBvcnQiOiI0NDMiLCJpZCI6ImFiYyJ9";
//! let mut node = Vmess::parse(link).unwrap();
//! assert_eq!(node.address, "a.com");
//!
//! let outbound = node.build_outbound(false).unwrap();
//! assert_eq!(outbound.protocol, "vmess");
//! ```

mod general;
pub mod network;
mod protocol;
mod vmess;
pub mod xray;

pub use general::GeneralConfig;
pub use network::Transport;
pub use protocol::Protocol;
pub use vmess::*;
