//! Chronicle API interaction module
//!
//! This module provides the core functionality for talking to the Chronicle
//! parser tooling API: authentication, the HTTP executor, and endpoint
//! construction.
//!
//! # Module Structure
//!
//! - [`auth`] - Service account credentials scoped to Chronicle
//! - [`client`] - Region-aware client and URL builders
//! - [`http`] - Single-request HTTP executor
//!
//! # Example
//!
//! ```ignore
//! use cbntool::chronicle::client::ChronicleClient;
//!
//! async fn example(config: &cbntool::config::Config) -> cbntool::error::Result<()> {
//!     let client = ChronicleClient::from_config(config)?;
//!     let parsers = client.get(&client.parsers_url()).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
