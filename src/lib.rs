//! Manage Chronicle CBN parser configurations.
//!
//! # Module Structure
//!
//! - [`chronicle`] - Authenticated access to the parser tooling API
//! - [`commands`] - The parser commands and their orchestration
//! - [`document`] - Read-only documents the commands produce
//! - [`frontend`] - Prompts, document display and messages
//! - [`models`] - Request and response payloads
//! - [`config`] / [`session`] / [`workspace`] - Settings and per-workspace state

pub mod chronicle;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod frontend;
pub mod models;
pub mod session;
pub mod workspace;
