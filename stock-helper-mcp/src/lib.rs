//! MCP servers for the stock-helper toolset.
//!
//! Two independent adapters share one shape: a credential-bearing upstream
//! client behind a trait, a static tool (and resource) catalog, a dispatch
//! layer that turns every outcome into a single text envelope, and a stdio
//! process shell.
//!
//! - [`trading212::Trading212Mcp`]: brokerage account tools and `trading212://` resources.
//! - [`telegram::TelegramMcp`]: channel read and search tools over a lazily
//!   established user session.

pub mod adapters;
pub mod envelope;
pub mod shell;
pub mod telegram;
pub mod trading212;
