//! Trading 212 brokerage adapter.

pub mod resources;
pub mod schemas;
mod server;

pub use server::Trading212Mcp;
