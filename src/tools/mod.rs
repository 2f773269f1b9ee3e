//! Nutrilog Tools module
//!
//! One function per user action; the MCP server is a thin wrapper around these.

pub mod days;
pub mod food_log;
pub mod status;
pub mod supplements;
pub mod weight;
