//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `ai` - Chat-completion providers (OpenAI-compatible HTTP, mock)
//! - `storage` - Analysis record logs (CSV file, in-memory)
//! - `http` - Inbound web form and JSON API

pub mod ai;
pub mod http;
pub mod storage;
