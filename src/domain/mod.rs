//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (errors)
//! - `call` - Transcripts, sentiment, analysis results and reply parsing

pub mod call;
pub mod foundation;
