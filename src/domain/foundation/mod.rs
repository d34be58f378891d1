//! Foundation module - Shared domain primitives.

mod errors;

pub use errors::ValidationError;
