//! Call Analyzer - Customer call transcript summarization
//!
//! This crate accepts a call transcript over a web form or JSON API, asks a
//! hosted chat-completion model for a short summary and a sentiment label,
//! normalizes the reply into a strict two-field result and appends it to a
//! CSV record log.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
