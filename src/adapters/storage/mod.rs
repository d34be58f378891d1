//! Storage Adapters
//!
//! Implementations of the AnalysisLog port.
//!
//! ## Available Adapters
//!
//! - **CsvAnalysisLog** - Appends records to a CSV file on disk
//! - **InMemoryAnalysisLog** - Keeps records in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{CsvAnalysisLog, InMemoryAnalysisLog};
//!
//! // Production: CSV file
//! let log = CsvAnalysisLog::new("call_analysis.csv");
//!
//! // Testing: in-memory log
//! let log = InMemoryAnalysisLog::new();
//! ```

mod csv_analysis_log;
mod in_memory_analysis_log;

pub use csv_analysis_log::{CsvAnalysisLog, LOG_HEADER};
pub use in_memory_analysis_log::InMemoryAnalysisLog;
