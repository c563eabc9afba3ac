//! Country fact-sheet screening: tolerant indicator extraction, threshold
//! filtering, and weighted multi-criteria scoring.

pub mod config;
pub mod error;
pub mod factbook;
pub mod rating;
pub mod report;
pub mod screening;
pub mod telemetry;
