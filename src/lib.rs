//! Client for the SoulChart name-analysis service.

pub mod client;
pub mod config;
pub mod display;
pub mod download;
pub mod handler;
pub mod model;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use client::{AnalysisApi, HttpAnalysisApi};
pub use display::{DisplayState, MemorySink, StatusSink, StdoutSink};
pub use handler::{AnalysisOutcome, NameAnalysisHandler, Report};
