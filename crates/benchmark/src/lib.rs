//! Benchmark suite for cartonize
//!
//! This crate provides:
//! - Deterministic order generators (uniform, mixed and hazmat profiles)
//! - Benchmark runner covering every allocation strategy
//! - Result recording with JSON and CSV export

mod dataset;
mod runner;

pub use dataset::{standard_catalog, Dataset, DatasetError, DatasetGenerator, Profile};
pub use runner::{
    BenchmarkConfig, BenchmarkResult, BenchmarkRunner, ReportError, RunRecord, StrategySummary,
};
