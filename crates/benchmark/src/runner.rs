//! Benchmark execution and result aggregation.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Instant;

use cartonize::{Allocator, SafePacker, StrategyKind};
use serde::Serialize;
use thiserror::Error;

use crate::dataset::Dataset;

/// Errors that can occur when exporting results.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Which strategies to run, and how often.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    strategies: Vec<StrategyKind>,
    runs_per_config: usize,
    safe_packing: bool,
}

impl BenchmarkConfig {
    /// One run of every strategy through the raw allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Single run of the two cheapest strategies.
    pub fn quick() -> Self {
        Self::new().with_strategies(vec![StrategyKind::Greedy, StrategyKind::BestFit])
    }

    /// Three runs of every strategy.
    pub fn standard() -> Self {
        Self::new().with_runs_per_config(3)
    }

    /// Replaces the strategy list. An empty list keeps the current one.
    pub fn with_strategies(mut self, strategies: Vec<StrategyKind>) -> Self {
        if !strategies.is_empty() {
            self.strategies = strategies;
        }
        self
    }

    /// Sets how many times each strategy runs, at least once.
    pub fn with_runs_per_config(mut self, runs: usize) -> Self {
        self.runs_per_config = runs.max(1);
        self
    }

    /// Routes orders through the compatibility-aware packer instead of
    /// the raw allocator.
    pub fn with_safe_packing(mut self, enabled: bool) -> Self {
        self.safe_packing = enabled;
        self
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            strategies: StrategyKind::ALL.to_vec(),
            runs_per_config: 1,
            safe_packing: false,
        }
    }
}

/// One timed allocation attempt.
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    pub dataset: String,
    pub strategy: String,
    pub run: usize,
    pub success: bool,
    pub container_count: usize,
    pub item_count: usize,
    pub total_price: f64,
    pub average_utilization: f64,
    pub elapsed_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

struct RunStats {
    container_count: usize,
    item_count: usize,
    total_price: f64,
    average_utilization: f64,
}

/// Executes benchmark runs against datasets.
#[derive(Debug, Clone)]
pub struct BenchmarkRunner {
    config: BenchmarkConfig,
}

impl BenchmarkRunner {
    /// Creates a runner with the given configuration.
    pub fn new(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    /// Runs every configured strategy against the dataset.
    pub fn run_dataset(&self, dataset: &Dataset) -> BenchmarkResult {
        let mut result = BenchmarkResult::new();
        for &strategy in &self.config.strategies {
            for run in 0..self.config.runs_per_config {
                log::debug!("running {} on {} (run {})", strategy, dataset.name, run);
                result.add_run(self.single_run(dataset, strategy, run));
            }
        }
        result
    }

    fn single_run(&self, dataset: &Dataset, strategy: StrategyKind, run: usize) -> RunRecord {
        let start = Instant::now();
        let outcome = if self.config.safe_packing {
            SafePacker::new()
                .pack_order_with(Some(strategy), &dataset.items, &dataset.catalog)
                .map(|packed| RunStats {
                    container_count: packed.container_count(),
                    item_count: packed.item_count(),
                    total_price: packed.total_price(),
                    average_utilization: packed.average_utilization(),
                })
                .map_err(|e| e.to_string())
        } else {
            Allocator::new()
                .allocate(strategy, &dataset.items, &dataset.catalog)
                .map(|allocation| RunStats {
                    container_count: allocation.container_count(),
                    item_count: allocation.item_count(),
                    total_price: allocation.total_price(),
                    average_utilization: allocation.average_utilization(),
                })
                .map_err(|e| e.to_string())
        };
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        match outcome {
            Ok(stats) => RunRecord {
                dataset: dataset.name.clone(),
                strategy: strategy.name().to_string(),
                run,
                success: true,
                container_count: stats.container_count,
                item_count: stats.item_count,
                total_price: stats.total_price,
                average_utilization: stats.average_utilization,
                elapsed_ms,
                error: None,
            },
            Err(message) => RunRecord {
                dataset: dataset.name.clone(),
                strategy: strategy.name().to_string(),
                run,
                success: false,
                container_count: 0,
                item_count: 0,
                total_price: 0.0,
                average_utilization: 0.0,
                elapsed_ms,
                error: Some(message),
            },
        }
    }
}

/// Per-strategy aggregate over a set of runs.
#[derive(Debug, Clone, Serialize)]
pub struct StrategySummary {
    pub strategy: String,
    pub run_count: usize,
    pub success_count: usize,
    /// Mean utilization over successful runs.
    pub avg_utilization: f64,
    /// Mean container count over successful runs.
    pub avg_containers: f64,
    /// Mean container spend over successful runs.
    pub avg_price: f64,
    /// Mean wall time over all runs, failures included.
    pub avg_time_ms: f64,
}

/// Accumulated run records, possibly across several datasets.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BenchmarkResult {
    pub runs: Vec<RunRecord>,
}

impl BenchmarkResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a run record.
    pub fn add_run(&mut self, run: RunRecord) {
        self.runs.push(run);
    }

    /// Aggregates runs per strategy, sorted by strategy name.
    pub fn summary_by_strategy(&self) -> Vec<StrategySummary> {
        let mut grouped: BTreeMap<&str, Vec<&RunRecord>> = BTreeMap::new();
        for run in &self.runs {
            grouped.entry(run.strategy.as_str()).or_default().push(run);
        }

        grouped
            .into_iter()
            .map(|(strategy, runs)| {
                let run_count = runs.len();
                let total_ms: f64 = runs.iter().map(|r| r.elapsed_ms).sum();
                let successes: Vec<&RunRecord> =
                    runs.into_iter().filter(|r| r.success).collect();
                let success_count = successes.len();
                let div = success_count.max(1) as f64;

                StrategySummary {
                    strategy: strategy.to_string(),
                    run_count,
                    success_count,
                    avg_utilization: successes
                        .iter()
                        .map(|r| r.average_utilization)
                        .sum::<f64>()
                        / div,
                    avg_containers: successes
                        .iter()
                        .map(|r| r.container_count as f64)
                        .sum::<f64>()
                        / div,
                    avg_price: successes.iter().map(|r| r.total_price).sum::<f64>() / div,
                    avg_time_ms: total_ms / run_count.max(1) as f64,
                }
            })
            .collect()
    }

    /// Prints a per-strategy table to stdout.
    pub fn print_summary(&self) {
        println!();
        println!("=== Benchmark Summary ===");
        println!("Total runs: {}", self.runs.len());
        println!();
        println!(
            "{:<14} {:>5} {:>5} {:>9} {:>9} {:>9} {:>10}",
            "strategy", "runs", "ok", "avg util", "avg boxes", "avg price", "avg ms"
        );
        for summary in self.summary_by_strategy() {
            println!(
                "{:<14} {:>5} {:>5} {:>8.1}% {:>9.2} {:>9.2} {:>10.2}",
                summary.strategy,
                summary.run_count,
                summary.success_count,
                summary.avg_utilization * 100.0,
                summary.avg_containers,
                summary.avg_price,
                summary.avg_time_ms,
            );
        }
    }

    /// Writes all runs as pretty-printed JSON.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(&self.runs)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Writes all runs as CSV with a header row.
    pub fn save_csv(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        fs::write(path, self.to_csv())?;
        Ok(())
    }

    fn to_csv(&self) -> String {
        let mut out = String::from(
            "dataset,strategy,run,success,container_count,item_count,\
             total_price,average_utilization,elapsed_ms\n",
        );
        for run in &self.runs {
            out.push_str(&format!(
                "{},{},{},{},{},{},{:.2},{:.4},{:.3}\n",
                run.dataset,
                run.strategy,
                run.run,
                run.success,
                run.container_count,
                run.item_count,
                run.total_price,
                run.average_utilization,
                run.elapsed_ms,
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DatasetGenerator, Profile};
    use cartonize::{Container, Item};

    fn record(strategy: &str, success: bool, utilization: f64, ms: f64) -> RunRecord {
        RunRecord {
            dataset: "test".to_string(),
            strategy: strategy.to_string(),
            run: 0,
            success,
            container_count: if success { 2 } else { 0 },
            item_count: if success { 4 } else { 0 },
            total_price: if success { 3.0 } else { 0.0 },
            average_utilization: utilization,
            elapsed_ms: ms,
            error: (!success).then(|| "boom".to_string()),
        }
    }

    #[test]
    fn test_quick_config_runs_each_strategy_once() {
        let dataset = DatasetGenerator::new(3).generate(Profile::Uniform, 6);
        let results = BenchmarkRunner::new(BenchmarkConfig::quick()).run_dataset(&dataset);

        assert_eq!(results.runs.len(), 2);
        assert_eq!(results.runs[0].strategy, "greedy");
        assert_eq!(results.runs[1].strategy, "best_fit");
        assert!(results.runs.iter().all(|r| r.success));
        assert!(results.runs.iter().all(|r| r.item_count == 6));
    }

    #[test]
    fn test_runs_per_config_multiplies_records() {
        let dataset = DatasetGenerator::new(3).generate(Profile::Uniform, 4);
        let config = BenchmarkConfig::new()
            .with_strategies(vec![StrategyKind::Greedy])
            .with_runs_per_config(3);
        let results = BenchmarkRunner::new(config).run_dataset(&dataset);

        assert_eq!(results.runs.len(), 3);
        let run_indices: Vec<usize> = results.runs.iter().map(|r| r.run).collect();
        assert_eq!(run_indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_failed_run_is_recorded_not_fatal() {
        let dataset = Dataset {
            name: "oversize".to_string(),
            items: vec![Item::new("monolith", 500.0, 500.0, 500.0)],
            catalog: vec![Container::new("box", 200.0, 200.0, 200.0)],
        };
        let config = BenchmarkConfig::new().with_strategies(vec![StrategyKind::Greedy]);
        let results = BenchmarkRunner::new(config).run_dataset(&dataset);

        assert_eq!(results.runs.len(), 1);
        let run = &results.runs[0];
        assert!(!run.success);
        assert!(run.error.is_some());
        assert_eq!(run.container_count, 0);
    }

    #[test]
    fn test_safe_packing_separates_incompatible_items() {
        let dataset = Dataset {
            name: "hazmat".to_string(),
            items: vec![
                Item::new("phone", 80.0, 50.0, 20.0)
                    .with_hazard_class("UN3481-Lithium_Ion_Battery"),
                Item::new("shampoo", 70.0, 70.0, 150.0).with_packaging_hint("plastic_bottle"),
            ],
            catalog: vec![Container::new("box", 200.0, 200.0, 200.0).with_price(1.0)],
        };
        let config = BenchmarkConfig::new()
            .with_strategies(vec![StrategyKind::Greedy])
            .with_safe_packing(true);
        let results = BenchmarkRunner::new(config).run_dataset(&dataset);

        let run = &results.runs[0];
        assert!(run.success);
        assert_eq!(run.container_count, 2);
        assert_eq!(run.item_count, 2);
    }

    #[test]
    fn test_summary_groups_and_averages_by_strategy() {
        let mut results = BenchmarkResult::new();
        results.add_run(record("greedy", true, 0.5, 10.0));
        results.add_run(record("greedy", true, 0.7, 20.0));
        results.add_run(record("best_fit", false, 0.0, 40.0));

        let summaries = results.summary_by_strategy();
        assert_eq!(summaries.len(), 2);

        // BTreeMap ordering puts best_fit before greedy.
        assert_eq!(summaries[0].strategy, "best_fit");
        assert_eq!(summaries[0].run_count, 1);
        assert_eq!(summaries[0].success_count, 0);
        assert!((summaries[0].avg_time_ms - 40.0).abs() < 1e-9);

        assert_eq!(summaries[1].strategy, "greedy");
        assert_eq!(summaries[1].success_count, 2);
        assert!((summaries[1].avg_utilization - 0.6).abs() < 1e-9);
        assert!((summaries[1].avg_containers - 2.0).abs() < 1e-9);
        assert!((summaries[1].avg_time_ms - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_csv_has_header_and_one_row_per_run() {
        let mut results = BenchmarkResult::new();
        results.add_run(record("greedy", true, 0.5, 10.0));
        results.add_run(record("ensemble", false, 0.0, 5.0));

        let csv = results.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("dataset,strategy,run,success"));
        assert!(lines[1].starts_with("test,greedy,0,true,2,4,3.00,0.5000"));
        assert!(lines[2].starts_with("test,ensemble,0,false,0,0,0.00,0.0000"));
    }
}
