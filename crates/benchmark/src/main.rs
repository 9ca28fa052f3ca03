//! Cartonize benchmark runner CLI

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use cartonize::StrategyKind;
use cartonize_benchmark::{
    BenchmarkConfig, BenchmarkResult, BenchmarkRunner, Dataset, DatasetGenerator, Profile,
};

#[derive(Parser)]
#[command(name = "carton-bench")]
#[command(about = "Benchmark runner for cartonize allocation strategies")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available order profiles
    List,

    /// Run benchmark on a generated order
    Run {
        /// Order profile
        #[arg(short, long, value_enum, default_value = "mixed")]
        profile: ProfileArg,

        /// Number of items in the order
        #[arg(short, long, default_value = "48")]
        items: usize,

        /// Generator seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Strategies to benchmark
        #[arg(short, long, value_enum, default_values_t = vec![StrategyArg::Greedy, StrategyArg::BestFit])]
        strategies: Vec<StrategyArg>,

        /// Number of runs per configuration
        #[arg(short, long, default_value = "1")]
        runs: usize,

        /// Route the order through the compatibility-aware packer
        #[arg(long)]
        safe: bool,

        /// Output file for results (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file for CSV results
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Run benchmarks on every profile
    RunAll {
        /// Preset configuration
        #[arg(short, long, value_enum, default_value = "quick")]
        preset: Preset,

        /// Number of items per order
        #[arg(short, long, default_value = "48")]
        items: usize,

        /// Generator seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Output file for results (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file for CSV results
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Run benchmark from a local JSON dataset
    RunFile {
        /// Path to the JSON dataset file
        file: PathBuf,

        /// Strategies to benchmark
        #[arg(short, long, value_enum, default_values_t = vec![StrategyArg::Greedy, StrategyArg::BestFit])]
        strategies: Vec<StrategyArg>,

        /// Number of runs per configuration
        #[arg(short, long, default_value = "1")]
        runs: usize,

        /// Output file for results (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a dataset and save it as JSON
    Generate {
        /// Order profile
        #[arg(short, long, value_enum, default_value = "mixed")]
        profile: ProfileArg,

        /// Number of items in the order
        #[arg(short, long, default_value = "48")]
        items: usize,

        /// Generator seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Output directory
        #[arg(short, long, default_value = "datasets")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ProfileArg {
    /// Identical cubes
    Uniform,
    /// Broad size and weight spread
    Mixed,
    /// Hazard classes, fragile flags and packaging hints
    Hazmat,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Uniform => Profile::Uniform,
            ProfileArg::Mixed => Profile::Mixed,
            ProfileArg::Hazmat => Profile::Hazmat,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// One container when possible, cost-aware fallback
    Intelligent,
    /// Maximize per-container absorption
    Greedy,
    /// Minimize wasted volume per container
    BestFit,
    /// Place the largest items first
    LargestFirst,
    /// Best result across several strategies
    Ensemble,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Intelligent => StrategyKind::Intelligent,
            StrategyArg::Greedy => StrategyKind::Greedy,
            StrategyArg::BestFit => StrategyKind::BestFit,
            StrategyArg::LargestFirst => StrategyKind::LargestFirst,
            StrategyArg::Ensemble => StrategyKind::Ensemble,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    /// Quick benchmarks (greedy and best-fit, one run each)
    Quick,
    /// Standard benchmarks (all strategies, three runs each)
    Standard,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            println!("Available order profiles:");
            println!("=========================");
            for profile in Profile::ALL {
                println!("  - {}", profile);
            }
            println!("\nUse 'carton-bench run -p <PROFILE>' to run benchmarks");
        }

        Commands::Run {
            profile,
            items,
            seed,
            strategies,
            runs,
            safe,
            output,
            csv,
        } => {
            let dataset = DatasetGenerator::new(seed).generate(profile.into(), items);
            println!(
                "Generated dataset: {} ({} items)",
                dataset.name,
                dataset.items.len()
            );

            let strategies: Vec<StrategyKind> = strategies.into_iter().map(Into::into).collect();

            let config = BenchmarkConfig::new()
                .with_strategies(strategies)
                .with_runs_per_config(runs)
                .with_safe_packing(safe);

            let runner = BenchmarkRunner::new(config);
            let results = runner.run_dataset(&dataset);

            results.print_summary();

            if let Some(path) = output {
                results.save_json(&path)?;
                println!("Results saved to: {}", path.display());
            }

            if let Some(path) = csv {
                results.save_csv(&path)?;
                println!("CSV saved to: {}", path.display());
            }
        }

        Commands::RunAll {
            preset,
            items,
            seed,
            output,
            csv,
        } => {
            let config = match preset {
                Preset::Quick => BenchmarkConfig::quick(),
                Preset::Standard => BenchmarkConfig::standard(),
            };

            let generator = DatasetGenerator::new(seed);
            let runner = BenchmarkRunner::new(config);
            let mut all_results = BenchmarkResult::new();

            for profile in Profile::ALL {
                let dataset = generator.generate(profile, items);
                println!("\nRunning {} ({} items)...", dataset.name, dataset.items.len());
                let results = runner.run_dataset(&dataset);
                for run in results.runs {
                    all_results.add_run(run);
                }
            }

            all_results.print_summary();

            println!("\nStrategy Comparison:");
            println!("{:-<60}", "");
            for summary in all_results.summary_by_strategy() {
                println!(
                    "  {:<16} runs={:<3} avg_util={:.1}% avg_time={:.2}ms",
                    summary.strategy,
                    summary.run_count,
                    summary.avg_utilization * 100.0,
                    summary.avg_time_ms
                );
            }

            if let Some(path) = output {
                all_results.save_json(&path)?;
                println!("\nResults saved to: {}", path.display());
            }

            if let Some(path) = csv {
                all_results.save_csv(&path)?;
                println!("CSV saved to: {}", path.display());
            }
        }

        Commands::RunFile {
            file,
            strategies,
            runs,
            output,
        } => {
            let dataset = Dataset::load(&file)?;
            println!(
                "Loaded dataset: {} ({} items, {} containers)",
                dataset.name,
                dataset.items.len(),
                dataset.catalog.len()
            );

            let strategies: Vec<StrategyKind> = strategies.into_iter().map(Into::into).collect();

            let config = BenchmarkConfig::new()
                .with_strategies(strategies)
                .with_runs_per_config(runs);

            let runner = BenchmarkRunner::new(config);
            let results = runner.run_dataset(&dataset);

            results.print_summary();

            if let Some(path) = output {
                results.save_json(&path)?;
                println!("Results saved to: {}", path.display());
            }
        }

        Commands::Generate {
            profile,
            items,
            seed,
            output,
        } => {
            let dataset = DatasetGenerator::new(seed).generate(profile.into(), items);

            std::fs::create_dir_all(&output)?;
            let file_path = output.join(format!("{}.json", dataset.name));
            dataset.save(&file_path)?;

            println!("Dataset saved to: {}", file_path.display());
            println!("  Items: {}", dataset.items.len());
            println!("  Containers: {}", dataset.catalog.len());
            println!("  Total item volume: {:.0} mm3", dataset.total_item_volume());
        }
    }

    Ok(())
}
