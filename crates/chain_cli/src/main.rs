//! Chain CLI
//!
//! 월드 스냅샷(JSON 또는 샘플)에서 액션 체인 탐색 실행
//! 세 가지 탐색 전략 비교

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use chain_core::{
    scenario, ChainHolder, CompositeGenerator, CooperativeAction, DefaultFieldEvaluator, GameTime, SearchConfig,
    SearchStats, StrategyKind, WorldSnapshot,
};
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use serde::Serialize;
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use std::rc::Rc;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "chain_cli")]
#[command(about = "Search action chains on a world snapshot", long_about = None)]
struct Cli {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Run one search and print the best chain
    Search {
        #[command(flatten)]
        input: InputArgs,

        /// Print the result as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Run every strategy on the same snapshot
    Compare {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Write a sample snapshot as JSON
    Sample {
        /// Sample name (counter-attack, edge-of-box)
        #[arg(long)]
        name: String,

        /// Output JSON file path
        #[arg(long)]
        out: PathBuf,
    },
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct InputArgs {
    /// World snapshot JSON file
    #[arg(long, conflicts_with = "sample")]
    scenario: Option<PathBuf>,

    /// Built-in sample snapshot (default: counter-attack)
    #[arg(long)]
    sample: Option<String>,

    /// Search config file (.yaml/.yml or JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// best-first, depth-first or monte-carlo
    #[arg(long)]
    strategy: Option<StrategyKind>,

    #[arg(long)]
    max_depth: Option<usize>,

    #[arg(long)]
    max_traversal: Option<usize>,
}

#[cfg(feature = "cli")]
impl InputArgs {
    fn world(&self) -> Result<WorldSnapshot> {
        if let Some(path) = &self.scenario {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read scenario {}", path.display()))?;
            return serde_json::from_str(&text).with_context(|| format!("invalid scenario {}", path.display()));
        }
        let name = self.sample.as_deref().unwrap_or("counter-attack");
        Ok(scenario::by_name(name)?)
    }

    fn search_config(&self) -> Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::load(path).with_context(|| format!("failed to load {}", path.display()))?,
            None => SearchConfig::default(),
        };
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(max_traversal) = self.max_traversal {
            config.max_traversal = max_traversal;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(feature = "cli")]
#[derive(Serialize)]
struct SearchReport<'a> {
    strategy: StrategyKind,
    time: GameTime,
    chain: Vec<&'a CooperativeAction>,
    value: Option<f64>,
    stats: &'a SearchStats,
    decision: Option<CooperativeAction>,
}

#[cfg(feature = "cli")]
fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .context("failed to install log subscriber")?;

    Ok(())
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Search { input, json } => {
            let wm = input.world()?;
            let config = input.search_config()?;
            let holder = run_search(config, &wm)?;
            if json {
                print_json(&holder, &wm)?;
            } else {
                print_chain(&holder, &wm)?;
            }
        }

        Commands::Compare { input } => {
            let wm = input.world()?;
            let base = input.search_config()?;
            println!("{:<12} {:>6} {:>6} {:>4} {:>12} {:>10}  first action", "strategy", "nodes", "plays", "len", "value", "elapsed");
            for kind in StrategyKind::ALL {
                let holder = run_search(base.clone().with_strategy(kind), &wm)?;
                let graph = holder.graph()?;
                let stats = graph.stats();
                let first = graph.best_first_action().map(|a| a.to_string()).unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<12} {:>6} {:>6} {:>4} {:>12} {:>10.2?}  {}",
                    kind.name(),
                    stats.node_count,
                    stats.playouts,
                    stats.best_length,
                    stats.best_value.map(|v| format!("{:.3}", v)).unwrap_or_else(|| "-".to_string()),
                    stats.elapsed,
                    first
                );
            }
        }

        Commands::Sample { name, out } => {
            let wm = scenario::by_name(&name)?;
            let json = serde_json::to_string_pretty(&wm)?;
            std::fs::write(&out, json).with_context(|| format!("failed to write {}", out.display()))?;
            println!("Sample '{}' saved to: {}", name, out.display());
        }
    }

    Ok(())
}

/// One holder cycle with the reference generator and evaluator.
#[cfg(feature = "cli")]
fn run_search(config: SearchConfig, wm: &WorldSnapshot) -> Result<ChainHolder> {
    tracing::info!(
        strategy = %config.strategy,
        max_depth = config.max_depth,
        max_traversal = config.max_traversal,
        time = %wm.time,
        "running chain search"
    );
    let mut holder = ChainHolder::new(config);
    holder.init(Rc::new(DefaultFieldEvaluator::new()), Rc::new(CompositeGenerator::standard()))?;
    holder.update(wm)?;
    Ok(holder)
}

#[cfg(feature = "cli")]
fn print_chain(holder: &ChainHolder, wm: &WorldSnapshot) -> Result<()> {
    let graph = holder.graph()?;
    let best = graph.best_sequence();
    let stats = graph.stats();

    println!("Strategy: {}  Time: {}", graph.kind(), wm.time);
    if best.is_empty() {
        println!("   (no chain found)");
    }
    for (i, pair) in best.chain().iter().enumerate() {
        println!("   {}. {}", i + 1, pair.action());
    }
    if let Some(value) = stats.best_value {
        println!("   Value:    {:.3}", value);
    }
    println!("   Nodes:    {}", stats.node_count);
    if stats.playouts > 0 {
        println!("   Playouts: {}", stats.playouts);
    }
    println!("   Elapsed:  {:.2?}", stats.elapsed);

    match holder.decision(wm)? {
        Some(action) => println!("Decision: {}", action),
        None => println!("Decision: none (ball not kickable)"),
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn print_json(holder: &ChainHolder, wm: &WorldSnapshot) -> Result<()> {
    let graph = holder.graph()?;
    let report = SearchReport {
        strategy: graph.kind(),
        time: wm.time,
        chain: graph.best_sequence().chain().iter().map(|p| p.action()).collect(),
        value: graph.stats().best_value,
        stats: graph.stats(),
        decision: holder.decision(wm)?,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("chain_cli is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
