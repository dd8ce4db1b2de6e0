//! `gromov`: compute the δ-hyperbolicity of an edge-list file.
//!
//! ```text
//! gromov graph.csv
//! gromov graph.json -a log --strict --json
//! GROMOV_THREADS=4 gromov big.csv -a factor-2 -vv
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use gromov::{compute_hyperbolicity, load_graph, Algorithm};

#[derive(Parser)]
#[command(name = "gromov")]
#[command(version)]
#[command(about = "Gromov δ-hyperbolicity of weighted graphs")]
struct Cli {
    /// Edge list: `.csv` (source,target[,weight]) or `.json` ({"edges": [...]})
    file: PathBuf,

    /// exact, factor-2, or log
    #[arg(short, long, default_value = "exact")]
    algorithm: Algorithm,

    /// Print the all-pairs distance matrix
    #[arg(long)]
    matrix: bool,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    /// Fail if the log approximation could not build a spanning tree
    #[arg(long)]
    strict: bool,

    /// Worker threads (defaults to one per core)
    #[arg(long, env = "GROMOV_THREADS")]
    threads: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "gromov failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
        info!(threads, "configured rayon pool");
    }

    let graph = load_graph(&cli.file)?;
    let report = compute_hyperbolicity(&graph, cli.algorithm)?;

    if let (true, Some(tree)) = (cli.strict, report.tree) {
        tree.require_complete()?;
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("File:           {}", cli.file.display());
    println!("Nodes:          {}", graph.len());
    println!("Edges:          {}", graph.edge_count());
    println!("Algorithm:      {}", report.algorithm);
    println!("Hyperbolicity:  {}", report.hyperbolicity);
    if let Some(tree) = report.tree.filter(|t| !t.is_complete()) {
        println!(
            "Tree:           incomplete ({} unlinked components, {} unleveled nodes)",
            tree.unlinked_components, tree.unleveled_nodes
        );
    }
    println!("Elapsed:        {} µs", report.elapsed.as_micros());

    if cli.matrix {
        println!();
        println!("{}", report.node_order.join("\t"));
        print!("{}", report.distance_matrix);
    }
    Ok(())
}
