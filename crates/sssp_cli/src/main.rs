//! Command-line front end for the shortest-path engine.
//!
//! Usage:
//!   sssp paths <GRAPH> <SOURCE>                  # distance table from SOURCE
//!   sssp paths <GRAPH> <SOURCE> --target <T>     # also print the path to T
//!   sssp paths <GRAPH> <SOURCE> --format json    # machine-readable output

mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use sssp::GraphDescription;
use tracing_subscriber::EnvFilter;

use crate::report::Report;

#[derive(Parser)]
#[command(name = "sssp")]
#[command(version)]
#[command(about = "Single-source shortest paths over a weighted graph")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the distance from SOURCE to every vertex
    Paths {
        /// JSON graph description
        #[arg(value_name = "GRAPH")]
        graph: PathBuf,

        /// Source vertex identifier
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Also print the shortest path to this vertex
        #[arg(short, long, value_name = "VERTEX")]
        target: Option<String>,

        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    finish(run(cli.command))
}

fn finish(result: anyhow::Result<String>) -> ExitCode {
    match result {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> anyhow::Result<String> {
    match command {
        Command::Paths {
            graph,
            source,
            target,
            format,
        } => {
            let text = std::fs::read_to_string(&graph)
                .with_context(|| format!("reading graph file {}", graph.display()))?;
            let description: GraphDescription = serde_json::from_str(&text)
                .with_context(|| format!("parsing graph file {}", graph.display()))?;
            let graph = description.build().context("building graph")?;
            tracing::debug!(
                vertices = graph.vertex_count(),
                edges = graph.edge_count(),
                "graph loaded"
            );

            let paths = sssp::dijkstra(&graph, &source)?;
            let report = Report::new(&paths, target.as_ref())?;
            match format {
                Format::Table => Ok(report.to_table()),
                Format::Json => Ok(serde_json::to_string_pretty(&report)?),
            }
        }
    }
}
