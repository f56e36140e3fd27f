//! Mailgraph CLI: build a communication graph from a mail directory and
//! run the analyses over it.
//!
//! Every analysis reads its graph either from a mail directory (`--maildir`)
//! or from an adjacency list written by `build` (`--graph`).

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use mailgraph::{
    ingest_dir, load_from_path, save_to_path, Address, AnalysisConfig, BalanceMetric, Diameter,
    DiameterOptions, Graph,
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Members shown per component in table output
const MEMBER_PREVIEW: usize = 5;

#[derive(Parser)]
#[command(name = "mailgraph", version, about = "Communication graph analysis")]
struct Cli {
    /// YAML analysis configuration
    #[arg(long, global = true, env = "MAILGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum MetricArg {
    /// Messages sent vs. received
    Weighted,
    /// Distinct correspondents
    Distinct,
}

impl From<MetricArg> for BalanceMetric {
    fn from(metric: MetricArg) -> Self {
        match metric {
            MetricArg::Weighted => BalanceMetric::Weighted,
            MetricArg::Distinct => BalanceMetric::Distinct,
        }
    }
}

/// Where the graph comes from
#[derive(Args)]
#[group(required = true, multiple = false)]
struct Input {
    /// Directory of raw messages to ingest
    #[arg(long)]
    maildir: Option<PathBuf>,

    /// Adjacency list written by `build`
    #[arg(long)]
    graph: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a mail directory and save it as an adjacency list
    Build {
        /// Directory of raw messages
        #[arg(long)]
        maildir: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Order, size, isolated vertices and degree rankings
    Stats {
        #[command(flatten)]
        input: Input,

        /// Ranking length (defaults to `top_k` from the config)
        #[arg(long)]
        top: Option<usize>,
    },
    /// Strongly connected components
    Components {
        #[command(flatten)]
        input: Input,

        /// Components listed in table output
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Test for an Eulerian circuit
    Eulerian {
        #[command(flatten)]
        input: Input,

        /// Degree metric for the balance condition
        #[arg(long)]
        metric: Option<MetricArg>,
    },
    /// Vertices within a distance of a source
    Within {
        #[command(flatten)]
        input: Input,

        /// Source address
        source: String,

        /// Distance bound (defaults to `max_distance` from the config)
        #[arg(long)]
        max_distance: Option<u64>,
    },
    /// Cheapest path between two addresses
    Path {
        #[command(flatten)]
        input: Input,

        source: String,
        target: String,
    },
    /// Largest shortest-path distance over all reachable pairs
    Diameter {
        #[command(flatten)]
        input: Input,

        /// Run on the calling thread only
        #[arg(long)]
        sequential: bool,

        /// Worker threads (defaults to `threads` from the config)
        #[arg(long)]
        threads: Option<usize>,

        /// Give up after this many seconds and report the best so far
        #[arg(long)]
        timeout: Option<u64>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => AnalysisConfig::from_yaml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    init_logging(&config, cli.verbose, cli.quiet);

    let format = cli.format;
    match cli.command {
        Commands::Build { maildir, output } => run_build(&config, maildir, output, format),
        Commands::Stats { input, top } => {
            let graph = load_graph(&input, &config)?;
            run_stats(&graph, top.unwrap_or(config.top_k), format)
        }
        Commands::Components { input, limit } => {
            let graph = load_graph(&input, &config)?;
            run_components(&graph, limit, format)
        }
        Commands::Eulerian { input, metric } => {
            let graph = load_graph(&input, &config)?;
            let metric = metric.map(BalanceMetric::from).unwrap_or(config.balance_metric);
            run_eulerian(&graph, metric, format)
        }
        Commands::Within { input, source, max_distance } => {
            let graph = load_graph(&input, &config)?;
            let bound = max_distance.unwrap_or(config.max_distance);
            let source = resolve_address(&graph, &source);
            run_within(&graph, source, bound, format)
        }
        Commands::Path { input, source, target } => {
            let graph = load_graph(&input, &config)?;
            let (source, target) = (resolve_address(&graph, &source), resolve_address(&graph, &target));
            run_path(&graph, source, target, format)
        }
        Commands::Diameter { input, sequential, threads, timeout } => {
            let graph = load_graph(&input, &config)?;
            let mut config = config;
            if sequential {
                config.parallel = false;
            }
            if threads.is_some() {
                config.threads = threads;
            }
            let diameter = compute_diameter(graph, config, timeout).await?;
            print_diameter(&diameter, format)
        }
    }
}

/// `RUST_LOG` wins over the flags, the flags over the config file
fn init_logging(config: &AnalysisConfig, verbose: u8, quiet: bool) {
    let level = if quiet {
        "warn"
    } else {
        match verbose {
            0 => config.log_level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_graph(input: &Input, config: &AnalysisConfig) -> Result<Graph<Address>> {
    let store = match (&input.maildir, &input.graph) {
        (Some(dir), _) => {
            let summary = ingest_dir(dir, config.vertex_universe)
                .with_context(|| format!("ingesting {}", dir.display()))?;
            summary.store
        }
        (None, Some(path)) => {
            load_from_path(path).with_context(|| format!("loading {}", path.display()))?
        }
        (None, None) => bail!("either --maildir or --graph is required"),
    };
    Ok(store.freeze())
}

/// Match an address as typed, falling back to its lower-cased form since
/// ingestion lower-cases every address.
fn resolve_address(graph: &Graph<Address>, raw: &str) -> Address {
    let exact = Address::from(raw);
    if graph.contains(&exact) {
        return exact;
    }
    Address::from(raw.to_lowercase())
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header.to_vec());
    table
}

fn print_json(value: serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn run_build(
    config: &AnalysisConfig,
    maildir: PathBuf,
    output: PathBuf,
    format: OutputFormat,
) -> Result<()> {
    let summary = ingest_dir(&maildir, config.vertex_universe)
        .with_context(|| format!("ingesting {}", maildir.display()))?;
    let (messages, skipped) = (summary.messages, summary.skipped);
    let graph = summary.store.freeze();
    save_to_path(&graph, &output).with_context(|| format!("writing {}", output.display()))?;

    match format {
        OutputFormat::Json => print_json(json!({
            "output": output,
            "messages": messages,
            "skipped": skipped,
            "vertices": graph.order(),
            "edges": graph.size(),
            "total_weight": graph.total_weight(),
        })),
        OutputFormat::Table => {
            println!("Messages: {} ({} skipped)", messages, skipped);
            println!("Vertices: {}", graph.order());
            println!("Edges:    {}", graph.size());
            println!("Saved to  {}", output.display());
            Ok(())
        }
    }
}

fn run_stats(graph: &Graph<Address>, top: usize, format: OutputFormat) -> Result<()> {
    let stats = graph.degree_statistics(top);

    match format {
        OutputFormat::Json => print_json(serde_json::to_value(&stats)?),
        OutputFormat::Table => {
            println!("Vertices:     {}", stats.order);
            println!("Edges:        {}", stats.size);
            println!("Total weight: {}", stats.total_weight);
            println!("Isolated:     {}", stats.isolated.len());

            for (title, ranking) in [("Sent", &stats.top_out), ("Received", &stats.top_in)] {
                let mut table = new_table(&["#", "Address", title]);
                for (rank, (address, degree)) in ranking.iter().enumerate() {
                    table.add_row(vec![
                        (rank + 1).to_string(),
                        address.to_string(),
                        degree.to_string(),
                    ]);
                }
                println!("{}", table);
            }
            Ok(())
        }
    }
}

fn run_components(graph: &Graph<Address>, limit: usize, format: OutputFormat) -> Result<()> {
    let components = graph.strongly_connected_components();

    match format {
        OutputFormat::Json => print_json(json!({
            "count": components.count(),
            "largest": components.largest().map(<[Address]>::len).unwrap_or(0),
            "components": components.components,
        })),
        OutputFormat::Table => {
            println!("Strongly connected components: {}", components.count());
            let mut table = new_table(&["Id", "Size", "Members"]);
            for (id, members) in components.components.iter().take(limit).enumerate() {
                let mut preview: Vec<String> =
                    members.iter().take(MEMBER_PREVIEW).map(Address::to_string).collect();
                if members.len() > MEMBER_PREVIEW {
                    preview.push("...".to_string());
                }
                table.add_row(vec![id.to_string(), members.len().to_string(), preview.join(", ")]);
            }
            println!("{}", table);
            Ok(())
        }
    }
}

fn run_eulerian(graph: &Graph<Address>, metric: BalanceMetric, format: OutputFormat) -> Result<()> {
    let report = graph.eulerian_check_with(metric);

    match format {
        OutputFormat::Json => print_json(serde_json::to_value(&report)?),
        OutputFormat::Table => {
            println!("Eulerian:   {}", if report.is_eulerian { "yes" } else { "no" });
            println!("Metric:     {:?}", report.metric);
            println!("Components: {}", report.component_count);
            for violation in &report.violations {
                println!("Violation:  {:?}", violation);
            }
            if !report.unbalanced.is_empty() {
                let mut table = new_table(&["Address", "In", "Out"]);
                for entry in &report.unbalanced {
                    table.add_row(vec![
                        entry.vertex.to_string(),
                        entry.in_degree.to_string(),
                        entry.out_degree.to_string(),
                    ]);
                }
                println!("{}", table);
            }
            Ok(())
        }
    }
}

fn run_within(
    graph: &Graph<Address>,
    source: Address,
    max_distance: u64,
    format: OutputFormat,
) -> Result<()> {
    let paths = graph.shortest_paths(&source, Some(max_distance))?;
    let reached = paths.within();

    match format {
        OutputFormat::Json => print_json(json!({
            "source": source,
            "max_distance": max_distance,
            "reached": reached
                .iter()
                .map(|(vertex, distance)| json!({
                    "vertex": vertex,
                    "distance": distance,
                    "path": paths.path_to(vertex),
                }))
                .collect::<Vec<_>>(),
        })),
        OutputFormat::Table => {
            let mut table = new_table(&["Address", "Distance", "Via"]);
            for (vertex, distance) in &reached {
                let via = paths
                    .predecessor(vertex)
                    .map(Address::to_string)
                    .unwrap_or_default();
                table.add_row(vec![vertex.to_string(), distance.to_string(), via]);
            }
            println!("{}", table);
            println!("{} address(es) within {} of {}", reached.len(), max_distance, source);
            Ok(())
        }
    }
}

fn run_path(graph: &Graph<Address>, source: Address, target: Address, format: OutputFormat) -> Result<()> {
    let path = graph.shortest_path(&source, &target)?;

    match (format, path) {
        (OutputFormat::Json, path) => print_json(serde_json::to_value(&path)?),
        (OutputFormat::Table, Some(path)) => {
            let hops: Vec<String> = path.vertices.iter().map(Address::to_string).collect();
            println!("{}", hops.join(" -> "));
            println!("Cost: {}", path.cost);
            Ok(())
        }
        (OutputFormat::Table, None) => {
            println!("No path from {} to {}", source, target);
            Ok(())
        }
    }
}

/// Run the diameter sweep off the async runtime; Ctrl-C or the timeout
/// cancels it and the partial result is reported.
async fn compute_diameter(
    graph: Graph<Address>,
    config: AnalysisConfig,
    timeout: Option<u64>,
) -> Result<Diameter<Address>> {
    let cancel = Arc::new(AtomicBool::new(false));
    let mut worker = {
        let cancel = Arc::clone(&cancel);
        tokio::task::spawn_blocking(move || {
            let options = DiameterOptions::from_config(&config).with_cancel(&cancel);
            graph.diameter_with(&options)
        })
    };

    let deadline = async {
        match timeout {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        result = &mut worker => return Ok(result?),
        _ = tokio::signal::ctrl_c() => warn!("Interrupted, cancelling diameter computation"),
        _ = deadline => warn!("Timed out, cancelling diameter computation"),
    }

    cancel.store(true, Ordering::Relaxed);
    let diameter = worker.await?;
    info!("Diameter computation stopped early at {}", diameter.value);
    Ok(diameter)
}

fn print_diameter(diameter: &Diameter<Address>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(serde_json::to_value(diameter)?),
        OutputFormat::Table => {
            let hops: Vec<String> = diameter.path.iter().map(Address::to_string).collect();
            println!("Diameter: {}", diameter.value);
            println!("Path ({} vertices): {}", diameter.path_length, hops.join(" -> "));
            if !diameter.complete {
                println!("(partial: computation was cancelled)");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailgraph::GraphStore;

    #[test]
    fn test_resolve_address() {
        let mut store = GraphStore::new();
        store.add_edge(Address::from("kenneth.lay@enron.com"), Address::from("Mixed@Case.org"));
        let graph = store.freeze();

        assert_eq!(
            resolve_address(&graph, "Kenneth.Lay@Enron.com"),
            Address::from("kenneth.lay@enron.com")
        );
        assert_eq!(resolve_address(&graph, "Mixed@Case.org"), Address::from("Mixed@Case.org"));
        assert_eq!(resolve_address(&graph, "Nobody@Enron.com"), Address::from("nobody@enron.com"));
    }
}
