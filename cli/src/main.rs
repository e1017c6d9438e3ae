//! Rankwalk CLI: runs, animates and explains PageRank on a small graph
//!
//! The graph comes from a preset or a JSON file (`{nodes: [...], edges: [...]}`).
//! This binary is the embedding: it owns the timer that drives auto-advance.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use rankwalk::algo::{format_value, ranking, rankings_differ};
use rankwalk::graph::preset;
use rankwalk::{
    AutoAdvance, CentralityMode, Graph, RankConfig, RankRecord, RankSession, RankVector, Speed,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Parser)]
#[command(name = "rankwalk", version, about = "Interactive PageRank engine")]
struct Cli {
    /// Preset graph to load
    #[arg(long, global = true, conflicts_with = "graph")]
    preset: Option<String>,

    /// JSON graph file to load
    #[arg(long, global = true)]
    graph: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, global = true, env = "RANKWALK_CONFIG")]
    config: Option<PathBuf>,

    /// Damping factor, strictly between 0 and 1
    #[arg(long, global = true)]
    alpha: Option<f64>,

    /// L1 convergence threshold
    #[arg(long, global = true)]
    epsilon: Option<f64>,

    /// Iteration cap
    #[arg(long, global = true)]
    max_iterations: Option<usize>,

    /// Auto-advance speed (slow, normal, fast)
    #[arg(long, global = true)]
    speed: Option<String>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Log iterations and resets
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Run PageRank to convergence and print the ranks
    Rank,
    /// Auto-advance at the configured speed, printing every iteration
    Animate,
    /// Advance a fixed number of iterations by hand
    Step {
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Print the H, H' and G matrices
    Matrix {
        /// Decimal places
        #[arg(long, default_value_t = 3)]
        decimals: usize,
    },
    /// Compare PageRank with in-degree and eigenvector centrality
    Compare,
    /// List the preset graphs
    Presets,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Presets => run_presets(&cli.format),
        _ => match build_session(&cli) {
            Ok(session) => match cli.command {
                Commands::Rank => run_rank(session, &cli.format),
                Commands::Animate => run_animate(session, &cli.format).await,
                Commands::Step { count } => run_step(session, count, &cli.format),
                Commands::Matrix { decimals } => run_matrix(&session, decimals, &cli.format),
                Commands::Compare => run_compare(session, &cli.format),
                Commands::Presets => unreachable!(),
            },
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn build_session(cli: &Cli) -> Result<RankSession> {
    let mut config = match &cli.config {
        Some(path) => RankConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RankConfig::default(),
    };
    if let Some(alpha) = cli.alpha {
        config.alpha = alpha;
    }
    if let Some(epsilon) = cli.epsilon {
        config.epsilon = epsilon;
    }
    if let Some(max_iterations) = cli.max_iterations {
        config.max_iterations = max_iterations;
    }
    if let Some(speed) = &cli.speed {
        config.speed = speed.parse::<Speed>()?;
    }

    let graph = match (&cli.preset, &cli.graph) {
        (_, Some(path)) => {
            Graph::load(path).with_context(|| format!("loading graph {}", path.display()))?
        }
        (Some(name), None) => preset::by_name(name)?.graph,
        (None, None) => preset::paper_example().graph,
    };

    Ok(RankSession::with_graph(graph, config)?)
}

fn print_ranks(session: &RankSession, ranks: &RankVector, format: &OutputFormat) -> Result<()> {
    let graph = session.graph();
    let adjacency = session.adjacency();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
        }
        OutputFormat::Csv => {
            println!("position,id,label,rank");
            for entry in ranking(ranks) {
                let label = graph.node(&entry.id).map(|n| n.display_label()).unwrap_or("");
                println!("{},{},{},{}", entry.position, entry.id, label, entry.value);
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["#", "Node", "Rank", "Out", "Dangling"]);

            for entry in ranking(ranks) {
                let label = graph.node(&entry.id).map(|n| n.display_label()).unwrap_or("");
                let out = adjacency.out_degree.get(&entry.id).copied().unwrap_or(0);
                table.add_row(vec![
                    entry.position.to_string(),
                    label.to_string(),
                    format!("{:.4}", entry.value),
                    out.to_string(),
                    (if adjacency.is_dangling(&entry.id) { "yes" } else { "" }).to_string(),
                ]);
            }

            println!("{}", table);
            println!(
                "state: {}  iteration: {}  delta: {:.2e}  sum: {:.4}",
                session.state(),
                session.iteration(),
                session.delta(),
                rankwalk::rank_sum(ranks)
            );
        }
    }
    Ok(())
}

fn print_record(record: &RankRecord, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(record)?),
        _ => {
            let values: Vec<String> = record
                .ranks
                .iter()
                .map(|(id, r)| format!("{}={:.4}", id, r))
                .collect();
            println!(
                "[{:>3}] delta {:.2e}  {}{}",
                record.iteration,
                record.delta,
                values.join(" "),
                if record.converged { "  (converged)" } else { "" }
            );
        }
    }
    Ok(())
}

fn run_rank(mut session: RankSession, format: &OutputFormat) -> Result<()> {
    session.run_to_convergence();
    let ranks = session.ranks().clone();
    print_ranks(&session, &ranks, format)
}

fn run_step(mut session: RankSession, count: usize, format: &OutputFormat) -> Result<()> {
    for _ in 0..count {
        match session.step() {
            Some(record) => print_record(&record, format)?,
            None => break,
        }
    }
    if !matches!(format, OutputFormat::Json) {
        println!("state: {}", session.state());
    }
    Ok(())
}

async fn run_animate(session: RankSession, format: &OutputFormat) -> Result<()> {
    print_record(session.current(), format)?;

    let session = Arc::new(Mutex::new(session));
    if !session.lock().await.start() {
        println!("Nothing to animate (state: {})", session.lock().await.state());
        return Ok(());
    }

    let (driver, mut updates) = AutoAdvance::spawn(Arc::clone(&session));

    loop {
        tokio::select! {
            record = updates.recv() => match record {
                Some(record) => print_record(&record, format)?,
                // Task ended and dropped its sender
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                driver.stop().await;
                // Drain what was produced before the stop
                while let Ok(record) = updates.try_recv() {
                    print_record(&record, format)?;
                }
                break;
            }
        }
    }

    let session = session.lock().await;
    if !matches!(format, OutputFormat::Json) {
        println!("state: {}", session.state());
    }
    Ok(())
}

fn run_matrix(session: &RankSession, decimals: usize, format: &OutputFormat) -> Result<()> {
    let Some(set) = session.matrices() else {
        bail!(
            "matrix too large to display (max {} nodes)",
            session.config().matrix_display_cap
        );
    };

    let names: Vec<String> = set.ids.iter().map(|id| id.to_string()).collect();
    let matrices = [("H", &set.h), ("H'", &set.h_prime), ("G", &set.g)];

    match format {
        OutputFormat::Json => {
            let mut doc = serde_json::Map::new();
            doc.insert("ids".to_string(), serde_json::json!(names));
            for (name, m) in matrices {
                let rows: Vec<Vec<f64>> = m.rows().into_iter().map(|r| r.to_vec()).collect();
                doc.insert(name.to_string(), serde_json::json!(rows));
            }
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        _ => {
            for (name, m) in matrices {
                let mut table = Table::new();
                let mut header = vec![name.to_string()];
                header.extend(names.iter().cloned());
                table.set_header(header);
                for (row_name, row) in names.iter().zip(m.rows()) {
                    let mut cells = vec![row_name.clone()];
                    cells.extend(row.iter().map(|&v| format_value(v, decimals)));
                    table.add_row(cells);
                }
                println!("{}", table);
            }
            println!("alpha: {}", session.config().alpha);
        }
    }
    Ok(())
}

fn run_compare(mut session: RankSession, format: &OutputFormat) -> Result<()> {
    session.run_to_convergence();

    let page_rank = session.centrality(CentralityMode::PageRank);
    let in_degree = session.centrality(CentralityMode::InDegree);
    let eigenvector = session.centrality(CentralityMode::Eigenvector);

    match format {
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "pagerank": ranking(page_rank),
                "indegree": ranking(in_degree),
                "eigenvector": ranking(eigenvector),
                "differ": rankings_differ(page_rank, in_degree, eigenvector),
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        _ => {
            let columns: Vec<_> = CentralityMode::ALL
                .iter()
                .map(|&mode| ranking(session.centrality(mode)))
                .collect();

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            let mut header = vec!["#".to_string()];
            header.extend(CentralityMode::ALL.iter().map(|m| m.title().to_string()));
            table.set_header(header);

            for position in 0..session.ranks().len() {
                let mut row = vec![(position + 1).to_string()];
                for column in &columns {
                    let entry = &column[position];
                    row.push(format!("{} ({:.3})", entry.id, entry.value));
                }
                table.add_row(row);
            }

            println!("{}", table);
            if rankings_differ(page_rank, in_degree, eigenvector) {
                println!("The measures disagree on the ordering.");
            } else {
                println!("All three measures agree on the ordering.");
            }
        }
    }
    Ok(())
}

fn run_presets(format: &OutputFormat) -> Result<()> {
    let presets = preset::all();

    match format {
        OutputFormat::Json => {
            let doc: Vec<_> = presets
                .iter()
                .map(|p| {
                    serde_json::json!({
                        "name": p.name,
                        "description": p.description,
                        "graph": p.graph,
                        "expected_ranks": p.expected_ranks,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        _ => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Name", "Nodes", "Edges", "Description"]);
            for p in &presets {
                table.add_row(vec![
                    p.name.to_string(),
                    p.graph.node_count().to_string(),
                    p.graph.edge_count().to_string(),
                    p.description.to_string(),
                ]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}
