//! model-align CLI: path indexing and subgraph matching for semantic models.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use model_align::config::AlignConfig;
use model_align::error::MatchError;
use model_align::load::ServiceDocument;
use model_align::registry::ServiceModel;

#[derive(Parser)]
#[command(name = "model-align", version, about = "Semantic model alignment")]
struct Cli {
    /// TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index shortest paths between attribute pairs.
    Paths {
        /// Service document (JSON).
        #[arg(long)]
        file: PathBuf,
    },

    /// Match subgraphs between the two models of a service.
    Match {
        /// Service document (JSON).
        #[arg(long)]
        file: PathBuf,
    },

    /// Index paths, match subgraphs when possible, and print the full report.
    Report {
        /// Service document (JSON).
        #[arg(long)]
        file: PathBuf,
    },
}

fn load_service(file: &Path, config: AlignConfig) -> Result<ServiceModel> {
    let doc = ServiceDocument::from_path(file)?;
    Ok(doc.into_service_model(config)?)
}

/// Run matching; a model count other than two is reported, not fatal.
fn run_matching(service: &mut ServiceModel) -> Result<()> {
    match service.compute_matched_subgraphs() {
        Ok(_) => Ok(()),
        Err(MatchError::UnsupportedMatchCardinality { count }) => {
            eprintln!("note: matching skipped, service has {count} model(s)");
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AlignConfig::load(path)?,
        None => AlignConfig::default(),
    };

    match cli.command {
        Commands::Paths { file } => {
            let mut service = load_service(&file, config)?;
            service.compute_shortest_paths();
            let report = service.report();

            if cli.json {
                let json = serde_json::to_string_pretty(&report.paths).into_diagnostic()?;
                println!("{json}");
            } else {
                println!("{report}");
            }
        }

        Commands::Match { file } => {
            let mut service = load_service(&file, config)?;
            service.compute_matched_subgraphs()?;
            let report = service.report();

            if cli.json {
                let json = serde_json::to_string_pretty(&report.matches).into_diagnostic()?;
                println!("{json}");
            } else if report.matches.is_empty() {
                println!("No matched subgraphs.");
            } else {
                println!("Matched subgraphs ({}):", report.matches.len());
                for m in &report.matches {
                    println!("  pair {}:", m.index);
                    for (left, right) in &m.node_pairs {
                        println!("    {left} <-> {right}");
                    }
                }
            }
        }

        Commands::Report { file } => {
            let mut service = load_service(&file, config)?;
            service.compute_shortest_paths();
            run_matching(&mut service)?;
            let report = service.report();

            if cli.json {
                let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
                println!("{json}");
            } else {
                println!("{report}");
            }
        }
    }

    Ok(())
}
