//! CLI binary: load family records and query ancestry and kinship.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kin_cli::commands;
use kin_cli::config::KinConfig;
use kin_cli::ingest::{self, Source};
use kin_core::model::PersonId;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(name = "kinship", about = "Query ancestry and kinship in a family graph")]
struct Cli {
    /// Project root holding `.kinship/config.toml` (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// JSON family file with `people` and `relationships`
    #[arg(long, global = true, conflicts_with_all = ["people", "relationships"])]
    family: Option<PathBuf>,

    /// People CSV (requires --relationships)
    #[arg(long, global = true, requires = "relationships")]
    people: Option<PathBuf>,

    /// Relationships CSV (requires --people)
    #[arg(long, global = true, requires = "people")]
    relationships: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show graph statistics
    Info,

    /// List everyone with a directed path to a person
    Ancestors { id: PersonId },

    /// List everyone reachable from a person
    Descendants { id: PersonId },

    /// Find the lowest common ancestor of two persons
    Lca { a: PersonId, b: PersonId },

    /// Show the path between two persons through their common ancestor
    Path { a: PersonId, b: PersonId },

    /// Describe how the first person is related to the second
    Relate { a: PersonId, b: PersonId },

    /// Show a person and all of their descendants
    Subtree { id: PersonId },

    /// Replay a sequence of selections and relate the final pair
    Select {
        #[arg(required = true)]
        ids: Vec<PersonId>,
    },

    /// Export the graph as DOT (Graphviz)
    Export {
        /// Only export this person's subtree
        #[arg(long)]
        root: Option<PersonId>,

        /// Highlight the path between two persons
        #[arg(long, num_args = 2, value_names = ["A", "B"])]
        highlight: Option<Vec<PersonId>>,
    },
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn get_source(cli: &Cli) -> Result<Source> {
    match (&cli.family, &cli.people, &cli.relationships) {
        (Some(family), _, _) => Ok(Source::Json(family.clone())),
        (None, Some(people), Some(relationships)) => Ok(Source::Csv {
            people: people.clone(),
            relationships: relationships.clone(),
        }),
        _ => anyhow::bail!("no input: pass --family <json> or --people <csv> --relationships <csv>"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;
    let config = KinConfig::load(&project_root)
        .with_context(|| format!("failed to load config under {}", project_root.display()))?;
    debug!(?config, "loaded config");

    let source = get_source(&cli)?;
    let graph = ingest::load_graph(&source, &config.ingest)?;
    let json = cli.json;

    let output = match cli.command {
        Commands::Info => commands::info(&graph, json),
        Commands::Ancestors { id } => commands::ancestors(&graph, id, json),
        Commands::Descendants { id } => commands::descendants(&graph, id, json),
        Commands::Lca { a, b } => commands::common_ancestor(&graph, a, b, json),
        Commands::Path { a, b } => commands::path(&graph, a, b, json),
        Commands::Relate { a, b } => commands::relationship(&graph, a, b, json),
        Commands::Subtree { id } => commands::subtree(&graph, id, json),
        Commands::Select { ids } => commands::select(&graph, &ids, &config, json),
        Commands::Export { root, highlight } => {
            let pair = highlight.as_deref().and_then(|h| match h {
                [a, b] => Some((*a, *b)),
                _ => None,
            });
            commands::export_dot(&graph, root, pair, &config)
        }
    }?;

    print!("{}", output);
    if json {
        println!();
    }
    Ok(())
}
