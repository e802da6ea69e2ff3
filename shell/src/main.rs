use anyhow::Result;
use clap::{Parser, Subcommand};
use searchcore::{DocStore, SearchEngine};
use shell::{print_results, run_repl};
use std::io::{self, Write};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "shell")]
#[command(about = "Add documents to a text database and search them by tf-idf", long_about = None)]
struct Cli {
    /// Database directory holding one .txt file per document
    #[arg(long, default_value = "./db")]
    db: String,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive ADD/GET/SELECT/EXIT loop (the default)
    Repl,
    /// Rank documents for a single term
    Search {
        /// Query text; must reduce to one word
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Store and index a new document
    Add {
        /// Document id, e.g. notes.txt
        doc_id: String,
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// List stored documents
    List,
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    let store = DocStore::open(&cli.db)?;
    tracing::info!(db = %store.root().display(), "opening database");
    let engine = SearchEngine::open(store)?;
    let mut out = io::stdout().lock();

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => run_repl(&engine, io::stdin().lock(), &mut out),
        Commands::Search { query } => {
            let results = engine.search_text(&query.join(" "))?;
            print_results(&mut out, &results)
        }
        Commands::Add { doc_id, text } => {
            let doc_id = doc_id.to_lowercase();
            engine.add_document(&doc_id, &text.join(" "))?;
            writeln!(out, "Added {doc_id}.")?;
            Ok(())
        }
        Commands::List => {
            for id in engine.store().list()? {
                writeln!(out, "{id}")?;
            }
            Ok(())
        }
    }
}
