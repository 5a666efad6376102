//! Sieve CLI
//!
//! Runs selector queries against JSON documents.
//!
//! Logging goes to stderr; set `SIEVE_LOG` (e.g. `SIEVE_LOG=debug`) to see
//! cache and matcher diagnostics.

mod output;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use sieve_dom::{DomTree, NodeId};
use sieve_select::{
    AnchorMode, Context, Engine, MemoryCache, QueryOptions, SiblingResult, parse_with_diagnostics,
    unique,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Sieve: query labeled trees with a compact selector language
#[derive(Parser, Debug)]
#[command(name = "sieve")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Every link inside the nav element
    sieve query page.json 'nav a'

    # External links, as JSON
    sieve query page.json 'a[href^=https]' --json

    # Query inside the element matched by another selector
    sieve query page.json 'li' --context '#menu'

    # Read the document from stdin
    cat page.json | sieve query - 'p.note'

    # Show how a selector is parsed
    sieve parse 'div#main > p.a, ###bad'

    # Print the document outline
    sieve tree page.json
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the nodes matching a selector
    Query {
        /// JSON document to load ("-" for stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Selector list to evaluate
        #[arg(value_name = "SELECTOR")]
        selector: String,

        /// Start from the first match of this selector instead of the root
        #[arg(long, value_name = "SELECTOR")]
        context: Option<String>,

        /// Evaluate combinators against every left-hand match, not only the first
        #[arg(long)]
        every_anchor: bool,

        /// Which side of `~` is reported
        #[arg(long, value_name = "SIDE", default_value = "anchor")]
        sibling_result: SiblingResult,

        /// Drop repeated nodes from the result
        #[arg(long)]
        unique: bool,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the parsed form of a selector list
    Parse {
        /// Selector list to parse
        #[arg(value_name = "SELECTOR")]
        selector: String,

        /// Print the AST as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the outline of a document
    Tree {
        /// JSON document to load ("-" for stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Query {
            file,
            selector,
            context,
            every_anchor,
            sibling_result,
            unique: dedupe,
            json,
        } => {
            let tree = load_tree(&file)?;
            let options = QueryOptions {
                anchor_mode: if every_anchor {
                    AnchorMode::Every
                } else {
                    AnchorMode::First
                },
                sibling_result,
            };
            let cache = MemoryCache::new();
            let engine = Engine::new(&tree).with_cache(&cache).with_options(options);

            let context = context.as_deref().map_or(Context::Root, Context::Selector);
            let mut matches = engine.query(&selector, context);
            if dedupe {
                matches = unique(&matches);
            }
            debug!(?options, stats = ?cache.stats(), "query done");

            if json {
                println!("{}", output::matches_json(&tree, &matches)?);
            } else {
                output::print_matches(&tree, &matches);
            }
        }

        Command::Parse { selector, json } => {
            let (list, rejected) = parse_with_diagnostics(&selector);
            if json {
                println!("{}", output::parse_json(&list, &rejected)?);
            } else {
                output::print_parse(&list, &rejected);
            }
        }

        Command::Tree { file } => {
            let tree = load_tree(&file)?;
            print!("{}", tree.outline(NodeId::ROOT));
        }
    }

    Ok(())
}

/// Install the stderr subscriber, filtered by `SIEVE_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("SIEVE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_tree(path: &Path) -> Result<DomTree> {
    let json = if path == Path::new("-") {
        let mut buffer = String::new();
        let _ = io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read document from stdin")?;
        buffer
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display()))?
    };
    DomTree::from_json(&json).with_context(|| format!("failed to load '{}'", path.display()))
}
