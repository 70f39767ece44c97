//! # docshelf CLI (`dsh`)
//!
//! The `dsh` binary is the terminal front-end for a document search and
//! AI chat backend. It lists indexed documents, filters them, opens a
//! detail view, chats with the assistant, and uploads new files.
//!
//! ## Usage
//!
//! ```bash
//! dsh --config ./config/dsh.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `dsh docs` | List the latest indexed documents |
//! | `dsh search "<query>"` | Filter documents by title/vendor substring |
//! | `dsh chat [message]` | Chat with the assistant (consumes a queued query first) |
//! | `dsh show <id>` | Open the detail view for one document |
//! | `dsh upload <file>` | Push a file to the backend indexer |
//! | `dsh ping` | Backend health check |
//!
//! ## Examples
//!
//! ```bash
//! # List the five newest documents
//! dsh docs
//!
//! # Search the cached snapshot; a miss queues the query for the assistant
//! dsh search "openshift"
//!
//! # Ask the assistant directly
//! dsh chat "how do I rotate the ingress certificates?"
//!
//! # Open one document's detail view
//! dsh show 2
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use docshelf::{api, chat, config, drawer, search, store, upload};

/// docshelf CLI — a terminal client for a document search and AI chat
/// service.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file; when the file is missing, built-in defaults are used.
#[derive(Parser)]
#[command(
    name = "dsh",
    about = "docshelf — a terminal client for a document search and AI chat service",
    version,
    long_about = "docshelf renders document listings, a detail view, and a chat transcript, \
    and delegates search, storage, and AI inference to a backend reached over plain HTTP. \
    Chat answers grounded in retrieved documents come back with a reference card."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/dsh.toml`. Backend address, UI limits, and the
    /// handoff file location are read from this file; a missing file falls
    /// back to built-in defaults.
    #[arg(long, global = true, default_value = "./config/dsh.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// List the latest indexed documents.
    ///
    /// Fetches the full collection, caches it as the current snapshot
    /// (sorted newest first), and prints the top entries. A failed fetch
    /// keeps the previous (possibly empty) snapshot and prints a warning.
    Docs {
        /// Maximum number of documents to show.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Search indexed documents by title or vendor.
    ///
    /// Case-insensitive substring match over the snapshot, in snapshot
    /// order. When nothing matches, the exact query is queued for the
    /// assistant and `dsh chat` will submit it on its next run.
    Search {
        /// The search query string (must be non-empty).
        query: String,
    },

    /// Chat with the assistant.
    ///
    /// Consumes a queued search query first (at most once per queue write),
    /// then sends the message argument if given. With no message and an
    /// interactive terminal, reads further messages line by line.
    Chat {
        /// Message to send. Omit to go straight to interactive mode.
        message: Option<String>,
    },

    /// Open the detail view for one document.
    ///
    /// Prints the document's metadata, its summary (or a placeholder when
    /// the backend has not summarized it yet), and its key points.
    Show {
        /// Document id, as printed by `dsh docs` and `dsh search`.
        id: String,
    },

    /// Upload a file to the backend indexer.
    ///
    /// The backend stores the file, generates a one-line summary, and adds
    /// it to the search index.
    Upload {
        /// Path to the file to upload.
        file: PathBuf,
    },

    /// Check that the backend is reachable.
    Ping,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A missing config file is fine; a present-but-broken one is not.
    let cfg = if cli.config.exists() {
        config::load_config(&cli.config)?
    } else {
        config::Config::minimal()
    };

    match cli.command {
        Commands::Docs { limit } => {
            store::run_docs(&cfg, limit).await?;
        }
        Commands::Search { query } => {
            search::run_search(&cfg, &query).await?;
        }
        Commands::Chat { message } => {
            chat::run_chat(&cfg, message).await?;
        }
        Commands::Show { id } => {
            drawer::run_show(&cfg, &id).await?;
        }
        Commands::Upload { file } => {
            upload::run_upload(&cfg, &file).await?;
        }
        Commands::Ping => {
            api::run_ping(&cfg).await?;
        }
    }

    Ok(())
}
