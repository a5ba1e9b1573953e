/// Main entry point for the Journal MCP server
///
/// This file sets up logging, parses command line arguments, and starts the MCP server.
/// The server listens for JSON-RPC requests over stdin/stdout following the MCP protocol.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use journal_mcp::config::{log_filter, Config, DATABASE_ENV};
use journal_mcp::JournalApp;

/// Command line arguments for the Journal MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long, env = DATABASE_ENV)]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // RUST_LOG wins over the command line flags when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter(args.debug, args.verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr) // Send logs to stderr, not stdout
        .init();

    info!("Starting Journal MCP server");
    let config = Config::resolve(args.database)?;
    info!("Using database at: {}", config.database_path.display());

    let app = JournalApp::open(config.database_path).await?;

    // Run the MCP server - this will handle JSON-RPC communication over stdin/stdout
    app.run().await?;

    info!("Journal MCP server shutdown complete");
    Ok(())
}
