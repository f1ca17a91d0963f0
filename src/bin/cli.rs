//! flatkv CLI
//!
//! Command-line interface for a flatkv store directory.

use std::io::{self, Write};
use std::process;

use chrono::{DateTime, Local, Utc};
use clap::{Parser, Subcommand};
use flatkv::{Config, Store, WriteMode};
use tracing_subscriber::{fmt, EnvFilter};

/// Display format for entry timestamps
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// flatkv CLI
#[derive(Parser, Debug)]
#[command(name = "flatkv")]
#[command(about = "File-per-key key-value store")]
#[command(version)]
struct Args {
    /// Storage root directory
    #[arg(short, long, env = "FLATKV_DIR", default_value = ".")]
    dir: String,

    /// Replace entry files atomically (temp file + rename)
    #[arg(long)]
    atomic: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get the value for a key
    Get {
        /// The key to get
        key: String,
    },

    /// Set the value for a key, creating it if needed
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },

    /// Get the created and last-modified timestamps for a key
    Ts {
        /// The key to inspect
        key: String,
    },
}

fn main() {
    // Initialize tracing/logging (stderr, so stdout stays clean)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("flatkv v{}", flatkv::VERSION);
    tracing::debug!("Storage root: {}", args.dir);

    let write_mode = if args.atomic {
        WriteMode::Atomic
    } else {
        WriteMode::InPlace
    };

    let config = Config::builder()
        .root_dir(&args.dir)
        .write_mode(write_mode)
        .build();

    let store = match Store::open(config) {
        Ok(store) => store,
        Err(e) => {
            tracing::debug!("Failed to open store: {:?}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let mut stdout = io::stdout().lock();
    if let Err(e) = run(&store, args.command, &mut stdout) {
        tracing::debug!("Command failed: {:?}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute one command against the store, writing its report to `out`
fn run(store: &Store, command: Commands, out: &mut impl Write) -> flatkv::Result<()> {
    match command {
        Commands::Get { key } => {
            let value = store.get(&key)?;
            writeln!(out, "Key {}: {}", key, value)?;
        }
        Commands::Set { key, value } => {
            store.set(&key, &value, Utc::now())?;
            writeln!(out, "Set {} <= {}", key, value)?;
        }
        Commands::Del { key } => {
            store.delete(&key)?;
            writeln!(out, "Deleted {}", key)?;
        }
        Commands::Ts { key } => {
            let (first, last) = store.timestamps(&key)?;
            writeln!(out, "Key {}:", key)?;
            writeln!(out, "  First set on {}", format_time(first))?;
            writeln!(out, "  Last set on  {}", format_time(last))?;
        }
    }

    Ok(())
}

fn format_time(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format(TIME_FORMAT).to_string()
}
