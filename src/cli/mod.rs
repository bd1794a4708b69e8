//! Command-line interface for vv-state.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **classify**: Normalize variant descriptions and report their reference source and type
//! - **db-check**: Open the connection pool, ping the primary connection, and close it
//!
//! ## Usage
//!
//! ```text
//! # Classify a description
//! vv-state classify "NM_000088.3(COL1A1):c.589G>T"
//!
//! # Read descriptions from stdin, JSON output
//! cat variants.txt | vv-state classify - --format json
//!
//! # Check database connectivity (settings also read from VV_DB_* variables)
//! vv-state db-check --host localhost --user vvadmin --database validator
//! ```

use clap::{Parser, Subcommand};

pub mod classify;
pub mod db_check;

#[derive(Parser)]
#[command(name = "vv-state")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Classify variant descriptions and check validator database connectivity")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize and classify variant descriptions
    Classify(classify::ClassifyArgs),

    /// Check that the validator database is reachable
    DbCheck(db_check::DbCheckArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
