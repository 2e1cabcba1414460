//! CLI argument definitions using clap
//!
//! Commands:
//! - querykit query [--data <file>] [--config <file>]   (spec on stdin)
//! - querykit count [--data <file>] [--config <file>]   (filters on stdin)
//! - querykit get --id <id> [--data <file>] [--config <file>]
//! - querykit mock [--count <n>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// querykit - filter, sort and paginate JSON collections
#[derive(Parser, Debug)]
#[command(name = "querykit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where the collection comes from and how it is queried
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// JSON file holding an array of objects; mock users when omitted
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of mock users to generate when --data is omitted
    #[arg(long, default_value_t = 100)]
    pub mock_count: usize,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute a query spec read from stdin
    Query {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Count items matching a filter array read from stdin
    Count {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Look up one item by id
    Get {
        #[command(flatten)]
        source: SourceArgs,

        /// Id to look up
        #[arg(long)]
        id: String,
    },

    /// Print a generated mock user collection
    Mock {
        /// Number of users
        #[arg(long, default_value_t = 25)]
        count: usize,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
