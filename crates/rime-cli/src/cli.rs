//! Command line definition for `rime`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rime_core::catalog::DEFAULT_POEMS_PER_BOOK;

/// Analyze poems as tracked background jobs.
#[derive(Debug, Parser)]
#[command(name = "rime", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file to use instead of ./rime.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve INPUT, analyze it and print the finished job as JSON.
    Analyze {
        /// Catalog label or poem text; `-` reads stdin.
        input: String,

        /// Seconds to wait for the job before giving up.
        #[arg(long, default_value_t = 30)]
        timeout: u64,
    },

    /// Print the text INPUT resolves to.
    Resolve {
        /// Catalog label or poem text; `-` reads stdin.
        input: String,
    },

    /// Write the bundled sample catalog as JSON.
    Catalog {
        /// Output file. Stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Poems kept per book.
        #[arg(long, default_value_t = DEFAULT_POEMS_PER_BOOK)]
        limit: usize,
    },
}
