use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Log more (-v info, -vv debug, -vvv every search step)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load a grammar and echo back what was stored
    Grammar {
        /// Grammar file (`.json` definition or BNF-style text)
        file: PathBuf,
    },

    /// Check whether words belong to the grammar's language
    Check {
        /// Grammar file (`.json` definition or BNF-style text)
        file: PathBuf,

        /// Words to check
        #[arg(required = true)]
        words: Vec<String>,

        /// Give up on a word after this many search steps (default: never)
        #[arg(long, value_name = "STEPS", env = "CFGTRACE_MAX_STEPS")]
        max_steps: Option<u64>,

        /// How to print each report
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Print every production as a graph
    Graph {
        /// Grammar file (`.json` definition or BNF-style text)
        file: PathBuf,
    },

    /// Generate random words of the grammar's language
    Sample {
        /// Grammar file (`.json` definition or BNF-style text)
        file: PathBuf,

        /// Amount to generate
        #[arg(short = 'n', long, value_name = "AMOUNT", default_value_t = 1)]
        amount: u32,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Nested expansions allowed before a sample is abandoned
        #[arg(long, value_name = "DEPTH", default_value_t = 32)]
        max_depth: usize,
    },

    /// Report suspicious parts of a grammar
    Lint {
        /// Grammar file (`.json` definition or BNF-style text)
        file: PathBuf,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Text,
}
