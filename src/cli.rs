use std::path::PathBuf;

use clap::{ArgAction, Parser};

use cyk::generator::DEFAULT_MAX_DEPTH;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar
    pub file: PathBuf,

    /// Words to test for membership
    pub words: Vec<String>,

    /// Start symbol (default: the one declared in the file)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<char>,

    /// Print the derivation table of every word
    #[arg(short, long)]
    pub table: bool,

    /// Print the productions of the grammar
    #[arg(short, long)]
    pub grammar: bool,

    /// Amount of random words to generate
    #[arg(short = 'n', long, value_name = "AMOUNT")]
    pub generate: Option<u32>,

    /// Depth after which generated words are kept short
    #[arg(long, value_name = "DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Seed for word generation (default: random)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Log more, repeat for even more
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
