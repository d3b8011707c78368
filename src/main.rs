mod cli;

use std::process::ExitCode;

use clap::Parser;
use itertools::Itertools;
use log::debug;
use rand::prelude::*;

use cli::Cli;
use cyk::grammar::Grammar;
use cyk::{engine, generator, parser};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn display_word(word: &str) -> &str {
    if word.is_empty() { "ε" } else { word }
}

fn query(grammar: &Grammar, word: &str, show_table: bool) -> Result<String, String> {
    debug!("Checking `{}`", word);
    let (derived, table) = engine::membership(grammar, word).map_err(|e| e.to_string())?;

    let mut output = format!("{}: {}\n", display_word(word), if derived { "derived" } else { "not derived" });
    if show_table {
        output.push_str(&table.to_string());
    }
    Ok(output)
}

fn run(cli: &Cli) -> Result<(), String> {
    let mut grammar = parser::parse_file(&cli.file).map_err(|errors| errors.iter().join("\n"))?;

    if let Some(start) = cli.start {
        grammar.set_start_symbol(start).map_err(|e| e.to_string())?;
    }

    if cli.grammar {
        println!("{}", grammar.get_grammar());
    }

    let mut failures = Vec::new();
    for word in &cli.words {
        match query(&grammar, word, cli.table) {
            Ok(output) => print!("{}", output),
            Err(e) => failures.push(format!("{}: {}", display_word(word), e)),
        }
    }

    if let Some(amount) = cli.generate {
        let mut rng: Box<dyn RngCore> = match cli.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(thread_rng()),
        };
        for _ in 0..amount {
            let word = generator::generate(&grammar, rng.as_mut(), cli.max_depth).map_err(|e| e.to_string())?;
            println!("{}", word);
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures.join("\n"))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}
