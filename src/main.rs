mod cli;

use std::path::Path;

use anyhow::{anyhow, bail};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;

use cfgtrace::parser::{self, verifier};
use cfgtrace::{generator, logging, render, Grammar, SearchLimits, Session};
use cli::{Cli, Command, Format};

fn read(path: &Path) -> anyhow::Result<Grammar> {
    parser::load_file(path).map_err(|errors| {
        for error in &errors {
            eprintln!("{}", error);
        }
        anyhow!("could not load a grammar from {}", path.display())
    })
}

// Reads a grammar and logs its lints
fn load(path: &Path) -> anyhow::Result<Grammar> {
    let grammar = read(path)?;

    for lint in verifier::lint(&grammar) {
        warn!(%lint, "grammar lint");
    }

    Ok(grammar)
}

fn check(path: &Path, words: &[String], limits: SearchLimits, format: Format) -> anyhow::Result<()> {
    let mut session = Session::new(limits);
    session.set_grammar(load(path)?);

    let mut failures = 0;
    for word in words {
        match session.check_word(word) {
            Ok(report) => match format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                Format::Text => println!("{}\n", report),
            },
            Err(e) => {
                eprintln!("{:?}: {}", word, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} words could not be checked", failures, words.len());
    }
    Ok(())
}

fn sample(path: &Path, amount: u32, seed: Option<u64>, max_depth: usize) -> anyhow::Result<()> {
    let grammar = load(path)?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for _ in 0..amount {
        match generator::generate(&grammar, &mut rng, max_depth) {
            Ok(word) => println!("{}", word),
            Err(e) => eprintln!("{}", e),
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose)?;

    match cli.command {
        Command::Grammar { file } => {
            let acknowledgement = Session::default().set_grammar(load(&file)?);
            println!("{}", serde_json::to_string_pretty(&acknowledgement)?);
        }
        Command::Check { file, words, max_steps, format } => {
            check(&file, &words, SearchLimits { max_steps }, format)?;
        }
        Command::Graph { file } => println!("{}", render::general(&load(&file)?)),
        Command::Sample { file, amount, seed, max_depth } => sample(&file, amount, seed, max_depth)?,
        Command::Lint { file } => {
            let lints = verifier::lint(&read(&file)?);
            if lints.is_empty() {
                println!("No problems found");
            }
            for lint in lints {
                println!("{}", lint);
            }
        }
    }

    Ok(())
}
