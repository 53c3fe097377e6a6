/*
    This module generates words that belong to a grammar
*/

use rand::prelude::*;
use thiserror::Error;
use tracing::trace;

use crate::grammar::*;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum GenerateError {
    // A nonterminal with no alternatives was reached
    #[error("No productions for nonterminal `{0}`")]
    UndefinedNonterminal(String),
    // A body symbol in neither set was reached
    #[error("`{0}` is neither a terminal nor a nonterminal")]
    UnrecognizedSymbol(String),
    // Expansions nested deeper than allowed
    #[error("Derivation nested more expansions than allowed")]
    TooDeep,
}

pub type GenResult = Result<String, GenerateError>;

/// Generates a word by expanding the start symbol with randomly chosen
/// alternatives. Every generated word belongs to the grammar's language.
/// Grammars that can recurse forever are cut off after `max_depth` nested
/// expansions, which is reported as [`GenerateError::TooDeep`].
pub fn generate(grammar: &Grammar, rng: &mut impl Rng, max_depth: usize) -> GenResult {
    generate_symbol(grammar.start_symbol(), grammar, rng, max_depth)
}

fn generate_nonterminal(nonterminal: &str, grammar: &Grammar, rng: &mut impl Rng, depth: usize) -> GenResult {
    let production = grammar
        .productions_for(nonterminal)
        .choose(rng)
        .ok_or_else(|| GenerateError::UndefinedNonterminal(nonterminal.to_string()))?;
    trace!(%production, depth, "expanding");

    let mut result = String::new();
    for symbol in &production.rhs {
        result.push_str(&generate_symbol(symbol, grammar, rng, depth)?);
    }

    Ok(result)
}

fn generate_symbol(symbol: &str, grammar: &Grammar, rng: &mut impl Rng, depth: usize) -> GenResult {
    match grammar.classify(symbol) {
        SymbolKind::Terminal => Ok(symbol.to_string()),
        SymbolKind::Nonterminal => match depth.checked_sub(1) {
            Some(depth) => generate_nonterminal(symbol, grammar, rng, depth),
            None => Err(GenerateError::TooDeep),
        },
        SymbolKind::Unrecognized => Err(GenerateError::UnrecognizedSymbol(symbol.to_string())),
    }
}
