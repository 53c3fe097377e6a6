/*
    This module holds the grammar currently in force and answers word checks
    against it
*/

use std::fmt::Display;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::grammar::{Grammar, GrammarDefinition};
use crate::render;
use crate::search::{SearchError, SearchLimits, Searcher};

#[derive(Debug, Error, PartialEq)]
pub enum CheckError {
    #[error("No grammar has been set; set one before checking words")]
    NoGrammar,
    #[error(transparent)]
    Search(#[from] SearchError),
}

// Returned when a grammar is stored, echoing what was stored
#[derive(Debug, Serialize, PartialEq)]
pub struct Acknowledgement {
    pub message: String,
    pub grammar: GrammarDefinition,
}

#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct CheckReport {
    pub word: String,
    pub belongs: bool,
    pub derivation_tree_particular: String,
    pub derivation_tree_general: String,
    // The full tree, only present when the word belongs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derivation_tree: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unrecognized_symbols: Vec<String>,
}

impl Display for CheckReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verdict = if self.belongs { "belongs" } else { "does not belong" };
        writeln!(f, "{:?} {}", self.word, verdict)?;
        for symbol in &self.unrecognized_symbols {
            writeln!(f, "unrecognized symbol: {}", symbol)?;
        }
        writeln!(f, "{}", self.derivation_tree_particular)?;
        write!(f, "{}", self.derivation_tree_general)?;
        if let Some(tree) = &self.derivation_tree {
            write!(f, "\n{}", tree)?;
        }
        Ok(())
    }
}

/// The grammar in force plus the limits every check runs under. Setting a
/// grammar replaces the old one; each check works on its own trace, so
/// nothing from one check is visible to the next.
#[derive(Debug, Default)]
pub struct Session {
    grammar: Option<Grammar>,
    limits: SearchLimits,
}

impl Session {
    pub fn new(limits: SearchLimits) -> Self {
        Session { grammar: None, limits }
    }

    pub fn grammar(&self) -> Option<&Grammar> {
        self.grammar.as_ref()
    }

    pub fn set_grammar(&mut self, grammar: Grammar) -> Acknowledgement {
        info!(
            start = grammar.start_symbol(),
            productions = grammar.productions().count(),
            replaced = self.grammar.is_some(),
            "grammar set"
        );

        let acknowledgement = Acknowledgement {
            message: "Grammar stored".to_string(),
            grammar: grammar.definition(),
        };
        self.grammar = Some(grammar);
        acknowledgement
    }

    pub fn check_word(&self, word: &str) -> Result<CheckReport, CheckError> {
        let grammar = self.grammar.as_ref().ok_or(CheckError::NoGrammar)?;
        let outcome = Searcher::new(grammar).with_limits(self.limits).run(word)?;

        if !outcome.unrecognized.is_empty() {
            warn!(word, symbols = ?outcome.unrecognized, "search hit unrecognized symbols");
        }
        info!(word, belongs = outcome.belongs, steps = outcome.steps, "word checked");

        let derivation_tree = if outcome.belongs {
            outcome.trace.tree(grammar).map(|tree| render::tree(&tree))
        } else {
            None
        };

        Ok(CheckReport {
            word: word.to_string(),
            belongs: outcome.belongs,
            derivation_tree_particular: render::particular(grammar, &outcome.trace),
            derivation_tree_general: render::general(grammar),
            derivation_tree,
            unrecognized_symbols: outcome.unrecognized,
        })
    }
}
