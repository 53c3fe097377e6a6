/*
    This module is for storing and classifying grammars
*/

mod definition;

use std::collections::{HashMap, HashSet};
use std::fmt::Display;

pub use definition::GrammarDefinition;

// How the grammar classifies a symbol label
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SymbolKind {
    Terminal,
    Nonterminal,
    // In neither set, so any branch reaching it fails
    Unrecognized,
}

// A single rewrite rule, keeping the body text exactly as it was declared
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Production {
    pub lhs: String,
    pub rhs: Vec<String>,
    pub body: String,
}

impl Production {
    pub fn new(lhs: impl Into<String>, body: impl Into<String>) -> Self {
        let body = body.into();
        let rhs = body.split_whitespace().map(str::to_string).collect();

        Production {
            lhs: lhs.into(),
            rhs,
            body,
        }
    }

    // The right hand side with its symbols separated by single spaces
    pub fn rhs_text(&self) -> String {
        self.rhs.join(" ")
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.lhs, self.rhs_text())
    }
}

// The alternatives of one nonterminal, in declaration order
pub type Rewrite = Vec<Production>;

/// A context-free grammar.
///
/// Nothing is validated when a grammar is built. A start symbol that was never
/// declared, or a body that mentions a symbol in neither set, is only noticed
/// when a search reaches it (and by [`crate::parser::verifier::lint`]).
#[derive(Debug, PartialEq, Clone)]
pub struct Grammar {
    terminals: Vec<String>,
    nonterminals: Vec<String>,
    start_symbol: String,
    rules: Vec<(String, Rewrite)>,
    terminal_set: HashSet<String>,
    nonterminal_set: HashSet<String>,
    rule_index: HashMap<String, usize>,
}

impl Grammar {
    /// Builds a grammar from raw production bodies. Each body is split on
    /// whitespace into symbols. A left hand side listed twice keeps its first
    /// position and gets the later bodies appended.
    pub fn new<B>(
        terminals: Vec<String>,
        nonterminals: Vec<String>,
        start_symbol: impl Into<String>,
        productions: impl IntoIterator<Item = (String, B)>,
    ) -> Self
    where
        B: IntoIterator<Item = String>,
    {
        let mut rules: Vec<(String, Rewrite)> = Vec::new();
        let mut rule_index = HashMap::new();

        for (lhs, bodies) in productions {
            let position = *rule_index.entry(lhs.clone()).or_insert_with(|| {
                rules.push((lhs.clone(), Vec::new()));
                rules.len() - 1
            });
            rules[position]
                .1
                .extend(bodies.into_iter().map(|body| Production::new(lhs.clone(), body)));
        }

        Grammar {
            terminal_set: terminals.iter().cloned().collect(),
            nonterminal_set: nonterminals.iter().cloned().collect(),
            terminals,
            nonterminals,
            start_symbol: start_symbol.into(),
            rules,
            rule_index,
        }
    }

    pub fn start_symbol(&self) -> &str {
        &self.start_symbol
    }

    pub fn terminals(&self) -> &[String] {
        &self.terminals
    }

    pub fn nonterminals(&self) -> &[String] {
        &self.nonterminals
    }

    // Terminals are checked first, so a label in both sets is a terminal
    pub fn classify(&self, label: &str) -> SymbolKind {
        if self.terminal_set.contains(label) {
            SymbolKind::Terminal
        } else if self.nonterminal_set.contains(label) {
            SymbolKind::Nonterminal
        } else {
            SymbolKind::Unrecognized
        }
    }

    pub fn is_terminal(&self, label: &str) -> bool {
        self.classify(label) == SymbolKind::Terminal
    }

    pub fn is_nonterminal(&self, label: &str) -> bool {
        self.classify(label) == SymbolKind::Nonterminal
    }

    /// The alternatives for `nonterminal` in declaration order. A nonterminal
    /// without an entry simply has no alternatives.
    pub fn productions_for(&self, nonterminal: &str) -> &[Production] {
        match self.rule_index.get(nonterminal) {
            Some(&position) => &self.rules[position].1,
            None => &[],
        }
    }

    /// The left hand sides that have a production entry, in declaration order.
    pub fn rule_symbols(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(lhs, _)| lhs.as_str())
    }

    /// Every production of the grammar, grouped by left hand side.
    pub fn productions(&self) -> impl Iterator<Item = &Production> {
        self.rules.iter().flat_map(|(_, rewrite)| rewrite.iter())
    }

    pub fn definition(&self) -> GrammarDefinition {
        GrammarDefinition {
            terminals: self.terminals.clone(),
            non_terminals: self.nonterminals.clone(),
            start_symbol: self.start_symbol.clone(),
            productions: self
                .rules
                .iter()
                .map(|(lhs, rewrite)| {
                    (lhs.clone(), rewrite.iter().map(|p| p.body.clone()).collect())
                })
                .collect(),
        }
    }
}

impl From<GrammarDefinition> for Grammar {
    fn from(definition: GrammarDefinition) -> Self {
        Grammar::new(
            definition.terminals,
            definition.non_terminals,
            definition.start_symbol,
            definition.productions,
        )
    }
}
