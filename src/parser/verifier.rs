use std::collections::HashSet;

use itertools::Itertools;
use thiserror::Error;

use crate::grammar::{Grammar, Production, SymbolKind};

/// Something suspicious about a grammar. None of these stop a grammar from
/// being used; a search simply fails on the branches they affect.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum Lint {
    #[error("Start symbol `{0}` is not a declared nonterminal")]
    UndeclaredStart(String),
    #[error("`{symbol}` in `{production}` is neither a terminal nor a nonterminal")]
    UnrecognizedSymbol { production: String, symbol: String },
    #[error("Nonterminal `{0}` has no productions")]
    NoProductions(String),
    #[error("Productions given for `{0}`, which is not a declared nonterminal")]
    UndeclaredRule(String),
    #[error("`{0}` is declared as both a terminal and a nonterminal, and will be treated as a terminal")]
    DeclaredTwice(String),
    #[error("Terminal `{0}` is not a single character, so it can never match")]
    MultiCharacterTerminal(String),
}

fn get_production_unrecognized_symbols(production: &Production, grammar: &Grammar) -> Vec<Lint> {
    production.rhs.iter()
        .filter(|symbol| grammar.classify(symbol) == SymbolKind::Unrecognized)
        .unique()
        .map(|symbol| Lint::UnrecognizedSymbol {
            production: production.to_string(),
            symbol: symbol.to_owned(),
        })
        .collect()
}

fn get_unrecognized_symbols(grammar: &Grammar) -> Vec<Lint> {
    grammar.productions()
        .flat_map(|production| get_production_unrecognized_symbols(production, grammar))
        .collect()
}

fn get_empty_nonterminals(grammar: &Grammar) -> Vec<Lint> {
    grammar.nonterminals().iter()
        .filter(|symbol| grammar.is_nonterminal(symbol))
        .filter(|symbol| grammar.productions_for(symbol).is_empty())
        .unique()
        .map(|symbol| Lint::NoProductions(symbol.to_owned()))
        .collect()
}

fn get_undeclared_rules(grammar: &Grammar) -> Vec<Lint> {
    let declared: HashSet<&str> = grammar.nonterminals().iter().map(String::as_str).collect();

    grammar.rule_symbols()
        .filter(|symbol| !declared.contains(symbol))
        .map(|symbol| Lint::UndeclaredRule(symbol.to_owned()))
        .collect()
}

fn get_double_declarations(grammar: &Grammar) -> Vec<Lint> {
    let terminals: HashSet<&str> = grammar.terminals().iter().map(String::as_str).collect();

    grammar.nonterminals().iter()
        .filter(|symbol| terminals.contains(symbol.as_str()))
        .unique()
        .map(|symbol| Lint::DeclaredTwice(symbol.to_owned()))
        .collect()
}

// Words are matched one character per terminal
fn get_multi_character_terminals(grammar: &Grammar) -> Vec<Lint> {
    grammar.terminals().iter()
        .filter(|symbol| symbol.chars().count() != 1)
        .unique()
        .map(|symbol| Lint::MultiCharacterTerminal(symbol.to_owned()))
        .collect()
}

pub fn lint(grammar: &Grammar) -> Vec<Lint> {
    let mut lints = Vec::new();

    if !grammar.is_nonterminal(grammar.start_symbol()) {
        lints.push(Lint::UndeclaredStart(grammar.start_symbol().to_owned()));
    }

    lints.extend(get_double_declarations(grammar));
    lints.extend(get_multi_character_terminals(grammar));
    lints.extend(get_undeclared_rules(grammar));
    lints.extend(get_empty_nonterminals(grammar));
    lints.extend(get_unrecognized_symbols(grammar));

    lints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::tests::grammar;

    #[test]
    fn clean_grammar_has_no_lints() {
        let g = grammar(&["a", "b"], &["S"], "S", &[("S", &["a S b", "a b"])]);
        assert!(lint(&g).is_empty());
    }

    #[test]
    fn undefined_nonterminal_is_reported() {
        let g = grammar(&[], &["S", "A"], "S", &[("S", &["A"])]);
        assert_eq!(lint(&g), vec![Lint::NoProductions("A".to_string())]);
    }

    #[test]
    fn unrecognized_symbols_are_reported_once_per_production() {
        let g = grammar(&["a"], &["S"], "S", &[("S", &["a X X", "Y"])]);

        assert_eq!(lint(&g), vec![
            Lint::UnrecognizedSymbol { production: "S -> a X X".to_string(), symbol: "X".to_string() },
            Lint::UnrecognizedSymbol { production: "S -> Y".to_string(), symbol: "Y".to_string() },
        ]);
    }

    #[test]
    fn declaration_problems_are_reported() {
        let g = grammar(&["a", "B"], &["B"], "S", &[("S", &["a"]), ("B", &["a"])]);

        assert_eq!(lint(&g), vec![
            Lint::UndeclaredStart("S".to_string()),
            Lint::DeclaredTwice("B".to_string()),
            Lint::UndeclaredRule("S".to_string()),
        ]);
    }

    #[test]
    fn multi_character_terminals_are_reported() {
        let g = grammar(&["ab", "c", "ab", "é"], &["S"], "S", &[("S", &["ab c", "é"])]);
        assert_eq!(lint(&g), vec![Lint::MultiCharacterTerminal("ab".to_string())]);
    }
}
