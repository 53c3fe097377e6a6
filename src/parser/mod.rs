/*
    This module loads grammars, either from a JSON definition or from a
    BNF-style text file
*/

mod lexer;
pub mod verifier;

use std::fs;
use std::path::Path;

use itertools::Itertools;
use thiserror::Error;
use tracing::debug;

use crate::error_handling::*;
use crate::grammar::{Grammar, GrammarDefinition};
use lexer::*;

#[derive(Debug, Error)]
pub enum CompileErrorType {
    // A line which should contain a rule does not
    #[error("Expected `=` after nonterminal")]
    MissingEquals,
    // A rule has multiple equals signs
    #[error("Unexpected `=` encountered")]
    UnexpectedEquals,
    // The user starts a rule line with something other than a nonterminal
    #[error("Tried to define something other than a nonterminal")]
    MissingNonterminal,
    // There is an unclosed quote
    #[error("Unmatched quotes")]
    UnmatchedQuote,
    // Bodies are split on whitespace, so a terminal can't contain any
    #[error("Terminal `{0:?}` contains whitespace")]
    WhitespaceInTerminal(String),
    // The file has no rules, so there is no start symbol
    #[error("No rules found")]
    NoRules,
    // Somehow a full rule body was parsed as a single alternative
    // This is a problem with cfgtrace, not the grammar
    #[error("Rule body was not split on `|` (this is a problem with cfgtrace, not the grammar)")]
    UnsplitRewrite,
    // The JSON definition could not be read
    #[error("Invalid grammar definition: {0}")]
    Definition(serde_json::Error),
    // There was an issue with reading a file
    #[error("File error: {0}")]
    FileError(std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CompileErrorType::FileError(a), CompileErrorType::FileError(b)) => a.kind() == b.kind(),
            (CompileErrorType::WhitespaceInTerminal(a), CompileErrorType::WhitespaceInTerminal(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileErrors = Errors<CompileErrorType>;

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;
pub type FileResult<T> = std::result::Result<T, CompileErrors>;

fn file_error(error: CompileErrorType, path: &Path) -> CompileErrors {
    vec![CompileError { location: Location::file(path), error }]
}

// The base unit of a rule body as written in a text grammar
#[derive(Debug, PartialEq)]
enum Symbol {
    Terminal(String),
    Nonterminal(String),
}

// The symbols in a single alternative
type Alternative = Vec<Symbol>;

#[derive(PartialEq, Debug)]
struct Rule {
    symbol: String,
    alternatives: Vec<Alternative>,
}

fn parse_alternative(tokens: &[Token]) -> Result<Alternative> {
    tokens.iter()
        .map(|t| match t {
            Token::Equals => Err(CompileErrorType::UnexpectedEquals),
            Token::Nonterminal(s) => Ok(Some(Symbol::Nonterminal(s.clone()))),
            // `""` stands for the empty body
            Token::Terminal(s) if s.is_empty() => Ok(None),
            Token::Terminal(s) if s.chars().any(char::is_whitespace) => {
                Err(CompileErrorType::WhitespaceInTerminal(s.clone()))
            }
            Token::Terminal(s) => Ok(Some(Symbol::Terminal(s.clone()))),
            Token::Or => Err(CompileErrorType::UnsplitRewrite),
        })
        .flatten_ok()
        .collect()
}

fn parse_line(tokens: &[Token]) -> Result<Rule> {
    let symbol = match tokens.first() {
        Some(Token::Nonterminal(s)) => s.clone(),
        _ => return Err(CompileErrorType::MissingNonterminal),
    };

    if tokens.get(1) != Some(&Token::Equals) {
        return Err(CompileErrorType::MissingEquals);
    }

    let alternatives = tokens[2..]
        .split(|t| *t == Token::Or)
        .map(parse_alternative)
        .collect::<Result<_>>()?;

    Ok(Rule { symbol, alternatives })
}

fn is_rule_line(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.starts_with(';')
}

fn grammar_from_rules(rules: Vec<Rule>) -> Option<Grammar> {
    let start_symbol = rules.first()?.symbol.clone();

    let symbols = rules.iter()
        .flat_map(|rule| rule.alternatives.iter().flatten());

    let terminals = symbols.clone()
        .filter_map(|symbol| match symbol {
            Symbol::Terminal(t) => Some(t.clone()),
            _ => None,
        })
        .unique()
        .collect_vec();

    let nonterminals = rules.iter()
        .map(|rule| &rule.symbol)
        .chain(symbols.filter_map(|symbol| match symbol {
            Symbol::Nonterminal(n) => Some(n),
            _ => None,
        }))
        .unique()
        .cloned()
        .collect_vec();

    let productions = rules.into_iter().map(|rule| {
        let bodies = rule.alternatives.iter()
            .map(|alternative| alternative.iter()
                .map(|symbol| match symbol {
                    Symbol::Terminal(s) | Symbol::Nonterminal(s) => s.as_str(),
                })
                .join(" "))
            .collect_vec();
        (rule.symbol, bodies)
    });

    Some(Grammar::new(terminals, nonterminals, start_symbol, productions))
}

/// Parses a BNF-style grammar such as
///
/// ```text
/// ; a^n b^n
/// S = "a" S "b" | "a" "b"
/// ```
///
/// Quoted items are terminals, bare items are nonterminals and `""` is the
/// empty body. The first rule defines the start symbol. Every bad line is
/// reported, not just the first.
pub fn parse_str(text: &str, path: &Path) -> FileResult<Grammar> {
    let (rules, errors): (Vec<_>, Vec<_>) = text.lines()
        .enumerate()
        .filter(|(_, line)| is_rule_line(line))
        .map(|(num, line)| {
            lex_line(line)
                .and_then(|tokens| parse_line(&tokens))
                .map_err(|error| CompileError { location: Location::line(path, num + 1), error })
        })
        .partition_result();

    if !errors.is_empty() {
        return Err(errors);
    }

    grammar_from_rules(rules).ok_or_else(|| file_error(CompileErrorType::NoRules, path))
}

pub fn parse_file(path: &Path) -> FileResult<Grammar> {
    let text = fs::read_to_string(path)
        .map_err(|e| file_error(CompileErrorType::FileError(e), path))?;
    parse_str(&text, path)
}

pub fn parse_definition(text: &str, path: &Path) -> LineResult<Grammar> {
    serde_json::from_str::<GrammarDefinition>(text)
        .map(Grammar::from)
        .map_err(|e| CompileError {
            location: Location::line(path, e.line()),
            error: CompileErrorType::Definition(e),
        })
}

/// Loads a grammar file, treating `.json` files as grammar definitions and
/// anything else as BNF-style text.
pub fn load_file(path: &Path) -> FileResult<Grammar> {
    let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    debug!(path = %path.display(), is_json, "loading grammar");

    if !is_json {
        return parse_file(path);
    }

    let text = fs::read_to_string(path)
        .map_err(|e| file_error(CompileErrorType::FileError(e), path))?;
    parse_definition(&text, path).map_err(|e| vec![e])
}
