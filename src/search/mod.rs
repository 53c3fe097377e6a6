/*
    This module decides whether a grammar derives a word, by exhaustive
    backtracking over a stack of pending symbols
*/

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::{debug, trace};

use crate::grammar::{Grammar, Production, SymbolKind};
use crate::trace::DerivationTrace;

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct SearchLimits {
    // Symbol resolutions allowed before giving up, unlimited when None
    pub max_steps: Option<u64>,
}

impl SearchLimits {
    pub fn with_max_steps(max_steps: u64) -> Self {
        SearchLimits { max_steps: Some(max_steps) }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum SearchError {
    #[error("Gave up after {steps} steps without deciding whether the word belongs")]
    StepBudgetExhausted { steps: u64 },
}

#[derive(Debug, PartialEq, Clone)]
pub struct Outcome {
    pub belongs: bool,
    // Empty unless the word belongs
    pub trace: DerivationTrace,
    pub steps: u64,
    // Labels that made some branch fail because they were never classified
    pub unrecognized: Vec<String>,
}

// A stack of pending symbols, as the index of its top cell, or None when empty
type Stack = Option<usize>;

// Every stack built during one search. A cell holds a symbol and the stack
// below it, and is never changed once pushed, so stacks share their tails and
// a failed alternative cannot disturb any other
#[derive(Default)]
struct Cells<'g> {
    cells: Vec<(&'g str, Stack)>,
}

impl<'g> Cells<'g> {
    fn push(&mut self, symbol: &'g str, below: Stack) -> Stack {
        self.cells.push((symbol, below));
        Some(self.cells.len() - 1)
    }

    fn pop(&self, stack: Stack) -> Option<(&'g str, Stack)> {
        stack.and_then(|top| self.cells.get(top).copied())
    }
}

// What happened to a sentential form once it needed a decision
enum Resolution<'g> {
    Accept,
    Reject,
    Expand {
        symbol: &'g str,
        rest: Stack,
        cursor: usize,
    },
}

// A nonterminal waiting on its alternatives, with the stack below it
struct Choice<'g> {
    symbol: &'g str,
    rest: Stack,
    cursor: usize,
    alternatives: &'g [Production],
    next: usize,
}

impl<'g> Choice<'g> {
    fn advance(&mut self, cells: &mut Cells<'g>) -> Option<Stack> {
        let production = self.alternatives.get(self.next)?;
        self.next += 1;

        // Reversed, so the leftmost symbol ends up on top
        Some(production.rhs.iter().rev().fold(self.rest, |below, symbol| cells.push(symbol, below)))
    }

    fn chosen(&self) -> Option<&'g Production> {
        self.next.checked_sub(1).and_then(|i| self.alternatives.get(i))
    }
}

/// A membership check of words against one grammar.
///
/// The search is a depth first walk over leftmost derivations. Alternatives
/// are tried in declaration order and the first one that leads to acceptance
/// wins. Choice points live on an explicit frame stack rather than the call
/// stack, so the only bound on depth is memory, or the step budget.
pub struct Searcher<'g> {
    grammar: &'g Grammar,
    limits: SearchLimits,
}

// Bookkeeping for one call of `Searcher::run`
struct Walk<'g> {
    grammar: &'g Grammar,
    word: Vec<char>,
    limits: SearchLimits,
    steps: u64,
    cells: Cells<'g>,
    unrecognized: BTreeSet<&'g str>,
}

impl<'g> Walk<'g> {
    fn tick(&mut self) -> Result<(), SearchError> {
        self.steps += 1;
        match self.limits.max_steps {
            Some(max) if self.steps > max => Err(SearchError::StepBudgetExhausted { steps: max }),
            _ => Ok(()),
        }
    }

    fn matches(&self, terminal: &str, cursor: usize) -> bool {
        let Some(&c) = self.word.get(cursor) else {
            return false;
        };
        let mut chars = terminal.chars();
        chars.next() == Some(c) && chars.next().is_none()
    }

    // Pops symbols until the form is accepted, rejected, or needs a choice
    fn resolve(&mut self, mut stack: Stack, mut cursor: usize) -> Result<Resolution<'g>, SearchError> {
        loop {
            let Some((top, below)) = self.cells.pop(stack) else {
                return Ok(if cursor == self.word.len() {
                    Resolution::Accept
                } else {
                    Resolution::Reject
                });
            };
            stack = below;
            self.tick()?;
            trace!(symbol = top, cursor, "resolving");

            match self.grammar.classify(top) {
                SymbolKind::Terminal if self.matches(top, cursor) => cursor += 1,
                SymbolKind::Terminal => return Ok(Resolution::Reject),
                SymbolKind::Nonterminal => {
                    return Ok(Resolution::Expand { symbol: top, rest: stack, cursor });
                }
                SymbolKind::Unrecognized => {
                    self.unrecognized.insert(top);
                    return Ok(Resolution::Reject);
                }
            }
        }
    }

    fn finish(self, belongs: bool, trace: DerivationTrace) -> Outcome {
        debug!(belongs, steps = self.steps, productions = trace.len(), "search finished");
        Outcome {
            belongs,
            trace,
            steps: self.steps,
            unrecognized: self.unrecognized.into_iter().map(str::to_string).collect(),
        }
    }
}

impl<'g> Searcher<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Searcher { grammar, limits: SearchLimits::default() }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn run(&self, word: &str) -> Result<Outcome, SearchError> {
        debug!(word, start = self.grammar.start_symbol(), "searching");

        let mut walk = Walk {
            grammar: self.grammar,
            word: word.chars().collect(),
            limits: self.limits,
            steps: 0,
            cells: Cells::default(),
            unrecognized: BTreeSet::new(),
        };
        let mut frames: Vec<Choice<'g>> = Vec::new();
        let start = walk.cells.push(self.grammar.start_symbol(), None);
        let mut pending = Some((start, 0));

        loop {
            if let Some((stack, cursor)) = pending.take() {
                match walk.resolve(stack, cursor)? {
                    Resolution::Accept => {
                        // Innermost choice first, as a recursive search records them
                        let trace = frames.iter().rev().filter_map(Choice::chosen).cloned().collect();
                        return Ok(walk.finish(true, trace));
                    }
                    Resolution::Reject => {}
                    Resolution::Expand { symbol, rest, cursor } => frames.push(Choice {
                        symbol,
                        rest,
                        cursor,
                        alternatives: self.grammar.productions_for(symbol),
                        next: 0,
                    }),
                }
            }

            let Some(frame) = frames.last_mut() else {
                return Ok(walk.finish(false, DerivationTrace::new()));
            };

            match frame.advance(&mut walk.cells) {
                Some(stack) => pending = Some((stack, frame.cursor)),
                None => {
                    trace!(symbol = frame.symbol, cursor = frame.cursor, "alternatives exhausted");
                    frames.pop();
                }
            }
        }
    }
}

/// Checks `word` against `grammar` with no step budget.
pub fn check(grammar: &Grammar, word: &str) -> Result<Outcome, SearchError> {
    Searcher::new(grammar).run(word)
}
