//! Membership checking for context-free grammars.
//!
//! A [`Grammar`] is checked against words by an exhaustive backtracking
//! search ([`search`]) that also records which productions derived an
//! accepted word ([`trace`]). The [`render`] module turns grammars and
//! derivations into `digraph` descriptions, and a [`Session`] ties these
//! together behind "set grammar" and "check word".

pub mod error_handling;
pub mod generator;
pub mod grammar;
pub mod logging;
pub mod parser;
pub mod render;
pub mod search;
pub mod session;
pub mod trace;

pub use grammar::{Grammar, GrammarDefinition, Production, SymbolKind};
pub use search::{check, Outcome, SearchError, SearchLimits, Searcher};
pub use session::{Acknowledgement, CheckError, CheckReport, Session};
pub use trace::{DerivationNode, DerivationTrace, DerivationTree};
