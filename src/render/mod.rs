/*
    This module draws grammars and derivations as graph descriptions
*/

use std::collections::{HashMap, HashSet};

use crate::grammar::{Grammar, SymbolKind};
use crate::trace::{DerivationTrace, DerivationTree};

const HEADER: &str = "digraph {\n";
const FOOTER: &str = "}";
const INDENT: &str = "    ";

/// Every production of the grammar as one edge, bodies exactly as written.
pub fn general(grammar: &Grammar) -> String {
    let mut graph = String::from(HEADER);

    for production in grammar.productions() {
        graph.push_str(INDENT);
        graph.push_str(&production.lhs);
        graph.push_str(" -> ");
        graph.push_str(&production.body);
        graph.push('\n');
    }

    graph.push_str(FOOTER);
    graph
}

/// A single chain of edges for one derivation.
///
/// Each nonterminal is mapped to the right hand side of the first of its
/// productions in the trace. Starting from the start symbol the chain follows
/// that mapping, looking the whole right hand side up as the next key, until
/// it reaches something that is not a key or a key it already passed.
/// Branching derivations are flattened away; [`tree`] draws them fully.
pub fn particular(grammar: &Grammar, trace: &DerivationTrace) -> String {
    let mut connections: HashMap<&str, String> = HashMap::new();
    for production in trace {
        connections.entry(production.lhs.as_str()).or_insert_with(|| production.rhs_text());
    }

    let mut graph = String::from(HEADER);
    graph.push_str(INDENT);

    let mut current = grammar.start_symbol().to_string();
    let mut visited = HashSet::new();
    while let Some(next) = connections.get(current.as_str()) {
        if !visited.insert(current.clone()) {
            break;
        }
        graph.push_str(&current);
        graph.push_str(" -> ");
        current = next.clone();
    }

    graph.push_str(&current);
    graph.push('\n');
    graph.push_str(FOOTER);
    graph
}

/// The whole derivation tree, one node per symbol occurrence, numbered by
/// its position in the tree. A nonterminal expanded to nothing gets an `ε`
/// child, numbered after every real node.
pub fn tree(derivation: &DerivationTree) -> String {
    let mut graph = String::from(HEADER);
    let mut next_id = derivation.nodes().len();

    for (id, node, parent) in derivation.preorder() {
        graph.push_str(&format!("{INDENT}n{id} [label=\"{}\"]\n", node.label));
        if let Some(parent) = parent {
            graph.push_str(&format!("{INDENT}n{parent} -> n{id}\n"));
        }

        if node.kind == SymbolKind::Nonterminal && node.children.is_empty() {
            graph.push_str(&format!("{INDENT}n{next_id} [label=\"ε\"]\n"));
            graph.push_str(&format!("{INDENT}n{id} -> n{next_id}\n"));
            next_id += 1;
        }
    }

    graph.push_str(FOOTER);
    graph
}
