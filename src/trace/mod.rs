/*
    This module records the productions behind a successful derivation
*/

use std::fmt::Display;

use crate::grammar::{Grammar, Production, SymbolKind};

/// The productions applied along the one search path that accepted a word.
///
/// They are kept in the order a recursive search would record them while
/// unwinding: the innermost (most recently applied) production first and the
/// start symbol's production last. Reversed, this is the leftmost derivation.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct DerivationTrace {
    productions: Vec<Production>,
}

impl DerivationTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, production: Production) {
        self.productions.push(production);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Production> {
        self.productions.iter()
    }

    pub fn len(&self) -> usize {
        self.productions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }

    // The productions in the order they were applied
    pub fn leftmost(&self) -> impl Iterator<Item = &Production> {
        self.productions.iter().rev()
    }

    /// Rebuilds the full derivation tree by replaying the trace as a leftmost
    /// derivation from the start symbol. Returns `None` for an empty trace or
    /// one that does not describe a derivation in `grammar`.
    pub fn tree(&self, grammar: &Grammar) -> Option<DerivationTree> {
        DerivationTree::replay(grammar, self.leftmost())
    }
}

impl FromIterator<Production> for DerivationTrace {
    fn from_iter<I: IntoIterator<Item = Production>>(iter: I) -> Self {
        DerivationTrace { productions: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a DerivationTrace {
    type Item = &'a Production;
    type IntoIter = std::slice::Iter<'a, Production>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for DerivationTrace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for production in &self.productions {
            writeln!(f, "{}", production)?;
        }
        Ok(())
    }
}

// A node of a derivation tree. Terminals are leaves, nonterminals have one
// child per symbol of the production they were expanded with
#[derive(Debug, PartialEq, Clone)]
pub struct DerivationNode {
    pub label: String,
    pub kind: SymbolKind,
    // Indices into the tree's node list
    pub children: Vec<usize>,
}

/// A derivation tree stored flat, root first. Nodes refer to their children
/// by index, so building, walking and dropping a tree never recurse, however
/// deep the derivation.
#[derive(Debug, PartialEq, Clone)]
pub struct DerivationTree {
    nodes: Vec<DerivationNode>,
}

impl DerivationTree {
    fn replay<'a>(grammar: &Grammar, mut applied: impl Iterator<Item = &'a Production>) -> Option<Self> {
        let start = grammar.start_symbol();
        let mut nodes = vec![DerivationNode {
            label: start.to_string(),
            kind: grammar.classify(start),
            children: Vec::new(),
        }];

        // Nodes still to expand, leftmost on top
        let mut pending = vec![0];
        while let Some(index) = pending.pop() {
            match nodes[index].kind {
                SymbolKind::Terminal => {}
                SymbolKind::Unrecognized => return None,
                SymbolKind::Nonterminal => {
                    let production = applied.next().filter(|p| p.lhs == nodes[index].label)?;
                    let first = nodes.len();
                    nodes.extend(production.rhs.iter().map(|symbol| DerivationNode {
                        label: symbol.clone(),
                        kind: grammar.classify(symbol),
                        children: Vec::new(),
                    }));

                    let children: Vec<usize> = (first..nodes.len()).collect();
                    pending.extend(children.iter().rev());
                    nodes[index].children = children;
                }
            }
        }

        // Leftover productions mean the trace was not a single derivation
        match applied.next() {
            Some(_) => None,
            None => Some(DerivationTree { nodes }),
        }
    }

    pub fn root(&self) -> &DerivationNode {
        &self.nodes[0]
    }

    pub fn node(&self, index: usize) -> Option<&DerivationNode> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[DerivationNode] {
        &self.nodes
    }

    /// Walks the tree depth first, left to right, yielding each node's index,
    /// the node, and its parent's index.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder { tree: self, pending: vec![(0, None)] }
    }

    // The terminals at the leaves, left to right
    pub fn word(&self) -> String {
        self.preorder()
            .filter(|(_, node, _)| node.kind == SymbolKind::Terminal)
            .map(|(_, node, _)| node.label.as_str())
            .collect()
    }
}

pub struct Preorder<'t> {
    tree: &'t DerivationTree,
    pending: Vec<(usize, Option<usize>)>,
}

impl<'t> Iterator for Preorder<'t> {
    type Item = (usize, &'t DerivationNode, Option<usize>);

    fn next(&mut self) -> Option<Self::Item> {
        let (index, parent) = self.pending.pop()?;
        let node = self.tree.node(index)?;
        self.pending.extend(node.children.iter().rev().map(|&child| (child, Some(index))));
        Some((index, node, parent))
    }
}
