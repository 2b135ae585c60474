use std::fmt;

use anyhow::bail;
use log::{info, warn};
use pest::{error::Error as PestError, iterators::Pair, Parser};
use pest_derive::Parser;

use crate::tree::{
    Node,
    NodeIdx::{self, Internal as Int, Leaf},
    Tree,
};
use crate::Result;

#[derive(Parser)]
#[grammar = "./tree/topology.pest"]
pub struct TopologyParser;

#[derive(Debug)]
pub struct ParsingError(pub(crate) Box<PestError<Rule>>);

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Malformed topology string")?;
        write!(f, "{}", self.0)
    }
}

/// Parses a single `;`-terminated topology statement into a rooted binary
/// tree. Two top-level branches are joined under an implicit root.
///
/// # Example
/// ```
/// use fitch::tree::tree_parser::from_topology;
/// let tree = from_topology("((A, B), (C, D));").unwrap();
/// assert_eq!(tree.leaves().len(), 4);
/// assert_eq!(tree.len(), 7);
/// ```
pub fn from_topology(topology: &str) -> Result<Tree> {
    let mut pairs = match TopologyParser::parse(Rule::topology, topology) {
        Ok(pairs) => pairs,
        Err(e) => bail!(ParsingError(Box::new(e))),
    };
    let topology_rule = pairs.next().unwrap();
    let branches: Vec<Pair<Rule>> = topology_rule
        .into_inner()
        .filter(|rule| rule.as_rule() == Rule::node)
        .collect();

    let n = branches.iter().map(count_leaves).sum();
    let mut tree = Tree::new_empty(n);
    let mut next_leaf = 0;

    let mut branches = branches.into_iter();
    let first = branches.next().unwrap();
    tree.root = match branches.next() {
        None => tree.build_node(first, &mut next_leaf),
        Some(second) => {
            warn!("Topology has two top-level branches, joining under an implicit root");
            let root_idx = tree.nodes.len();
            tree.nodes.push(Node::new_empty_internal(root_idx));
            let left = tree.build_node(first, &mut next_leaf);
            let right = tree.build_node(second, &mut next_leaf);
            tree.join_children(root_idx, left, right);
            Int(root_idx)
        }
    };
    tree.compute_postorder();
    info!("Parsed topology with {} leaves", tree.leaf_count());
    Ok(tree)
}

fn count_leaves(rule: &Pair<Rule>) -> usize {
    rule.clone()
        .into_inner()
        .flatten()
        .filter(|pair| pair.as_rule() == Rule::leaf)
        .count()
}

impl Tree {
    fn build_node(&mut self, node_rule: Pair<Rule>, next_leaf: &mut usize) -> NodeIdx {
        let inner = node_rule.into_inner().next().unwrap();
        match inner.as_rule() {
            Rule::internal => {
                let idx = self.nodes.len();
                self.nodes.push(Node::new_empty_internal(idx));
                let mut children = inner.into_inner();
                let left = self.build_node(children.next().unwrap(), next_leaf);
                let right = self.build_node(children.next().unwrap(), next_leaf);
                self.join_children(idx, left, right);
                Int(idx)
            }
            Rule::leaf => {
                let idx = *next_leaf;
                *next_leaf += 1;
                let id = inner.as_str().to_string();
                self.nodes[idx] = Node::new_leaf(idx, id.clone());
                self.leaf_ids.push(id);
                Leaf(idx)
            }
            _ => unreachable!(),
        }
    }

    fn join_children(&mut self, parent_idx: usize, left: NodeIdx, right: NodeIdx) {
        self.nodes[usize::from(left)].parent = Some(Int(parent_idx));
        self.nodes[usize::from(right)].parent = Some(Int(parent_idx));
        self.nodes[parent_idx].children = vec![left, right];
    }
}
