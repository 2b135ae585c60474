use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

use anyhow::bail;
use log::{info, warn};
#[cfg(feature = "par-score")]
use rayon::prelude::*;

use crate::characters::{CharacterMatrix, DataShapeError, StateSet};
use crate::tree::{tree_parser::from_topology, NodeIdx::Internal as Int, Tree};
use crate::Result;

pub(crate) struct TaxonBindingError {
    pub(crate) message: String,
}
impl fmt::Debug for TaxonBindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
impl fmt::Display for TaxonBindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
impl Error for TaxonBindingError {}

/// Scores candidate topologies against a character matrix using the
/// bottom-up pass of Fitch's algorithm and selects the most parsimonious
/// tree.
#[derive(Debug, Clone)]
pub struct ParsimonyScorer {
    matrix: CharacterMatrix,
    leaf_names: Option<Vec<String>>,
}

/// Outcome of scoring a set of candidate topologies: the minimum score,
/// the earliest topology achieving it, any later topologies tied with it,
/// and the topologies skipped because they could not be scored.
#[derive(Debug, Clone, PartialEq)]
pub struct BestTree {
    pub score: usize,
    pub topology: String,
    pub tied: Vec<String>,
    pub failed: Vec<String>,
}

impl ParsimonyScorer {
    pub fn new(matrix: CharacterMatrix) -> ParsimonyScorer {
        ParsimonyScorer {
            matrix,
            leaf_names: None,
        }
    }

    /// Supplies taxon names to bind, positionally, to the topology's
    /// leaf-discovery order, overriding the leaf labels found in the
    /// topology strings. Used when topology leaf labels (e.g. anonymized
    /// numeric codes) differ from the matrix's taxon identifiers.
    pub fn leaf_names(mut self, names: Vec<String>) -> ParsimonyScorer {
        self.leaf_names = Some(names);
        self
    }

    /// Total parsimony score of one topology over every matrix column.
    pub fn score_topology(&self, topology: &str) -> Result<usize> {
        let tree = from_topology(topology)?;
        let rows = self.bind_rows(&tree)?;
        let mut total = 0;
        for column in 0..self.matrix.site_count() {
            total += self.score_column(&tree, &rows, column)?;
        }
        info!("Topology scored {}", total);
        Ok(total)
    }

    /// Matrix row backing each leaf, in flat leaf-index order. The binding
    /// name for leaf i is the override list's entry i when supplied, else
    /// the leaf label discovered during the parse.
    fn bind_rows(&self, tree: &Tree) -> Result<Vec<usize>> {
        let names = match &self.leaf_names {
            Some(names) => {
                if names.len() != tree.leaf_count() {
                    bail!(TaxonBindingError {
                        message: format!(
                            "Got {} taxon names for a topology with {} leaves",
                            names.len(),
                            tree.leaf_count()
                        )
                    });
                }
                names.as_slice()
            }
            None => tree.leaf_ids(),
        };
        let mut rows = Vec::with_capacity(names.len());
        for name in names {
            match self.matrix.row_index(name) {
                Some(row) => rows.push(row),
                None => bail!(TaxonBindingError {
                    message: format!("Taxon {} is not in the character matrix", name)
                }),
            }
        }
        Ok(rows)
    }

    /// One column's state-change count. Leaf states are read from the bound
    /// matrix rows into a fresh buffer indexed by flat node index, then the
    /// reconciliation rule runs over the post-order: an internal node takes
    /// the intersection of its children's state sets at no cost, or their
    /// union at a cost of one change when the intersection is empty.
    fn score_column(&self, tree: &Tree, rows: &[usize], column: usize) -> Result<usize> {
        let mut states = vec![StateSet::new(); tree.len()];
        for (leaf, &row) in rows.iter().enumerate() {
            states[leaf] = StateSet::singleton(self.matrix.state(row, column));
        }

        let mut changes = 0;
        for node_idx in tree.postorder() {
            let Int(idx) = node_idx else { continue };
            let children = tree.children(node_idx);
            let (state, cost) = {
                let x = &states[usize::from(children[0])];
                let y = &states[usize::from(children[1])];
                let intersection = x & y;
                if intersection.is_empty() {
                    (x | y, 1)
                } else {
                    (intersection, 0)
                }
            };
            if state.is_empty() {
                bail!(DataShapeError {
                    message: format!("Both child state sets are empty below {}", node_idx)
                });
            }
            states[*idx] = state;
            changes += cost;
        }
        Ok(changes)
    }

    /// Scores every topology and reports the most parsimonious one.
    /// Topologies that cannot be parsed or bound are skipped with a warning
    /// and listed in the result; ties are broken towards the earliest
    /// topology in input order.
    pub fn best_tree(&self, topologies: &[String]) -> Result<BestTree> {
        if topologies.is_empty() {
            bail!("No topologies to score");
        }
        info!("Scoring {} candidate topologies", topologies.len());

        #[cfg(feature = "par-score")]
        let results: Vec<Result<usize>> = topologies
            .par_iter()
            .map(|topology| self.score_topology(topology))
            .collect();
        #[cfg(not(feature = "par-score"))]
        let results: Vec<Result<usize>> = topologies
            .iter()
            .map(|topology| self.score_topology(topology))
            .collect();

        let mut table = BTreeMap::<usize, Vec<usize>>::new();
        let mut failed = Vec::new();
        for (i, res) in results.into_iter().enumerate() {
            match res {
                Ok(score) => table.entry(score).or_default().push(i),
                Err(e) => {
                    warn!("Skipping topology {}: {}", i, e);
                    failed.push(topologies[i].clone());
                }
            }
        }

        let Some((&score, at_minimum)) = table.iter().next() else {
            bail!("None of the {} topologies could be scored", topologies.len());
        };
        let mut tied: Vec<String> = at_minimum
            .iter()
            .map(|&i| topologies[i].clone())
            .collect();
        let topology = tied.remove(0);
        info!("Best parsimony score: {}", score);
        Ok(BestTree {
            score,
            topology,
            tied,
            failed,
        })
    }
}

#[cfg(test)]
mod tests;
