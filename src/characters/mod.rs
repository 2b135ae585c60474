use std::error::Error;
use std::fmt;

use anyhow::bail;
use bio::io::fasta::Record;
use log::info;
use nalgebra::DMatrix;

use crate::Result;

mod state_set;
pub use state_set::StateSet;

pub(crate) struct DataShapeError {
    pub(crate) message: String,
}
impl fmt::Debug for DataShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
impl fmt::Display for DataShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
impl Error for DataShapeError {}

/// Discrete character states observed across a set of taxa, one row per
/// taxon and one column per character. Row order matches the taxon list.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterMatrix {
    taxa: Vec<String>,
    states: DMatrix<u8>,
}

impl CharacterMatrix {
    /// Creates a matrix from an ordered taxon list and per-taxon state rows.
    /// Bails if the taxon list length differs from the row count or if the
    /// rows are ragged.
    ///
    /// # Example
    /// ```
    /// use fitch::characters::CharacterMatrix;
    /// let matrix = CharacterMatrix::new(
    ///     vec!["A".to_string(), "B".to_string()],
    ///     vec![b"01".to_vec(), b"11".to_vec()],
    /// )
    /// .unwrap();
    /// assert_eq!(matrix.taxon_count(), 2);
    /// assert_eq!(matrix.site_count(), 2);
    /// ```
    pub fn new(taxa: Vec<String>, rows: Vec<Vec<u8>>) -> Result<Self> {
        if taxa.len() != rows.len() {
            bail!(DataShapeError {
                message: format!(
                    "Taxon list length ({}) does not match row count ({})",
                    taxa.len(),
                    rows.len()
                )
            });
        }
        if taxa.is_empty() {
            bail!(DataShapeError {
                message: String::from("Character matrix has no taxa")
            });
        }
        let site_count = rows[0].len();
        if let Some(row) = rows.iter().find(|row| row.len() != site_count) {
            bail!(DataShapeError {
                message: format!(
                    "Ragged character matrix, expected {} states per row, found {}",
                    site_count,
                    row.len()
                )
            });
        }
        let states = DMatrix::from_fn(rows.len(), site_count, |i, j| rows[i][j]);
        Ok(CharacterMatrix { taxa, states })
    }

    /// Creates a matrix from fasta records, using record ids as taxon names
    /// and sequence characters as state symbols. Symbols are uppercased.
    pub fn from_records(records: &[Record]) -> Result<Self> {
        let taxa = records.iter().map(|rec| rec.id().to_string()).collect();
        let rows = records
            .iter()
            .map(|rec| rec.seq().to_ascii_uppercase())
            .collect();
        let matrix = Self::new(taxa, rows)?;
        info!(
            "Built character matrix with {} taxa and {} site(s)",
            matrix.taxon_count(),
            matrix.site_count()
        );
        Ok(matrix)
    }

    pub fn taxa(&self) -> &[String] {
        &self.taxa
    }

    /// Row index of the given taxon, None if the taxon is not present.
    pub fn row_index(&self, taxon: &str) -> Option<usize> {
        self.taxa.iter().position(|t| t == taxon)
    }

    pub fn state(&self, row: usize, column: usize) -> u8 {
        self.states[(row, column)]
    }

    pub fn taxon_count(&self) -> usize {
        self.states.nrows()
    }

    pub fn site_count(&self) -> usize {
        self.states.ncols()
    }
}
