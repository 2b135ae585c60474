use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::bail;
use bio::io::fasta::Reader;
use log::info;

use crate::characters::CharacterMatrix;
use crate::Result;

pub(crate) struct DataError {
    pub(crate) message: String,
}
impl fmt::Debug for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
impl Error for DataError {}

/// Reads a character matrix from a fasta file. Record ids become taxon
/// names and sequence characters become the per-site state symbols,
/// normalized to uppercase.
///
/// # Arguments
/// * `path` - Path to the fasta file.
///
/// # Example
/// ```
/// use fitch::io::read_character_matrix;
/// use std::path::PathBuf;
/// let matrix = read_character_matrix(&PathBuf::from("./data/morph_chars.fasta")).unwrap();
/// # assert_eq!(matrix.taxon_count(), 6);
/// # assert_eq!(matrix.site_count(), 5);
/// ```
pub fn read_character_matrix(path: &Path) -> Result<CharacterMatrix> {
    info!("Reading character matrix from file {}", path.display());
    let reader = Reader::from_file(path)?;
    let mut records = Vec::new();

    for result in reader.records() {
        let rec = result?;
        if let Err(e) = rec.check() {
            bail!(DataError {
                message: e.to_string()
            });
        }
        records.push(rec);
    }
    if records.is_empty() {
        bail!(DataError {
            message: String::from("No records found in file")
        });
    }

    let matrix = CharacterMatrix::from_records(&records)?;
    info!("Read character matrix successfully");
    Ok(matrix)
}

/// Reads candidate topology strings from a file, one topology per line.
/// Blank lines are skipped; lines are returned verbatim (trimmed) so the
/// winning topology can be reported exactly as written.
///
/// # Arguments
/// * `path` - Path to the topology file.
///
/// # Example
/// ```
/// use fitch::io::read_topologies;
/// use std::path::PathBuf;
/// let topologies = read_topologies(&PathBuf::from("./data/rooted_trees.txt")).unwrap();
/// # assert_eq!(topologies.len(), 3);
/// ```
pub fn read_topologies(path: &Path) -> Result<Vec<String>> {
    info!("Reading topologies from file {}", path.display());
    let contents = fs::read_to_string(path)?;
    let topologies: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    if topologies.is_empty() {
        bail!(DataError {
            message: String::from("No topologies found in file")
        });
    }
    info!("Read {} topology string(s)", topologies.len());
    Ok(topologies)
}
