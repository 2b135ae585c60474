use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub(super) struct Cli {
    /// Character matrix file in fasta format
    #[arg(short, long, value_name = "CHAR_FILE")]
    pub(super) chars_file: PathBuf,

    /// Candidate tree topologies, one per line
    #[arg(short, long, value_name = "TREE_FILE")]
    pub(super) trees_file: PathBuf,

    /// Taxon names bound positionally to tree leaves, overriding the leaf
    /// labels found in the topology strings
    #[arg(short = 'n', long = "taxa", value_name = "TAXON")]
    pub(super) taxa: Vec<String>,
}
