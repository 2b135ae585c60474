use anyhow::{bail, Error};
use clap::Parser;
use ftail::Ftail;
use log::{info, LevelFilter};

use fitch::io::{read_character_matrix, read_topologies};
use fitch::parsimony::ParsimonyScorer;

mod cli;
use crate::cli::Cli;

type Result<T> = std::result::Result<T, Error>;

fn main() -> Result<()> {
    Ftail::new().console(LevelFilter::Info).init()?;

    let cli = match Cli::try_parse() {
        Ok(cli) => {
            info!("Successfully parsed the command line parameters");
            cli
        }
        Err(error) => {
            bail!("Unable to parse command line arguments: \n {}", error)
        }
    };

    let matrix = read_character_matrix(&cli.chars_file)?;
    let topologies = read_topologies(&cli.trees_file)?;

    let mut scorer = ParsimonyScorer::new(matrix);
    if !cli.taxa.is_empty() {
        info!("Binding {} supplied taxon names to tree leaves", cli.taxa.len());
        scorer = scorer.leaf_names(cli.taxa);
    }

    let best = scorer.best_tree(&topologies)?;

    println!("Best parsimony score: {}", best.score);
    println!("Best tree: {}", best.topology);
    for topology in &best.tied {
        println!("Tied at {}: {}", best.score, topology);
    }
    if !best.failed.is_empty() {
        println!("Skipped {} topology string(s) that could not be scored:", best.failed.len());
        for topology in &best.failed {
            println!("  {}", topology);
        }
    }

    Ok(())
}
