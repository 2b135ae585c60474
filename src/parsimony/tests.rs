use std::path::PathBuf;

use crate::io::{read_character_matrix, read_topologies};
use crate::matrix;
use crate::parsimony::ParsimonyScorer;

fn four_taxon_scorer(states: [&[u8]; 4]) -> ParsimonyScorer {
    ParsimonyScorer::new(matrix!(
        "A" => states[0],
        "B" => states[1],
        "C" => states[2],
        "D" => states[3],
    ))
}

#[test]
fn matching_sister_pairs_cost_one() {
    // ((A, B), (C, D)) with A=B=0 and C=D=1: both cherries reconcile for
    // free, the root unions {0} and {1} for a single change.
    let scorer = four_taxon_scorer([b"0", b"0", b"1", b"1"]);
    let score = scorer.score_topology("((A, B), (C, D));").unwrap();
    assert_eq!(score, 1);
}

#[test]
fn alternating_states_cost_two() {
    // Both cherries disagree (cost 1 each), but their unions {0,1} overlap
    // at the root, so nothing further is charged.
    let scorer = four_taxon_scorer([b"0", b"1", b"0", b"1"]);
    let score = scorer.score_topology("((A, B), (C, D));").unwrap();
    assert_eq!(score, 2);
}

#[test]
fn column_scores_sum_to_total() {
    let scorer = four_taxon_scorer([b"00", b"01", b"10", b"11"]);
    let score = scorer.score_topology("((A, B), (C, D));").unwrap();
    assert_eq!(score, 3);
}

#[test]
fn zero_sites_score_zero() {
    let scorer = four_taxon_scorer([b"", b"", b"", b""]);
    let score = scorer.score_topology("((A, B), (C, D));").unwrap();
    assert_eq!(score, 0);
}

#[test]
fn rescoring_is_idempotent() {
    let scorer = four_taxon_scorer([b"0110", b"0011", b"1010", b"1100"]);
    let topology = "((A, C), (B, D));";
    let first = scorer.score_topology(topology).unwrap();
    let second = scorer.score_topology(topology).unwrap();
    assert_eq!(first, second);
}

#[test]
fn leaf_order_in_topology_is_irrelevant() {
    let scorer = four_taxon_scorer([b"0", b"0", b"1", b"1"]);
    assert_eq!(
        scorer.score_topology("((A, B), (C, D));").unwrap(),
        scorer.score_topology("((D, C), (B, A));").unwrap()
    );
}

#[test]
fn implicit_root_scores_like_explicit() {
    let scorer = four_taxon_scorer([b"0", b"0", b"1", b"1"]);
    assert_eq!(
        scorer.score_topology("(A, B), (C, D);").unwrap(),
        scorer.score_topology("((A, B), (C, D));").unwrap()
    );
}

#[test]
fn best_tree_selects_minimum() {
    let scorer = four_taxon_scorer([b"0", b"0", b"1", b"1"]);
    let topologies = vec![
        "((A, C), (B, D));".to_string(),
        "((A, B), (C, D));".to_string(),
    ];
    let best = scorer.best_tree(&topologies).unwrap();
    assert_eq!(best.score, 1);
    assert_eq!(best.topology, "((A, B), (C, D));");
    assert!(best.tied.is_empty());
    assert!(best.failed.is_empty());
}

#[test]
fn ties_break_towards_earliest() {
    let scorer = four_taxon_scorer([b"0", b"0", b"1", b"1"]);
    let topologies = vec![
        "((A, B), (C, D));".to_string(),
        "((B, A), (D, C));".to_string(),
    ];
    let best = scorer.best_tree(&topologies).unwrap();
    assert_eq!(best.score, 1);
    assert_eq!(best.topology, topologies[0]);
    assert_eq!(best.tied, vec![topologies[1].clone()]);

    let reversed: Vec<String> = topologies.iter().rev().cloned().collect();
    let best = scorer.best_tree(&reversed).unwrap();
    assert_eq!(best.topology, reversed[0]);
}

#[test]
fn malformed_topologies_are_skipped() {
    let scorer = four_taxon_scorer([b"0", b"0", b"1", b"1"]);
    let topologies = vec![
        "((A, B), (C, D;".to_string(),
        "((A, B), (C, D));".to_string(),
    ];
    let best = scorer.best_tree(&topologies).unwrap();
    assert_eq!(best.score, 1);
    assert_eq!(best.topology, topologies[1]);
    assert_eq!(best.failed, vec![topologies[0].clone()]);
}

#[test]
fn all_topologies_malformed() {
    let scorer = four_taxon_scorer([b"0", b"0", b"1", b"1"]);
    let topologies = vec!["((A, B;".to_string(), "garbage".to_string()];
    assert!(scorer.best_tree(&topologies).is_err());
}

#[test]
fn empty_topology_list() {
    let scorer = four_taxon_scorer([b"0", b"0", b"1", b"1"]);
    assert!(scorer.best_tree(&[]).is_err());
}

#[test]
fn unknown_taxon_is_a_binding_error() {
    let scorer = four_taxon_scorer([b"0", b"0", b"1", b"1"]);
    let res = scorer.score_topology("((A, B), (C, E));");
    assert!(res.is_err());
    assert!(res
        .unwrap_err()
        .to_string()
        .contains("not in the character matrix"));
}

#[test]
fn renaming_binds_leaves_positionally() {
    let scorer = four_taxon_scorer([b"0", b"0", b"1", b"1"])
        .leaf_names(["A", "B", "C", "D"].map(String::from).to_vec());
    let score = scorer.score_topology("((0, 1), (2, 3));").unwrap();
    assert_eq!(score, 1);
}

#[test]
fn renaming_length_mismatch() {
    let scorer = four_taxon_scorer([b"0", b"0", b"1", b"1"])
        .leaf_names(["A", "B", "C"].map(String::from).to_vec());
    let res = scorer.score_topology("((0, 1), (2, 3));");
    assert!(res.is_err());
    assert!(res.unwrap_err().to_string().contains("leaves"));
}

#[test]
fn best_score_is_minimal_over_dataset() {
    let matrix = read_character_matrix(&PathBuf::from("./data/morph_chars.fasta")).unwrap();
    let topologies = read_topologies(&PathBuf::from("./data/rooted_trees.txt")).unwrap();
    let scorer = ParsimonyScorer::new(matrix);

    let best = scorer.best_tree(&topologies).unwrap();
    assert!(best.failed.is_empty());
    assert!(topologies.contains(&best.topology));
    for topology in &topologies {
        assert!(best.score <= scorer.score_topology(topology).unwrap());
    }
}

#[test]
fn coded_trees_score_like_named_trees() {
    let matrix = read_character_matrix(&PathBuf::from("./data/morph_chars.fasta")).unwrap();
    let coded = read_topologies(&PathBuf::from("./data/rooted_coded_trees.txt")).unwrap();
    let taxa = matrix.taxa().to_vec();

    let named = ParsimonyScorer::new(matrix.clone());
    let renamed = ParsimonyScorer::new(matrix).leaf_names(taxa);

    assert_eq!(
        renamed.score_topology(&coded[1]).unwrap(),
        named
            .score_topology("((gorilla, human), ((chimp, orangutan), (gibbon, macaque)));")
            .unwrap()
    );
}
