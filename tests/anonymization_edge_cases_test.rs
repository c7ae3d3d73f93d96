//! Edge case tests for the anonymization engine
//!
//! Client populations are generated with `fake` so the invariants are checked
//! over many shapes of data rather than a single fixture.

use fake::faker::name::en::{FirstName, LastName, Name};
use fake::Fake;
use posanon::anonymization::engine::removal_count;
use posanon::anonymization::{AnonymizationConfig, AnonymizationEngine, NamePool, VendorPool};
use posanon::domain::Dataset;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::{BTreeSet, HashMap, HashSet};

const SENTINEL: &str = "PASSAGE passage";

fn create_test_engine(removal_fraction: f64, seed: u64) -> AnonymizationEngine {
    let mut rng = StdRng::seed_from_u64(1000);
    let last_names: Vec<String> = (0..20).map(|_| LastName().fake_with_rng(&mut rng)).collect();
    let first_names: Vec<String> = (0..20).map(|_| FirstName().fake_with_rng(&mut rng)).collect();

    let config = AnonymizationConfig {
        removal_fraction,
        seed,
        ..AnonymizationConfig::default()
    };
    AnonymizationEngine::new(
        config,
        VendorPool::new((1..=6).map(|i| format!("V{i:03}")).collect()).unwrap(),
        NamePool::new(last_names, first_names).unwrap(),
    )
    .expect("Failed to create engine")
}

/// Builds a shuffled export with `clients` distinct clients and `walk_ins` sentinel rows
fn generate_dataset(rng: &mut StdRng, clients: usize, walk_ins: usize) -> Dataset {
    let mut names = BTreeSet::new();
    while names.len() < clients {
        names.insert(Name().fake_with_rng::<String, _>(rng));
    }

    let mut rows: Vec<Vec<String>> = Vec::new();
    for name in &names {
        let purchases: usize = (1..5).fake_with_rng(rng);
        for _ in 0..purchases {
            rows.push(vec![name.clone(), "ORIG".to_string()]);
        }
    }
    for _ in 0..walk_ins {
        rows.push(vec![SENTINEL.to_string(), "ORIG".to_string()]);
    }
    rows.shuffle(rng);

    for (ticket, row) in rows.iter_mut().enumerate() {
        row.insert(0, ticket.to_string());
    }

    Dataset::from_rows(
        vec!["Ticket".into(), "Client".into(), "RefVendeur".into()],
        rows,
    )
    .unwrap()
}

#[test]
fn test_removal_count_over_generated_populations() {
    let mut rng = StdRng::seed_from_u64(1);

    for round in 0..20 {
        let clients: usize = (1..40).fake_with_rng(&mut rng);
        let data = generate_dataset(&mut rng, clients, round % 3);
        let engine = create_test_engine(0.5, round as u64);

        let removed = engine.select_removed_clients(&data).unwrap();
        assert_eq!(
            removed.len(),
            removal_count(clients, 0.5),
            "round {round}: {clients} clients"
        );
        assert!(!removed.iter().any(|c| c == SENTINEL));

        let unique: HashSet<&String> = removed.iter().collect();
        assert_eq!(unique.len(), removed.len(), "sampling is without replacement");
    }
}

#[test]
fn test_removal_is_all_or_nothing_per_client() {
    let mut rng = StdRng::seed_from_u64(2);
    let data = generate_dataset(&mut rng, 25, 10);
    let engine = create_test_engine(0.4, 7);

    let outcome = engine.anonymize(&data, &mut rng).unwrap();
    let removed: HashSet<&str> = outcome.removed_clients.iter().map(String::as_str).collect();

    let kept_rows = data
        .column_values(1)
        .filter(|c| !removed.contains(c))
        .count();
    assert_eq!(outcome.dataset.len(), kept_rows);
    assert_eq!(outcome.summary.removed_rows, data.len() - kept_rows);
}

#[test]
fn test_ticket_order_preserved() {
    let mut rng = StdRng::seed_from_u64(3);
    let data = generate_dataset(&mut rng, 15, 5);
    let engine = create_test_engine(0.5, 11);

    let outcome = engine.anonymize(&data, &mut rng).unwrap();
    let removed: HashSet<&str> = outcome.removed_clients.iter().map(String::as_str).collect();

    let expected: Vec<&str> = data
        .records()
        .iter()
        .filter(|r| !removed.contains(r.get(1).unwrap()))
        .map(|r| r.get(0).unwrap())
        .collect();
    let actual: Vec<&str> = outcome.dataset.column_values(0).collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_sentinel_survives_every_seed() {
    let mut rng = StdRng::seed_from_u64(4);
    let data = generate_dataset(&mut rng, 12, 6);

    for seed in 0..30 {
        let engine = create_test_engine(1.0, seed);
        let outcome = engine.anonymize(&data, &mut rng).unwrap();

        assert_eq!(outcome.dataset.len(), 6, "seed {seed}");
        assert!(outcome.dataset.column_values(1).all(|c| c == SENTINEL));
    }
}

#[test]
fn test_removal_depends_only_on_seed() {
    let mut rng = StdRng::seed_from_u64(5);
    let data = generate_dataset(&mut rng, 30, 4);
    let engine = create_test_engine(0.5, 42);

    let mut first_rng = StdRng::seed_from_u64(100);
    let mut second_rng = StdRng::seed_from_u64(200);
    let first = engine.anonymize(&data, &mut first_rng).unwrap();
    let second = engine.anonymize(&data, &mut second_rng).unwrap();

    assert_eq!(
        first.removed_clients, second.removed_clients,
        "assignment randomness must not influence removal"
    );

    let other = create_test_engine(0.5, 43);
    assert_ne!(
        other.select_removed_clients(&data).unwrap(),
        first.removed_clients,
        "a different seed should pick a different sample"
    );
}

#[test]
fn test_renaming_is_a_consistent_mapping() {
    let mut rng = StdRng::seed_from_u64(6);
    let data = generate_dataset(&mut rng, 20, 3);
    let engine = create_test_engine(0.0, 0);

    let outcome = engine.anonymize(&data, &mut rng).unwrap();
    assert_eq!(outcome.dataset.len(), data.len());

    let mut mapping: HashMap<&str, &str> = HashMap::new();
    for (before, after) in data.records().iter().zip(outcome.dataset.records()) {
        let original = before.get(1).unwrap();
        let synthetic = after.get(1).unwrap();
        if original == SENTINEL {
            assert_eq!(synthetic, SENTINEL);
            continue;
        }
        assert_eq!(
            *mapping.entry(original).or_insert(synthetic),
            synthetic,
            "all rows of {original} should share one synthetic name"
        );
        assert!(synthetic.contains(' '), "synthetic name is '<last> <first>'");
    }
    assert_eq!(outcome.summary.renamed_clients, 20);
}

#[test]
fn test_vendor_codes_come_from_pool() {
    let mut rng = StdRng::seed_from_u64(7);
    let data = generate_dataset(&mut rng, 10, 10);
    let engine = create_test_engine(0.3, 3);

    let outcome = engine.anonymize(&data, &mut rng).unwrap();
    let pool: Vec<String> = (1..=6).map(|i| format!("V{i:03}")).collect();

    assert!(outcome
        .dataset
        .column_values(2)
        .all(|code| pool.iter().any(|p| p == code)));
}

#[test]
fn test_only_walk_in_rows() {
    let mut rng = StdRng::seed_from_u64(8);
    let data = generate_dataset(&mut rng, 0, 5);
    let engine = create_test_engine(0.5, 1);

    let outcome = engine.anonymize(&data, &mut rng).unwrap();

    assert_eq!(outcome.dataset.len(), 5);
    assert_eq!(outcome.summary.distinct_clients, 0);
    assert_eq!(outcome.summary.removed_clients, 0);
    assert_eq!(outcome.summary.renamed_clients, 0);
}

#[test]
fn test_single_client_half_fraction_keeps_client() {
    let mut rng = StdRng::seed_from_u64(9);
    let data = generate_dataset(&mut rng, 1, 0);
    let engine = create_test_engine(0.5, 1);

    let outcome = engine.anonymize(&data, &mut rng).unwrap();

    assert!(outcome.removed_clients.is_empty(), "floor(0.5 × 1) = 0");
    assert_eq!(outcome.dataset.len(), data.len());
    assert_eq!(
        outcome.dataset.column_values(1).collect::<Vec<_>>(),
        data.column_values(1).collect::<Vec<_>>(),
        "no walk-in rows, so the name is kept"
    );
}
