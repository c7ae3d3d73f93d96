//! Client anonymization engine
//!
//! This module provides the [`AnonymizationEngine`] that filters and
//! anonymizes a point-of-sale [`Dataset`]:
//!
//! 1. Distinct clients (walk-in sentinel excluded) are sampled without
//!    replacement using a fixed seed; every row of a sampled client is removed.
//! 2. Vendor references are replaced with random codes from a [`VendorPool`]:
//!    one code per client, or one code per row for the walk-in sentinel.
//! 3. When walk-in rows remain, every other client gets a synthetic
//!    `"<last name> <first name>"` drawn from a [`NamePool`].
//!
//! Step 1 depends only on the seed. Steps 2 and 3 draw from the random source
//! passed to [`AnonymizationEngine::anonymize`].
//!
//! # Examples
//!
//! ```
//! use posanon::anonymization::{AnonymizationConfig, AnonymizationEngine, NamePool, VendorPool};
//! use posanon::domain::Dataset;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! # fn example() -> posanon::domain::Result<()> {
//! let vendors = VendorPool::new(vec!["V1".into(), "V2".into()])?;
//! let names = NamePool::new(vec!["MARTIN".into()], vec!["Louise".into()])?;
//! let engine = AnonymizationEngine::new(AnonymizationConfig::default(), vendors, names)?;
//!
//! let dataset = Dataset::from_rows(
//!     vec!["Client".into(), "RefVendeur".into()],
//!     vec![vec!["DUPONT Marie".into(), "ABC".into()]],
//! )?;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let outcome = engine.anonymize(&dataset, &mut rng)?;
//! println!("{} rows kept", outcome.dataset.len());
//! # Ok(())
//! # }
//! ```

use crate::anonymization::config::AnonymizationConfig;
use crate::anonymization::pools::{NamePool, VendorPool};
use crate::anonymization::report::AnonymizationSummary;
use crate::domain::{Dataset, PosanonError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};

/// Result of one anonymization pass
#[derive(Debug, Clone)]
pub struct AnonymizedDataset {
    /// Filtered and anonymized records
    pub dataset: Dataset,

    /// Counters for the pass
    pub summary: AnonymizationSummary,

    /// Original identities of the removed clients, in first-appearance order
    ///
    /// Only meant for hashing into the audit log.
    pub removed_clients: Vec<String>,
}

/// Column positions resolved for one dataset
#[derive(Debug, Clone, Copy)]
struct Columns {
    client: usize,
    vendor: usize,
}

/// Client sampling and vendor/name substitution
pub struct AnonymizationEngine {
    config: AnonymizationConfig,
    vendors: VendorPool,
    names: NamePool,
}

impl AnonymizationEngine {
    /// Create a new engine from a configuration and ready pools
    ///
    /// # Errors
    ///
    /// Returns [`PosanonError::Validation`] if the configuration does not
    /// validate or the name pool can only produce the walk-in marker.
    pub fn new(config: AnonymizationConfig, vendors: VendorPool, names: NamePool) -> Result<Self> {
        config.validate()?;
        if !names.can_synthesize_other_than(&config.sentinel) {
            return Err(PosanonError::Validation(format!(
                "name pool can only synthesize the walk-in marker '{}'",
                config.sentinel
            )));
        }
        Ok(Self {
            config,
            vendors,
            names,
        })
    }

    /// Create an engine, building the vendor pool and loading the name pool file
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::PosanonError::EmptyPool`] for empty pools, or an
    /// I/O / serialization error when the name pool cannot be loaded.
    pub fn from_config(config: AnonymizationConfig) -> Result<Self> {
        let vendors = VendorPool::new(config.vendor_pool.clone())?;
        let names = NamePool::from_file(&config.name_pool)?;
        Self::new(config, vendors, names)
    }

    /// The engine's configuration
    pub fn config(&self) -> &AnonymizationConfig {
        &self.config
    }

    /// Clients selected for removal, in first-appearance order
    ///
    /// Deterministic for a given dataset and seed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::PosanonError::MissingField`] when the client column is absent.
    pub fn select_removed_clients(&self, dataset: &Dataset) -> Result<Vec<String>> {
        let client = dataset.require_column(&self.config.client_column)?;
        Ok(self.sample_removed(dataset, client))
    }

    /// Filter and anonymize a dataset
    ///
    /// The input dataset is never modified; a new dataset is returned.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::PosanonError::MissingField`] when the client or
    /// vendor column is absent.
    pub fn anonymize<R: Rng + ?Sized>(
        &self,
        dataset: &Dataset,
        rng: &mut R,
    ) -> Result<AnonymizedDataset> {
        let columns = Columns {
            client: dataset.require_column(&self.config.client_column)?,
            vendor: dataset.require_column(&self.config.vendor_column)?,
        };

        let mut summary = AnonymizationSummary {
            input_rows: dataset.len(),
            removal_fraction: self.config.removal_fraction,
            seed: self.config.seed,
            ..AnonymizationSummary::default()
        };

        if dataset.is_empty() {
            tracing::info!("Dataset has no rows, nothing to anonymize");
            return Ok(AnonymizedDataset {
                dataset: dataset.clone(),
                summary,
                removed_clients: Vec::new(),
            });
        }

        summary.distinct_clients = dataset
            .distinct_values(columns.client, Some(&self.config.sentinel))
            .len();

        let removed_clients = self.sample_removed(dataset, columns.client);
        let mut output = self.remove_clients(dataset, columns.client, &removed_clients);

        summary.removed_clients = removed_clients.len();
        summary.output_rows = output.len();
        summary.removed_rows = summary.input_rows - summary.output_rows;

        let (sentinel_rows, vendor_assignments) = self.assign_vendors(&mut output, columns, rng);
        summary.sentinel_rows = sentinel_rows;
        summary.vendor_assignments = vendor_assignments;

        if sentinel_rows > 0 {
            summary.renamed_clients = self.rename_clients(&mut output, columns.client, rng);
        } else {
            tracing::debug!("No walk-in rows remain, client names kept");
        }

        tracing::info!(
            input_rows = summary.input_rows,
            output_rows = summary.output_rows,
            removed_clients = summary.removed_clients,
            renamed_clients = summary.renamed_clients,
            "Dataset anonymized"
        );

        Ok(AnonymizedDataset {
            dataset: output,
            summary,
            removed_clients,
        })
    }

    /// Seeded uniform sample of floor(fraction × count) clients
    fn sample_removed(&self, dataset: &Dataset, client: usize) -> Vec<String> {
        let candidates = dataset.distinct_values(client, Some(&self.config.sentinel));
        let count = removal_count(candidates.len(), self.config.removal_fraction);

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let sampled: HashSet<&String> = candidates.choose_multiple(&mut rng, count).collect();

        let removed: Vec<String> = candidates
            .iter()
            .filter(|c| sampled.contains(c))
            .cloned()
            .collect();

        tracing::debug!(
            candidates = candidates.len(),
            removed = removed.len(),
            seed = self.config.seed,
            "Removal sample drawn"
        );

        removed
    }

    fn remove_clients(&self, dataset: &Dataset, client: usize, removed: &[String]) -> Dataset {
        let removed: HashSet<&str> = removed.iter().map(String::as_str).collect();
        let mut output = dataset.clone();
        output.retain(|record| !removed.contains(record.get(client).unwrap_or_default()));
        output
    }

    /// Returns the number of sentinel rows and of per-client assignments
    fn assign_vendors<R: Rng + ?Sized>(
        &self,
        dataset: &mut Dataset,
        columns: Columns,
        rng: &mut R,
    ) -> (usize, usize) {
        let mut per_client: HashMap<String, String> = HashMap::new();
        let mut sentinel_rows = 0;

        for record in dataset.records_mut() {
            let client = record.get(columns.client).unwrap_or_default();
            let code = if client == self.config.sentinel {
                sentinel_rows += 1;
                self.vendors.pick(rng).to_string()
            } else {
                per_client
                    .entry(client.to_string())
                    .or_insert_with(|| self.vendors.pick(rng).to_string())
                    .clone()
            };
            record.set(columns.vendor, code);
        }

        (sentinel_rows, per_client.len())
    }

    /// Synthetic name that never equals the walk-in marker
    fn synthesize_name<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        loop {
            let name = self.names.synthesize(rng);
            if name != self.config.sentinel {
                return name;
            }
            tracing::debug!("Synthesized name matches the walk-in marker, drawing again");
        }
    }

    /// Returns the number of renamed clients
    fn rename_clients<R: Rng + ?Sized>(
        &self,
        dataset: &mut Dataset,
        client: usize,
        rng: &mut R,
    ) -> usize {
        let replacements: HashMap<String, String> = dataset
            .distinct_values(client, Some(&self.config.sentinel))
            .into_iter()
            .map(|original| (original, self.synthesize_name(rng)))
            .collect();

        for record in dataset.records_mut() {
            let replacement = record
                .get(client)
                .and_then(|original| replacements.get(original))
                .cloned();
            if let Some(name) = replacement {
                record.set(client, name);
            }
        }

        replacements.len()
    }
}

/// floor(fraction × population), capped at the population
pub fn removal_count(population: usize, fraction: f64) -> usize {
    let count = (fraction * population as f64).floor();
    if count.is_nan() || count <= 0.0 {
        0
    } else {
        (count as usize).min(population)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const SENTINEL: &str = "PASSAGE passage";

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn engine() -> AnonymizationEngine {
        let vendors = VendorPool::new(strings(&["V1", "V2", "V3", "V4"])).unwrap();
        let names = NamePool::new(
            strings(&["MARTIN", "BERNARD", "THOMAS", "PETIT", "ROBERT"]),
            strings(&["Louise", "Jules", "Emma", "Lucas", "Alice"]),
        )
        .unwrap();
        AnonymizationEngine::new(AnonymizationConfig::default(), vendors, names).unwrap()
    }

    fn dataset(clients: &[&str]) -> Dataset {
        let rows = clients
            .iter()
            .enumerate()
            .map(|(i, c)| vec![format!("T{i}"), c.to_string(), "ORIG".to_string()])
            .collect();
        Dataset::from_rows(strings(&["Ticket", "Client", "RefVendeur"]), rows).unwrap()
    }

    fn four_clients() -> Dataset {
        dataset(&["A", "B", "C", SENTINEL, "A", "B", "C", SENTINEL])
    }

    #[test_case(0, 0.5, 0)]
    #[test_case(3, 0.5, 1)]
    #[test_case(4, 0.5, 2)]
    #[test_case(7, 0.5, 3)]
    #[test_case(5, 0.0, 0)]
    #[test_case(5, 1.0, 5)]
    fn test_removal_count(population: usize, fraction: f64, expected: usize) {
        assert_eq!(removal_count(population, fraction), expected);
    }

    #[test]
    fn test_sampling_is_deterministic() {
        let engine = engine();
        let data = dataset(&["A", "B", "C", "D", "E", "F", "G", "H", SENTINEL]);
        let first = engine.select_removed_clients(&data).unwrap();
        let second = engine.select_removed_clients(&data).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
        assert!(!first.iter().any(|c| c == SENTINEL));
    }

    #[test]
    fn test_three_clients_and_sentinel() {
        let engine = engine();
        let data = four_clients();
        let mut rng = StdRng::seed_from_u64(11);

        let outcome = engine.anonymize(&data, &mut rng).unwrap();

        assert_eq!(outcome.removed_clients.len(), 1);
        assert_eq!(outcome.dataset.len(), 6);
        assert_eq!(outcome.summary.removed_rows, 2);
        assert_eq!(outcome.summary.sentinel_rows, 2);
        assert_eq!(outcome.summary.renamed_clients, 2);

        let client = outcome.dataset.require_column("Client").unwrap();
        let sentinel_rows = outcome
            .dataset
            .column_values(client)
            .filter(|c| *c == SENTINEL)
            .count();
        assert_eq!(sentinel_rows, 2);
    }

    #[test]
    fn test_vendor_consistent_per_client() {
        let engine = AnonymizationEngine::new(
            AnonymizationConfig {
                removal_fraction: 0.0,
                ..AnonymizationConfig::default()
            },
            VendorPool::new(strings(&["V1", "V2", "V3", "V4"])).unwrap(),
            NamePool::new(strings(&["X"]), strings(&["Y"])).unwrap(),
        )
        .unwrap();
        // No sentinel, so names are kept and rows can be grouped by client
        let data = dataset(&["A", "B", "A", "C", "B", "A"]);
        let mut rng = StdRng::seed_from_u64(5);

        let outcome = engine.anonymize(&data, &mut rng).unwrap();
        let out = &outcome.dataset;
        let (client, vendor) = (1, 2);

        let mut seen: HashMap<&str, &str> = HashMap::new();
        for record in out.records() {
            let c = record.get(client).unwrap();
            let v = record.get(vendor).unwrap();
            assert!(["V1", "V2", "V3", "V4"].contains(&v));
            assert_eq!(*seen.entry(c).or_insert(v), v);
        }
        assert_eq!(outcome.summary.vendor_assignments, 3);
        assert_eq!(outcome.summary.renamed_clients, 0);
    }

    #[test]
    fn test_sentinel_vendor_drawn_per_row() {
        let engine = AnonymizationEngine::new(
            AnonymizationConfig {
                removal_fraction: 0.0,
                ..AnonymizationConfig::default()
            },
            VendorPool::new(strings(&["V1", "V2", "V3", "V4", "V5", "V6", "V7", "V8"])).unwrap(),
            NamePool::new(strings(&["X"]), strings(&["Y"])).unwrap(),
        )
        .unwrap();
        let data = dataset(&[SENTINEL; 64]);
        let mut rng = StdRng::seed_from_u64(9);

        let outcome = engine.anonymize(&data, &mut rng).unwrap();
        let codes: HashSet<&str> = outcome.dataset.column_values(2).collect();

        // 64 independent draws over 8 codes cannot all agree in practice
        assert!(codes.len() > 1);
        assert!(outcome.dataset.column_values(1).all(|c| c == SENTINEL));
    }

    #[test]
    fn test_renaming_consistent_and_sentinel_untouched() {
        let engine = AnonymizationEngine::new(
            AnonymizationConfig {
                removal_fraction: 0.0,
                ..AnonymizationConfig::default()
            },
            VendorPool::new(strings(&["V1"])).unwrap(),
            NamePool::new(strings(&["MARTIN", "PETIT"]), strings(&["Emma", "Jules"])).unwrap(),
        )
        .unwrap();
        let data = dataset(&["DUPONT Marie", SENTINEL, "DUPONT Marie", "LEROY Paul", SENTINEL]);
        let mut rng = StdRng::seed_from_u64(21);

        let outcome = engine.anonymize(&data, &mut rng).unwrap();
        let out: Vec<&str> = outcome.dataset.column_values(1).collect();

        assert_eq!(out[1], SENTINEL);
        assert_eq!(out[4], SENTINEL);
        assert_eq!(out[0], out[2]);
        assert!(!out.contains(&"DUPONT Marie"));
        assert!(!out.contains(&"LEROY Paul"));
        for name in [out[0], out[3]] {
            let (last, first) = name.split_once(' ').unwrap();
            assert!(["MARTIN", "PETIT"].contains(&last));
            assert!(["Emma", "Jules"].contains(&first));
        }
        assert_eq!(outcome.summary.renamed_clients, 2);
    }

    #[test]
    fn test_sentinel_never_removed_at_full_fraction() {
        let engine = AnonymizationEngine::new(
            AnonymizationConfig {
                removal_fraction: 1.0,
                ..AnonymizationConfig::default()
            },
            VendorPool::new(strings(&["V1"])).unwrap(),
            NamePool::new(strings(&["X"]), strings(&["Y"])).unwrap(),
        )
        .unwrap();
        let data = four_clients();
        let mut rng = StdRng::seed_from_u64(0);

        let outcome = engine.anonymize(&data, &mut rng).unwrap();
        assert_eq!(outcome.dataset.len(), 2);
        assert!(outcome.dataset.column_values(1).all(|c| c == SENTINEL));
        assert_eq!(outcome.summary.renamed_clients, 0);
    }

    #[test]
    fn test_missing_vendor_column() {
        let engine = engine();
        let data = Dataset::from_rows(
            strings(&["Client", "Vendeur"]),
            vec![strings(&["A", "V"])],
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let err = engine.anonymize(&data, &mut rng).unwrap_err();
        assert!(matches!(err, PosanonError::MissingField(ref c) if c == "RefVendeur"));
    }

    #[test]
    fn test_missing_client_column() {
        let engine = engine();
        let data = Dataset::new(strings(&["Nom", "RefVendeur"]));
        assert!(matches!(
            engine.select_removed_clients(&data),
            Err(PosanonError::MissingField(_))
        ));
    }

    #[test]
    fn test_empty_dataset_unchanged() {
        let engine = engine();
        let data = Dataset::new(strings(&["Client", "RefVendeur"]));
        let mut rng = StdRng::seed_from_u64(0);

        let outcome = engine.anonymize(&data, &mut rng).unwrap();
        assert_eq!(outcome.dataset, data);
        assert_eq!(outcome.summary.output_rows, 0);
        assert!(outcome.removed_clients.is_empty());
    }

    #[test]
    fn test_input_not_modified() {
        let engine = engine();
        let data = four_clients();
        let before = data.clone();
        let mut rng = StdRng::seed_from_u64(3);

        engine.anonymize(&data, &mut rng).unwrap();
        assert_eq!(data, before);
    }

    #[test]
    fn test_invalid_fraction_rejected() {
        let result = AnonymizationEngine::new(
            AnonymizationConfig {
                removal_fraction: 1.5,
                ..AnonymizationConfig::default()
            },
            VendorPool::new(strings(&["V1"])).unwrap(),
            NamePool::new(strings(&["X"]), strings(&["Y"])).unwrap(),
        );
        assert!(matches!(result, Err(PosanonError::Validation(_))));
    }

    #[test]
    fn test_name_pool_limited_to_marker_rejected() {
        let result = AnonymizationEngine::new(
            AnonymizationConfig::default(),
            VendorPool::new(strings(&["V1"])).unwrap(),
            NamePool::new(strings(&["PASSAGE"]), strings(&["passage"])).unwrap(),
        );
        assert!(matches!(result, Err(PosanonError::Validation(_))));
    }

    #[test]
    fn test_synthesized_name_never_equals_marker() {
        let engine = AnonymizationEngine::new(
            AnonymizationConfig {
                removal_fraction: 0.0,
                ..AnonymizationConfig::default()
            },
            VendorPool::new(strings(&["V1"])).unwrap(),
            NamePool::new(strings(&["PASSAGE"]), strings(&["passage", "Emma"])).unwrap(),
        )
        .unwrap();
        let clients: Vec<String> = (0..40).map(|i| format!("CLIENT {i}")).collect();
        let mut rows: Vec<&str> = clients.iter().map(String::as_str).collect();
        rows.push(SENTINEL);
        let data = dataset(&rows);
        let mut rng = StdRng::seed_from_u64(13);

        let outcome = engine.anonymize(&data, &mut rng).unwrap();
        let out: Vec<&str> = outcome.dataset.column_values(1).collect();

        assert_eq!(out.iter().filter(|c| **c == SENTINEL).count(), 1);
        assert!(out[..40].iter().all(|c| *c == "PASSAGE Emma"));
    }
}
