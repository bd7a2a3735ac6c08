//! Unit and pipeline tests for gp-stats.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use gp_core::{StatsConfig, StepNumber, units};

use crate::dispatch::{RunTask, dispatch};
use crate::error::StatsError;
use crate::extract::extract_run;
use crate::pipeline::run_pipeline;
use crate::quantile::{QuantileLevel, quantile, reduce};
use crate::series::{Field, RunCollection, RunSeries, StepStats};

// ── Fixtures ──────────────────────────────────────────────────────────────────

/// Write one synthetic snapshot: all bodies on a circular 1 AU orbit, with
/// the given `(id, mass in M⊕)` pairs.
fn write_snapshot(dir: &Path, run: &str, step: u64, time: f64, bodies: &[(u32, f64)]) {
    let mut text = String::new();
    for &(id, mass) in bodies {
        text.push_str(&format!("{time} {id} {mass} 1e-5 1.0 0.0 0.0 0.0 1.0 0.0\n"));
    }
    let path = gp_io::snapshot_path(dir, run, StepNumber(step));
    fs::write(path, text).unwrap();
}

/// Three-step run directory with two small bodies per snapshot.
fn make_run(run: &str, masses: &[(u32, f64)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for step in [0u64, 1000, 2000] {
        write_snapshot(dir.path(), run, step, step as f64, masses);
    }
    dir
}

fn steps() -> Vec<StepNumber> {
    vec![StepNumber(0), StepNumber(1000), StepNumber(2000)]
}

// ── Extractor ─────────────────────────────────────────────────────────────────

mod extract_tests {
    use super::*;

    #[test]
    fn known_masses_scenario() {
        // Two bodies: 1e23 kg and 3e23 kg, straddling the 2e23 kg cutoff.
        let m_lo = units::kg_to_mearth(1.0e23);
        let m_hi = units::kg_to_mearth(3.0e23);
        let dir = make_run("run_01", &[(1, m_lo), (2, m_hi)]);

        let config = StatsConfig::default();
        let series = extract_run(dir.path(), "run_01", &steps(), &config);

        let rec = series.get(0).expect("step 0 should load");
        assert_eq!(rec.time, 0.0);
        assert!((rec.disk_mass - (m_lo + m_hi)).abs() < 1e-12);
        assert!((rec.disk_mass_above - m_hi).abs() < 1e-12);
        assert!((rec.disk_mass_below - m_lo).abs() < 1e-12);
        assert_eq!(rec.npart, 2);
        assert_eq!(rec.npart_above, 1);
        assert_eq!(rec.npart_below, 1);
    }

    #[test]
    fn missing_step_is_sentinel_and_length_preserved() {
        let dir = tempfile::tempdir().unwrap();
        // Steps 0 and 1000 exist; 2000 was never written.
        for step in [0u64, 1000] {
            write_snapshot(dir.path(), "run_01", step, step as f64, &[(1, 0.01)]);
        }

        let series = extract_run(dir.path(), "run_01", &steps(), &StatsConfig::default());

        assert_eq!(series.len(), 3);
        assert!(series.get(0).is_some());
        assert!(series.get(1).is_some());
        assert!(series.get(2).is_none());
    }

    #[test]
    fn malformed_snapshot_is_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        write_snapshot(dir.path(), "run_01", 0, 0.0, &[(1, 0.01)]);
        fs::write(
            gp_io::snapshot_path(dir.path(), "run_01", StepNumber(1000)),
            "this is not a snapshot\n",
        )
        .unwrap();

        let series = extract_run(dir.path(), "run_01", &steps(), &StatsConfig::default());

        assert!(series.get(0).is_some());
        assert!(series.get(1).is_none());
        assert!(series.get(2).is_none());
    }

    #[test]
    fn bodies_above_ceiling_excluded_everywhere() {
        let dir = tempfile::tempdir().unwrap();
        // One star-like sentinel (333 000 M⊕), one giant above the 12 M⊕
        // ceiling, two ordinary disk bodies.
        write_snapshot(
            dir.path(),
            "run_01",
            0,
            0.0,
            &[(0, 333_000.0), (1, 13.0), (2, 0.01), (3, 1.0)],
        );

        let series = extract_run(dir.path(), "run_01", &[StepNumber(0)], &StatsConfig::default());
        let rec = series.get(0).unwrap();

        assert_eq!(rec.npart, 2);
        assert!((rec.disk_mass - 1.01).abs() < 1e-12);
        assert_eq!(rec.npart_above + rec.npart_below, rec.npart);
    }

    #[test]
    fn partition_is_exhaustive_and_disjoint() {
        let masses: Vec<(u32, f64)> =
            (0..20u32).map(|i| (i, 0.002 * f64::from(i + 1))).collect();
        let dir = make_run("run_01", &masses);

        let series = extract_run(dir.path(), "run_01", &steps(), &StatsConfig::default());

        for idx in 0..3 {
            let rec = series.get(idx).unwrap();
            assert_eq!(rec.npart_above + rec.npart_below, rec.npart);
            assert!(
                (rec.disk_mass_above + rec.disk_mass_below - rec.disk_mass).abs() < 1e-12
            );
        }
    }
}

// ── Quantile ──────────────────────────────────────────────────────────────────

mod quantile_tests {
    use super::*;

    #[test]
    fn empty_sample_is_missing() {
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn single_sample_all_levels_equal() {
        for level in QuantileLevel::ALL {
            assert_eq!(quantile(&[7.0], level.p()), Some(7.0));
        }
    }

    #[test]
    fn linear_interpolation_matches_reference() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.0), Some(1.0));
        assert_eq!(quantile(&sorted, 0.25), Some(1.75));
        assert_eq!(quantile(&sorted, 0.5), Some(2.5));
        assert_eq!(quantile(&sorted, 1.0), Some(4.0));
    }

    #[test]
    fn levels_are_ordered_at_every_step() {
        let runs: Vec<(String, RunSeries)> = (0..5u32)
            .map(|i| {
                let records = (0..3)
                    .map(|idx| {
                        Some(StepStats {
                            time:            idx as f64,
                            disk_mass:       1.0 + f64::from(i) * 0.3 + idx as f64,
                            disk_mass_above: f64::from(i),
                            disk_mass_below: 1.0 / (f64::from(i) + 1.0),
                            npart:           10 + i,
                            npart_above:     i,
                            npart_below:     10,
                        })
                    })
                    .collect();
                (format!("run_{i:02}"), RunSeries::new(records))
            })
            .collect();
        let collection = RunCollection::new(steps(), runs);

        let tables = reduce(&collection);
        assert_eq!(tables.len(), 7);

        for step_index in 0..3 {
            for field in Field::ALL {
                let values: Vec<f64> = tables
                    .iter()
                    .map(|t| t.records[step_index].get(field).unwrap())
                    .collect();
                for pair in values.windows(2) {
                    assert!(
                        pair[0] <= pair[1] + 1e-12,
                        "levels out of order for {:?} at step {step_index}: {values:?}",
                        field.name()
                    );
                }
            }
        }
    }

    #[test]
    fn all_missing_step_yields_missing_quantiles() {
        let runs: Vec<(String, RunSeries)> = (0..3)
            .map(|i| {
                let stats = StepStats {
                    time:            0.0,
                    disk_mass:       1.0,
                    disk_mass_above: 0.5,
                    disk_mass_below: 0.5,
                    npart:           2,
                    npart_above:     1,
                    npart_below:     1,
                };
                // Step index 1 missing in every run.
                (
                    format!("run_{i:02}"),
                    RunSeries::new(vec![Some(stats), None, Some(stats)]),
                )
            })
            .collect();
        let collection = RunCollection::new(steps(), runs);

        for table in reduce(&collection) {
            for field in Field::ALL {
                assert_eq!(table.records[1].get(field), None);
                assert!(table.records[0].get(field).is_some());
                assert!(table.records[2].get(field).is_some());
            }
        }
    }

    #[test]
    fn sentinel_excluded_from_sample() {
        // Two runs with data, one missing: median over the two present values.
        let with = |mass: f64| {
            RunSeries::new(vec![Some(StepStats {
                time:            0.0,
                disk_mass:       mass,
                disk_mass_above: 0.0,
                disk_mass_below: mass,
                npart:           1,
                npart_above:     0,
                npart_below:     1,
            })])
        };
        let runs = vec![
            ("run_01".to_owned(), with(1.0)),
            ("run_02".to_owned(), RunSeries::new(vec![None])),
            ("run_03".to_owned(), with(3.0)),
        ];
        let collection = RunCollection::new(vec![StepNumber(0)], runs);

        let tables = reduce(&collection);
        let median = &tables[3];
        assert_eq!(median.level, QuantileLevel::Q50);
        assert_eq!(median.records[0].get(Field::DiskMass), Some(2.0));
    }
}

// ── Dispatcher and pipeline ───────────────────────────────────────────────────

mod pipeline_tests {
    use super::*;

    fn three_runs() -> Vec<TempDir> {
        vec![
            make_run("run_01", &[(1, 0.01), (2, 0.05)]),
            make_run("run_02", &[(1, 0.02), (2, 0.04), (3, 0.06)]),
            make_run("run_03", &[(1, 0.03)]),
        ]
    }

    fn dirs_of(runs: &[TempDir]) -> Vec<PathBuf> {
        runs.iter().map(|d| d.path().to_path_buf()).collect()
    }

    #[test]
    fn worker_count_does_not_change_results() {
        let runs = three_runs();
        let dirs = dirs_of(&runs);
        let config = StatsConfig::default();

        let sequential = run_pipeline(&dirs, &config, 1).unwrap();
        let pooled = run_pipeline(&dirs, &config, 4).unwrap();

        assert_eq!(sequential.collection, pooled.collection);
        assert_eq!(sequential.tables, pooled.tables);
    }

    #[test]
    fn collection_keyed_by_run_name_in_input_order() {
        let runs = three_runs();
        let bundle = run_pipeline(&dirs_of(&runs), &StatsConfig::default(), 1).unwrap();

        let names: Vec<&str> = bundle.collection.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["run_01", "run_02", "run_03"]);
        assert!(bundle.collection.get("run_02").is_some());
        assert!(bundle.collection.get("run_99").is_none());
    }

    #[test]
    fn shorter_run_padded_with_sentinels() {
        let full = make_run("run_01", &[(1, 0.01)]);
        // run_02 only wrote steps 0 and 1000.
        let short = tempfile::tempdir().unwrap();
        for step in [0u64, 1000] {
            write_snapshot(short.path(), "run_02", step, step as f64, &[(1, 0.02)]);
        }

        let dirs = vec![full.path().to_path_buf(), short.path().to_path_buf()];
        let bundle = run_pipeline(&dirs, &StatsConfig::default(), 1).unwrap();

        assert_eq!(bundle.collection.steps(), &steps()[..]);
        let series = bundle.collection.get("run_02").unwrap();
        assert_eq!(series.len(), 3);
        assert!(series.get(2).is_none());
    }

    #[test]
    fn all_series_share_global_length() {
        let runs = three_runs();
        let bundle = run_pipeline(&dirs_of(&runs), &StatsConfig::default(), 2).unwrap();

        let n = bundle.collection.steps().len();
        for (_, series) in bundle.collection.iter() {
            assert_eq!(series.len(), n);
        }
        for table in &bundle.tables {
            assert_eq!(table.records.len(), n);
        }
    }

    #[test]
    fn empty_directory_aborts_batch() {
        let good = make_run("run_01", &[(1, 0.01)]);
        let empty = tempfile::tempdir().unwrap();

        let dirs = vec![good.path().to_path_buf(), empty.path().to_path_buf()];
        let err = run_pipeline(&dirs, &StatsConfig::default(), 1).unwrap_err();
        assert!(matches!(err, StatsError::Scan { .. }));
    }

    #[test]
    fn duplicate_run_name_aborts_batch() {
        let a = make_run("run_01", &[(1, 0.01)]);
        let b = make_run("run_01", &[(1, 0.02)]);

        let dirs = vec![a.path().to_path_buf(), b.path().to_path_buf()];
        let err = run_pipeline(&dirs, &StatsConfig::default(), 1).unwrap_err();
        assert!(matches!(err, StatsError::DuplicateRun(name) if name == "run_01"));
    }

    #[test]
    fn no_input_is_an_error() {
        assert!(matches!(
            run_pipeline(&[], &StatsConfig::default(), 1),
            Err(StatsError::NoInput)
        ));
    }

    #[test]
    fn dispatch_preserves_input_order_with_pool() {
        let runs = three_runs();
        let tasks: Vec<RunTask> = runs
            .iter()
            .zip(["run_01", "run_02", "run_03"])
            .map(|(dir, run)| RunTask {
                dir: dir.path().to_path_buf(),
                run: run.to_owned(),
            })
            .collect();

        let out = dispatch(&tasks, &steps(), &StatsConfig::default(), 4).unwrap();
        let names: Vec<&str> = out.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["run_01", "run_02", "run_03"]);
    }
}
