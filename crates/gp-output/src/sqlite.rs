//! SQLite store — the primary single-file container.
//!
//! Creates `stats.db` in the output directory with two tables:
//! `run_series` (keyed by run name + step index) and `quantile_tables`
//! (keyed by quantile level + step index).  Sentinel steps are stored as
//! NULL in every value column.

use std::path::Path;

use rusqlite::Connection;

use gp_core::StepNumber;
use gp_stats::{Field, QuantileTable, RunSeries};

use crate::OutputResult;
use crate::writer::StatsWriter;

const DB_NAME: &str = "stats.db";

/// Writes the statistics bundle to a single SQLite database.
pub struct SqliteStore {
    conn:     Connection,
    finished: bool,
}

impl SqliteStore {
    /// Create `stats.db` in `dir`, replacing any previous container.
    pub fn create(dir: &Path) -> OutputResult<Self> {
        let path = dir.join(DB_NAME);

        // Overwrite mode: drop the old container and its WAL sidecars.
        for name in [DB_NAME, "stats.db-wal", "stats.db-shm"] {
            match std::fs::remove_file(dir.join(name)) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE run_series (
                 run             TEXT    NOT NULL,
                 step_index      INTEGER NOT NULL,
                 step_number     INTEGER NOT NULL,
                 time            REAL,
                 disk_mass       REAL,
                 disk_mass_above REAL,
                 disk_mass_below REAL,
                 npart           INTEGER,
                 npart_above     INTEGER,
                 npart_below     INTEGER,
                 PRIMARY KEY (run, step_index)
             );
             CREATE TABLE quantile_tables (
                 quantile        TEXT    NOT NULL,
                 step_index      INTEGER NOT NULL,
                 step_number     INTEGER NOT NULL,
                 time            REAL,
                 disk_mass       REAL,
                 disk_mass_above REAL,
                 disk_mass_below REAL,
                 npart           REAL,
                 npart_above     REAL,
                 npart_below     REAL,
                 PRIMARY KEY (quantile, step_index)
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl StatsWriter for SqliteStore {
    fn write_run_series(
        &mut self,
        run:    &str,
        steps:  &[StepNumber],
        series: &RunSeries,
    ) -> OutputResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO run_series \
                 (run, step_index, step_number, time, disk_mass, disk_mass_above, \
                  disk_mass_below, npart, npart_above, npart_below) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for (idx, (step, record)) in steps.iter().zip(series.records()).enumerate() {
                stmt.execute(rusqlite::params![
                    run,
                    idx as i64,
                    step.0 as i64,
                    record.map(|r| r.time),
                    record.map(|r| r.disk_mass),
                    record.map(|r| r.disk_mass_above),
                    record.map(|r| r.disk_mass_below),
                    record.map(|r| i64::from(r.npart)),
                    record.map(|r| i64::from(r.npart_above)),
                    record.map(|r| i64::from(r.npart_below)),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_quantile_table(
        &mut self,
        steps: &[StepNumber],
        table: &QuantileTable,
    ) -> OutputResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO quantile_tables \
                 (quantile, step_index, step_number, time, disk_mass, disk_mass_above, \
                  disk_mass_below, npart, npart_above, npart_below) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for (idx, (step, record)) in steps.iter().zip(&table.records).enumerate() {
                stmt.execute(rusqlite::params![
                    table.level.key(),
                    idx as i64,
                    step.0 as i64,
                    record.get(Field::Time),
                    record.get(Field::DiskMass),
                    record.get(Field::DiskMassAbove),
                    record.get(Field::DiskMassBelow),
                    record.get(Field::Npart),
                    record.get(Field::NpartAbove),
                    record.get(Field::NpartBelow),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
