//! CSV store.
//!
//! Creates one `run_<name>.csv` per run and one `quantile_<key>.csv` per
//! level in the output directory.  Sentinel steps are written with empty
//! value fields.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::Writer;

use gp_core::StepNumber;
use gp_stats::{Field, QuantileTable, RunSeries};

use crate::OutputResult;
use crate::writer::StatsWriter;

/// Writes the statistics bundle to a directory of CSV files.
pub struct CsvStore {
    dir:     PathBuf,
    open:    Vec<Writer<File>>,
    finished: bool,
}

impl CsvStore {
    /// Use `dir` as the output directory.  Files are created lazily, one
    /// per run and per quantile level, truncating earlier output.
    pub fn create(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir:      dir.to_path_buf(),
            open:     Vec::new(),
            finished: false,
        })
    }

    fn new_table(&self, file_name: &str) -> OutputResult<Writer<File>> {
        let mut writer = Writer::from_path(self.dir.join(file_name))?;

        let mut header = vec!["step_index", "step_number"];
        header.extend(Field::ALL.iter().map(|f| f.name()));
        writer.write_record(&header)?;

        Ok(writer)
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl StatsWriter for CsvStore {
    fn write_run_series(
        &mut self,
        run:    &str,
        steps:  &[StepNumber],
        series: &RunSeries,
    ) -> OutputResult<()> {
        let mut writer = self.new_table(&format!("run_{run}.csv"))?;

        for (idx, (step, record)) in steps.iter().zip(series.records()).enumerate() {
            let mut row = vec![idx.to_string(), step.0.to_string()];
            match record {
                Some(r) => {
                    row.push(r.time.to_string());
                    row.push(r.disk_mass.to_string());
                    row.push(r.disk_mass_above.to_string());
                    row.push(r.disk_mass_below.to_string());
                    row.push(r.npart.to_string());
                    row.push(r.npart_above.to_string());
                    row.push(r.npart_below.to_string());
                }
                None => row.extend(std::iter::repeat_n(String::new(), Field::COUNT)),
            }
            writer.write_record(&row)?;
        }
        self.open.push(writer);
        Ok(())
    }

    fn write_quantile_table(
        &mut self,
        steps: &[StepNumber],
        table: &QuantileTable,
    ) -> OutputResult<()> {
        let mut writer = self.new_table(&format!("quantile_{}.csv", table.level.key()))?;

        for (idx, (step, record)) in steps.iter().zip(&table.records).enumerate() {
            let mut row = vec![idx.to_string(), step.0.to_string()];
            row.extend(Field::ALL.iter().map(|&f| fmt_opt(record.get(f))));
            writer.write_record(&row)?;
        }
        self.open.push(writer);
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        for writer in &mut self.open {
            writer.flush()?;
        }
        Ok(())
    }
}
