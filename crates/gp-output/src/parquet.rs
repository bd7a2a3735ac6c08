//! Parquet store.
//!
//! Creates two files in the output directory:
//! - `run_series.parquet` — every run's series, keyed by the `run` column
//! - `quantile_tables.parquet` — all seven tables, keyed by `quantile`
//!
//! Sentinel steps become Parquet nulls.
//!
//! `finish()` **must** be called to write the Parquet file footers; files
//! written without calling `finish()` cannot be opened by Parquet readers.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Builder, StringBuilder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field as ArrowField, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use gp_core::StepNumber;
use gp_stats::{Field, QuantileTable, RunSeries};

use crate::OutputResult;
use crate::writer::StatsWriter;

fn series_schema() -> Arc<Schema> {
    let mut fields = vec![
        ArrowField::new("run",         DataType::Utf8,   false),
        ArrowField::new("step_index",  DataType::UInt64, false),
        ArrowField::new("step_number", DataType::UInt64, false),
        ArrowField::new("time",            DataType::Float64, true),
        ArrowField::new("disk_mass",       DataType::Float64, true),
        ArrowField::new("disk_mass_above", DataType::Float64, true),
        ArrowField::new("disk_mass_below", DataType::Float64, true),
    ];
    for name in ["npart", "npart_above", "npart_below"] {
        fields.push(ArrowField::new(name, DataType::UInt32, true));
    }
    Arc::new(Schema::new(fields))
}

fn quantile_schema() -> Arc<Schema> {
    let mut fields = vec![
        ArrowField::new("quantile",    DataType::Utf8,   false),
        ArrowField::new("step_index",  DataType::UInt64, false),
        ArrowField::new("step_number", DataType::UInt64, false),
    ];
    for field in Field::ALL {
        fields.push(ArrowField::new(field.name(), DataType::Float64, true));
    }
    Arc::new(Schema::new(fields))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes the statistics bundle to two Parquet files.
pub struct ParquetStore {
    series:          Option<ArrowWriter<File>>,
    quantiles:       Option<ArrowWriter<File>>,
    series_schema:   Arc<Schema>,
    quantile_schema: Arc<Schema>,
}

impl ParquetStore {
    /// Create both Parquet files in `dir`, truncating earlier output.
    pub fn create(dir: &Path) -> OutputResult<Self> {
        let series_schema = series_schema();
        let quantile_schema = quantile_schema();

        let series_file = File::create(dir.join("run_series.parquet"))?;
        let series = ArrowWriter::try_new(
            series_file,
            Arc::clone(&series_schema),
            Some(snappy_props()),
        )?;

        let quantile_file = File::create(dir.join("quantile_tables.parquet"))?;
        let quantiles = ArrowWriter::try_new(
            quantile_file,
            Arc::clone(&quantile_schema),
            Some(snappy_props()),
        )?;

        Ok(Self {
            series: Some(series),
            quantiles: Some(quantiles),
            series_schema,
            quantile_schema,
        })
    }
}

impl StatsWriter for ParquetStore {
    fn write_run_series(
        &mut self,
        run:         &str,
        steps:       &[StepNumber],
        series_data: &RunSeries,
    ) -> OutputResult<()> {
        let Some(writer) = self.series.as_mut() else {
            return Ok(());
        };

        let mut runs         = StringBuilder::new();
        let mut step_indices = UInt64Builder::new();
        let mut step_numbers = UInt64Builder::new();
        let mut times        = Float64Builder::new();
        let mut masses       = Float64Builder::new();
        let mut masses_above = Float64Builder::new();
        let mut masses_below = Float64Builder::new();
        let mut nparts       = UInt32Builder::new();
        let mut nparts_above = UInt32Builder::new();
        let mut nparts_below = UInt32Builder::new();

        for (idx, (step, record)) in steps.iter().zip(series_data.records()).enumerate() {
            runs.append_value(run);
            step_indices.append_value(idx as u64);
            step_numbers.append_value(step.0);
            times.append_option(record.map(|r| r.time));
            masses.append_option(record.map(|r| r.disk_mass));
            masses_above.append_option(record.map(|r| r.disk_mass_above));
            masses_below.append_option(record.map(|r| r.disk_mass_below));
            nparts.append_option(record.map(|r| r.npart));
            nparts_above.append_option(record.map(|r| r.npart_above));
            nparts_below.append_option(record.map(|r| r.npart_below));
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.series_schema),
            vec![
                Arc::new(runs.finish()),
                Arc::new(step_indices.finish()),
                Arc::new(step_numbers.finish()),
                Arc::new(times.finish()),
                Arc::new(masses.finish()),
                Arc::new(masses_above.finish()),
                Arc::new(masses_below.finish()),
                Arc::new(nparts.finish()),
                Arc::new(nparts_above.finish()),
                Arc::new(nparts_below.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_quantile_table(
        &mut self,
        steps: &[StepNumber],
        table: &QuantileTable,
    ) -> OutputResult<()> {
        let Some(writer) = self.quantiles.as_mut() else {
            return Ok(());
        };

        let mut keys         = StringBuilder::new();
        let mut step_indices = UInt64Builder::new();
        let mut step_numbers = UInt64Builder::new();
        let mut values: Vec<Float64Builder> =
            (0..Field::COUNT).map(|_| Float64Builder::new()).collect();

        for (idx, (step, record)) in steps.iter().zip(&table.records).enumerate() {
            keys.append_value(table.level.key());
            step_indices.append_value(idx as u64);
            step_numbers.append_value(step.0);
            for (builder, field) in values.iter_mut().zip(Field::ALL) {
                builder.append_option(record.get(field));
            }
        }

        let mut columns: Vec<arrow::array::ArrayRef> = vec![
            Arc::new(keys.finish()),
            Arc::new(step_indices.finish()),
            Arc::new(step_numbers.finish()),
        ];
        for mut builder in values {
            columns.push(Arc::new(builder.finish()));
        }

        let batch = RecordBatch::try_new(Arc::clone(&self.quantile_schema), columns)?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.series.take() {
            w.close()?;
        }
        if let Some(w) = self.quantiles.take() {
            w.close()?;
        }
        Ok(())
    }
}
