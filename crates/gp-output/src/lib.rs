//! `gp-output` — persistence for the genga-post statistics bundle.
//!
//! Three backends implement [`StatsWriter`]:
//!
//! | Backend    | Files created in the output directory                      |
//! |------------|------------------------------------------------------------|
//! | SQLite     | `stats.db`                                                 |
//! | CSV        | `run_<name>.csv` per run, `quantile_<key>.csv` per level   |
//! | Parquet    | `run_series.parquet`, `quantile_tables.parquet`            |
//!
//! All backends open in overwrite mode: a pre-existing container is
//! replaced, never appended to.  There is no transactional guarantee across
//! the whole bundle — an interrupted write leaves a partial container and
//! the caller re-runs the pipeline.

pub mod csv;
pub mod error;
pub mod parquet;
pub mod sqlite;
pub mod writer;


pub use csv::CsvStore;
pub use error::{OutputError, OutputResult};
pub use parquet::ParquetStore;
pub use sqlite::SqliteStore;
pub use writer::{StatsWriter, persist_bundle};
