//! Static description of the dataset tables this server reads.
//!
//! The dataset is owned by someone else, so nothing here creates or migrates
//! tables. At startup the declared shape is checked against the file and the
//! server refuses to start if anything is missing.

use std::time::Instant;
use tracing::debug;

use crate::db::Database;
use crate::error::{Result, SurfsUpError};
use crate::logging::{log_operation_end, log_operation_start};

/// A table and the columns the routes depend on
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

/// Daily observations, one row per station per reading
pub const MEASUREMENT: TableSchema = TableSchema {
    name: "measurement",
    columns: &["station", "date", "prcp", "tobs"],
};

/// Station metadata; only the identifier is served
pub const STATION: TableSchema = TableSchema {
    name: "station",
    columns: &["station"],
};

/// Every table the server expects to find
pub const DATASET_TABLES: [TableSchema; 2] = [MEASUREMENT, STATION];

/// Check that every declared table and column exists in the dataset
pub async fn verify_schema(db: &Database) -> Result<()> {
    let start_time = Instant::now();
    log_operation_start("schema_check", Some("measurement, station"));

    let mut session = db.session().await?;
    for table in DATASET_TABLES {
        let present = session.table_columns(table.name).await?;
        if present.is_empty() {
            log_operation_end("schema_check", start_time, false);
            return Err(SurfsUpError::Schema {
                message: format!("Table {} not found in dataset", table.name),
            });
        }

        debug!(table = table.name, columns = ?present, "Found dataset table");

        if let Some(missing) = table
            .columns
            .iter()
            .find(|column| !present.iter().any(|p| p.eq_ignore_ascii_case(column)))
        {
            log_operation_end("schema_check", start_time, false);
            return Err(SurfsUpError::Schema {
                message: format!("Table {} has no column {}", table.name, missing),
            });
        }
    }

    log_operation_end("schema_check", start_time, true);
    Ok(())
}
