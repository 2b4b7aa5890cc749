//! Data access layer for the weather dataset.
//!
//! The dataset is a SQLite file opened read-only behind a connection pool.
//! Handlers never touch the pool directly: they open a [`Session`], which holds
//! one pooled connection for the duration of a request and hands it back to
//! the pool when dropped.

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::error::{Result, SurfsUpError};

/// Aggregate temperature statistics over a date window
#[derive(Debug, Clone, Copy, PartialEq, sqlx::FromRow)]
pub struct TemperatureStats {
    /// Lowest observed temperature, None when no row matched
    pub min: Option<f64>,
    /// Mean observed temperature, None when no row matched
    pub avg: Option<f64>,
    /// Highest observed temperature, None when no row matched
    pub max: Option<f64>,
    /// Number of measurement rows inside the window
    pub count: i64,
}

/// Pooled handle on the dataset, cheap to clone
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the dataset file read-only and build the connection pool
    pub async fn connect(path: &Path, config: &DatabaseConfig) -> Result<Self> {
        if !path.exists() {
            return Err(SurfsUpError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Dataset not found: {}", path.display()),
            )));
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_with(options)
            .await?;

        info!(
            path = %path.display(),
            max_connections = config.max_connections,
            "Opened dataset connection pool"
        );

        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Acquire a connection for the lifetime of one request
    pub async fn session(&self) -> Result<Session> {
        let conn = self.pool.acquire().await?;
        Ok(Session { conn })
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// One request's hold on a pooled connection.
///
/// Queries run as separate statements on that connection.
pub struct Session {
    conn: PoolConnection<Sqlite>,
}

impl Session {
    /// All (date, precipitation) pairs in row order
    pub async fn precipitation(&mut self) -> Result<Vec<(String, Option<f64>)>> {
        let rows = sqlx::query_as::<_, (String, Option<f64>)>(
            "SELECT date, CAST(prcp AS REAL) FROM measurement",
        )
        .fetch_all(&mut *self.conn)
        .await?;

        debug!(rows = rows.len(), "Fetched precipitation rows");
        Ok(rows)
    }

    /// Identifier of every station row, in row order
    pub async fn station_ids(&mut self) -> Result<Vec<String>> {
        let ids = sqlx::query_scalar::<_, String>("SELECT station FROM station")
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(ids)
    }

    /// Lexicographically greatest measurement date
    pub async fn latest_measurement_date(&mut self) -> Result<Option<String>> {
        let date = sqlx::query_scalar::<_, String>(
            "SELECT date FROM measurement ORDER BY date DESC LIMIT 1",
        )
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(date)
    }

    /// Station with the most measurement rows
    pub async fn most_active_station(&mut self) -> Result<Option<String>> {
        let station = sqlx::query_scalar::<_, String>(
            "SELECT station FROM measurement \
             GROUP BY station \
             ORDER BY COUNT(station) DESC \
             LIMIT 1",
        )
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(station)
    }

    /// (date, temperature) pairs for one station on or after `cutoff`
    pub async fn temperatures_since(
        &mut self,
        station: &str,
        cutoff: &str,
    ) -> Result<Vec<(String, Option<f64>)>> {
        let rows = sqlx::query_as::<_, (String, Option<f64>)>(
            "SELECT date, CAST(tobs AS REAL) FROM measurement \
             WHERE station = ?1 AND date >= ?2",
        )
        .bind(station)
        .bind(cutoff)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    /// Min/avg/max temperature over `start <= date` and, when given, `date <= end`.
    ///
    /// Bounds are `YYYY-MM-DD` text compared against the text `date` column.
    pub async fn temperature_summary(
        &mut self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureStats> {
        let stats = sqlx::query_as::<_, TemperatureStats>(
            "SELECT CAST(MIN(tobs) AS REAL) AS min, \
                    CAST(AVG(tobs) AS REAL) AS avg, \
                    CAST(MAX(tobs) AS REAL) AS max, \
                    COUNT(*) AS count \
             FROM measurement \
             WHERE date >= ?1 AND (?2 IS NULL OR date <= ?2)",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(stats)
    }

    /// Total number of measurement rows
    pub async fn measurement_count(&mut self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM measurement")
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(count)
    }

    /// Total number of station rows
    pub async fn station_count(&mut self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM station")
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(count)
    }

    /// Column names of `table`, empty when the table does not exist
    pub async fn table_columns(&mut self, table: &str) -> Result<Vec<String>> {
        let columns =
            sqlx::query_scalar::<_, String>("SELECT name FROM pragma_table_info(?1)")
                .bind(table)
                .fetch_all(&mut *self.conn)
                .await?;
        Ok(columns)
    }
}
