//! Test data generation utilities.
//!
//! This module builds small SQLite datasets with the same tables as the
//! Hawaii weather file, filled with readings whose aggregates are known.

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};
use std::path::Path;

type Result<T> = std::result::Result<T, sqlx::Error>;

/// One measurement row: (station, date, prcp, tobs)
pub type MeasurementRow<'a> = (&'a str, &'a str, Option<f64>, Option<f64>);

/// Stations present in the standard dataset
pub const STATIONS: [&str; 3] = ["USC00519397", "USC00519281", "USC00513117"];

/// Readings for the standard dataset.
///
/// USC00519281 has the most rows. The latest date is 2017-08-23, so the
/// look-back window starts at 2016-08-23.
pub const MEASUREMENTS: [MeasurementRow<'static>; 10] = [
    ("USC00519397", "2016-08-22", Some(0.0), Some(76.0)),
    ("USC00519281", "2016-08-22", Some(0.4), Some(74.0)),
    ("USC00519281", "2016-08-23", Some(1.79), Some(77.0)),
    ("USC00519281", "2017-01-03", Some(0.0), Some(60.0)),
    ("USC00519281", "2017-01-05", None, Some(70.0)),
    ("USC00519397", "2017-02-10", Some(0.1), Some(66.0)),
    ("USC00513117", "2017-05-01", Some(0.2), Some(72.0)),
    ("USC00519281", "2017-08-18", Some(0.06), Some(79.0)),
    ("USC00519397", "2017-08-23", Some(0.0), Some(81.0)),
    ("USC00519281", "2017-08-23", Some(0.45), Some(82.0)),
];

/// Creates a dataset file with the schema and the given rows
pub async fn create_dataset(
    path: &Path,
    stations: &[&str],
    measurements: &[MeasurementRow<'_>],
) -> Result<()> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let mut conn = SqliteConnection::connect_with(&options).await?;

    sqlx::query(
        "CREATE TABLE station (id INTEGER PRIMARY KEY, station TEXT, name TEXT, \
         latitude FLOAT, longitude FLOAT, elevation FLOAT)",
    )
    .execute(&mut conn)
    .await?;
    sqlx::query(
        "CREATE TABLE measurement (id INTEGER PRIMARY KEY, station TEXT, date TEXT, \
         prcp FLOAT, tobs FLOAT)",
    )
    .execute(&mut conn)
    .await?;

    for station in stations {
        sqlx::query("INSERT INTO station (station, name) VALUES (?1, ?2)")
            .bind(*station)
            .bind(format!("{} test site", station))
            .execute(&mut conn)
            .await?;
    }

    for (station, date, prcp, tobs) in measurements {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
            .bind(*station)
            .bind(*date)
            .bind(*prcp)
            .bind(*tobs)
            .execute(&mut conn)
            .await?;
    }

    conn.close().await
}

/// Creates the standard dataset used by the integration tests
pub async fn create_test_weather_db(path: &Path) -> Result<()> {
    create_dataset(path, &STATIONS, &MEASUREMENTS).await
}

/// Creates a file that has a measurement table but no station table
pub async fn create_incomplete_db(path: &Path) -> Result<()> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let mut conn = SqliteConnection::connect_with(&options).await?;
    sqlx::query("CREATE TABLE measurement (station TEXT, date TEXT, prcp FLOAT, tobs FLOAT)")
        .execute(&mut conn)
        .await?;
    conn.close().await
}
