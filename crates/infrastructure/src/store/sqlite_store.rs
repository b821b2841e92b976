//! `ReadingStorePort` implementation over the pooled SQLite database

use application::error::ApplicationError;
use application::ports::ReadingStorePort;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use domain::entities::{DailySummary, Reading};
use rusqlite::Row;
use tracing::{debug, warn};

use super::{ConnectionPool, StoreError};

const READING_COLUMNS: &str = "time_utc, time_local, air_temperature, relative_humidity, \
     wind_speed_ms, wind_from_deg, pressure_hpa, precip_mm, symbol_code, symbol_emoji";

/// Reading store backed by a pooled SQLite database
#[derive(Clone)]
pub struct SqliteReadingStore {
    pool: ConnectionPool,
}

impl std::fmt::Debug for SqliteReadingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteReadingStore").finish_non_exhaustive()
    }
}

impl SqliteReadingStore {
    /// Wrap an existing connection pool
    #[must_use]
    pub const fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    async fn run_query<T, F>(&self, query: F) -> Result<T, ApplicationError>
    where
        T: Send + 'static,
        F: FnOnce(&rusqlite::Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get().map_err(StoreError::from)?;
            query(&conn)
        })
        .await
        .map_err(|e| ApplicationError::Internal(format!("store task failed: {e}")))?
        .map_err(ApplicationError::from)
    }
}

/// Timestamps are stored and compared as normalized RFC 3339 UTC strings
fn fmt_utc(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Map a row to a Reading, dropping rows with an unparsable timestamp
fn read_reading(row: &Row<'_>) -> rusqlite::Result<Option<Reading>> {
    let raw: String = row.get(0)?;
    let Ok(time_utc) = Reading::parse_time_utc(&raw) else {
        warn!(time_utc = %raw, "dropping reading with unparsable timestamp");
        return Ok(None);
    };
    let mut reading = Reading::at(time_utc, row.get::<_, String>(1)?);
    reading.air_temperature = row.get(2)?;
    reading.relative_humidity = row.get(3)?;
    reading.wind_speed_ms = row.get(4)?;
    reading.wind_from_deg = row.get(5)?;
    reading.pressure_hpa = row.get(6)?;
    reading.precip_mm = row.get(7)?;
    reading.symbol_code = row.get(8)?;
    reading.symbol_emoji = row.get(9)?;
    Ok(Some(reading))
}

fn collect_readings(
    conn: &rusqlite::Connection,
    sql: &str,
    params: &[&dyn rusqlite::ToSql],
) -> Result<Vec<Reading>, StoreError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, read_reading)?;
    let mut readings = Vec::new();
    for row in rows {
        if let Some(reading) = row? {
            readings.push(reading);
        }
    }
    Ok(readings)
}

#[async_trait]
impl ReadingStorePort for SqliteReadingStore {
    async fn latest_before(
        &self,
        instant: DateTime<Utc>,
    ) -> Result<Option<Reading>, ApplicationError> {
        let cutoff = fmt_utc(instant);
        self.run_query(move |conn| {
            let sql = format!(
                "SELECT {READING_COLUMNS} FROM readings \
                 WHERE time_utc <= ?1 ORDER BY time_utc DESC LIMIT 1"
            );
            let readings = collect_readings(conn, &sql, &[&cutoff as &dyn rusqlite::ToSql])?;
            Ok(readings.into_iter().next())
        })
        .await
    }

    async fn range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Reading>, ApplicationError> {
        let (from, to) = (fmt_utc(from), fmt_utc(to));
        self.run_query(move |conn| {
            let sql = format!(
                "SELECT {READING_COLUMNS} FROM readings \
                 WHERE time_utc >= ?1 AND time_utc < ?2 ORDER BY time_utc ASC"
            );
            collect_readings(conn, &sql, &[&from as &dyn rusqlite::ToSql, &to])
        })
        .await
    }

    async fn next_within(
        &self,
        after: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Reading>, ApplicationError> {
        let (after, until) = (fmt_utc(after), fmt_utc(until));
        self.run_query(move |conn| {
            let sql = format!(
                "SELECT {READING_COLUMNS} FROM readings \
                 WHERE time_utc > ?1 AND time_utc <= ?2 ORDER BY time_utc ASC"
            );
            collect_readings(conn, &sql, &[&after as &dyn rusqlite::ToSql, &until])
        })
        .await
    }

    async fn daily_summaries(&self, days: u32) -> Result<Vec<DailySummary>, ApplicationError> {
        self.run_query(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT date_local, MIN(air_temperature), MAX(air_temperature), \
                        SUM(COALESCE(precip_mm, 0.0)) \
                 FROM readings GROUP BY date_local \
                 ORDER BY date_local DESC LIMIT ?1",
            )?;
            let rows = stmt.query_map([days], |row| {
                let date_raw: String = row.get(0)?;
                let tmin: Option<f64> = row.get(1)?;
                let tmax: Option<f64> = row.get(2)?;
                let rain: Option<f64> = row.get(3)?;
                Ok((date_raw, tmin, tmax, rain))
            })?;

            let mut summaries = Vec::new();
            for row in rows {
                let (date_raw, tmin, tmax, rain) = row?;
                let Ok(date) = NaiveDate::parse_from_str(&date_raw, "%Y-%m-%d") else {
                    warn!(date_local = %date_raw, "dropping summary with unparsable date");
                    continue;
                };
                summaries.push(DailySummary {
                    date,
                    tmin,
                    tmax,
                    rain,
                });
            }
            // Query walks newest-first for the LIMIT; callers get ascending.
            summaries.reverse();
            debug!(days = summaries.len(), "loaded daily summaries");
            Ok(summaries)
        })
        .await
    }
}
