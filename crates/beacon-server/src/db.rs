// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Connection pool and schema.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqliteSynchronous};

use crate::error::{BeaconServerError, Result};

/// Create a SqlitePool with WAL mode and common settings.
///
/// # Arguments
/// * `database_url` - SQLite connection string (e.g., "sqlite:./beacon.db")
#[tracing::instrument(skip(database_url))]
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
	let options = SqliteConnectOptions::from_str(database_url)
		.map_err(|e| BeaconServerError::Validation(format!("Invalid database URL: {e}")))?
		.journal_mode(SqliteJournalMode::Wal)
		.synchronous(SqliteSynchronous::Normal)
		.foreign_keys(true)
		.create_if_missing(true);

	let pool = SqlitePool::connect_with(options).await?;

	tracing::debug!("database pool created");
	Ok(pool)
}

const SCHEMA: &[&str] = &[
	r#"
	CREATE TABLE IF NOT EXISTS ad_trackers (
		id INTEGER PRIMARY KEY AUTOINCREMENT,
		name TEXT NOT NULL,
		platform TEXT NOT NULL,
		campaign TEXT NOT NULL,
		target_url TEXT,
		is_active INTEGER NOT NULL DEFAULT 1,
		created_at TEXT NOT NULL,
		updated_at TEXT NOT NULL
	)
	"#,
	r#"
	CREATE TABLE IF NOT EXISTS ad_tracker_hits (
		id INTEGER PRIMARY KEY AUTOINCREMENT,
		tracker_id INTEGER NOT NULL REFERENCES ad_trackers(id) ON DELETE CASCADE,
		session_id TEXT NOT NULL,
		source TEXT NOT NULL DEFAULT '',
		campaign TEXT NOT NULL DEFAULT '',
		medium TEXT NOT NULL DEFAULT '',
		content TEXT NOT NULL DEFAULT '',
		term TEXT NOT NULL DEFAULT '',
		referrer TEXT NOT NULL DEFAULT '',
		device TEXT NOT NULL DEFAULT '',
		created_at TEXT NOT NULL
	)
	"#,
	r#"
	CREATE INDEX IF NOT EXISTS idx_ad_tracker_hits_tracker
		ON ad_tracker_hits (tracker_id, session_id)
	"#,
	r#"
	CREATE TABLE IF NOT EXISTS ad_tracker_conversions (
		id INTEGER PRIMARY KEY AUTOINCREMENT,
		tracker_id INTEGER NOT NULL REFERENCES ad_trackers(id) ON DELETE CASCADE,
		session_id TEXT NOT NULL,
		conversion_type TEXT NOT NULL,
		value REAL,
		currency TEXT,
		created_at TEXT NOT NULL
	)
	"#,
	r#"
	CREATE INDEX IF NOT EXISTS idx_ad_tracker_conversions_tracker
		ON ad_tracker_conversions (tracker_id)
	"#,
];

/// Creates the ad-tracker tables if they do not exist.
#[tracing::instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
	for statement in SCHEMA {
		sqlx::query(*statement).execute(pool).await?;
	}
	tracing::info!("database schema ready");
	Ok(())
}

#[cfg(test)]
pub(crate) async fn create_test_pool() -> SqlitePool {
	// A single connection keeps every query on the same in-memory database.
	let pool = sqlx::sqlite::SqlitePoolOptions::new()
		.max_connections(1)
		.connect("sqlite::memory:")
		.await
		.unwrap();
	run_migrations(&pool).await.unwrap();
	pool
}
