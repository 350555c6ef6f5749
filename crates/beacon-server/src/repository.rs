// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::instrument;

use beacon_core::{ConversionPayload, HitPayload, TrackerId};

use crate::error::{BeaconServerError, Result};
use crate::types::{AdTracker, CreateTrackerRequest, TrackerStats, UpdateTrackerRequest};

/// Repository trait for ad tracker operations.
#[async_trait]
pub trait TrackerRepository: Send + Sync {
	// Tracker operations
	async fn create_tracker(&self, request: &CreateTrackerRequest) -> Result<AdTracker>;
	async fn get_tracker(&self, id: TrackerId) -> Result<Option<AdTracker>>;
	async fn list_trackers(&self) -> Result<Vec<AdTracker>>;
	async fn update_tracker(
		&self,
		id: TrackerId,
		request: UpdateTrackerRequest,
	) -> Result<Option<AdTracker>>;
	async fn delete_tracker(&self, id: TrackerId) -> Result<bool>;

	// Event operations
	async fn insert_hit(&self, tracker_id: TrackerId, hit: &HitPayload) -> Result<i64>;
	async fn insert_conversion(
		&self,
		tracker_id: TrackerId,
		conversion: &ConversionPayload,
	) -> Result<i64>;
	async fn tracker_stats(&self, id: TrackerId) -> Result<TrackerStats>;

	/// Round-trips a trivial query.
	async fn ping(&self) -> Result<()>;
}

/// SQLite implementation of [`TrackerRepository`].
#[derive(Clone)]
pub struct SqliteTrackerRepository {
	pool: SqlitePool,
}

impl SqliteTrackerRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}
}

#[async_trait]
impl TrackerRepository for SqliteTrackerRepository {
	#[instrument(skip(self, request), fields(name = %request.name, platform = %request.platform))]
	async fn create_tracker(&self, request: &CreateTrackerRequest) -> Result<AdTracker> {
		let now = Utc::now();
		let target_url = request.target_url.as_deref().filter(|u| !u.is_empty());
		let result = sqlx::query(
			r#"
			INSERT INTO ad_trackers (name, platform, campaign, target_url, is_active, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(&request.name)
		.bind(request.platform.as_str())
		.bind(&request.campaign)
		.bind(target_url)
		.bind(request.is_active.unwrap_or(true))
		.bind(now.to_rfc3339())
		.bind(now.to_rfc3339())
		.execute(&self.pool)
		.await?;

		Ok(AdTracker {
			id: TrackerId(result.last_insert_rowid()),
			name: request.name.clone(),
			platform: request.platform,
			campaign: request.campaign.clone(),
			target_url: target_url.map(str::to_string),
			is_active: request.is_active.unwrap_or(true),
			created_at: now,
			updated_at: now,
		})
	}

	#[instrument(skip(self), fields(tracker_id = %id))]
	async fn get_tracker(&self, id: TrackerId) -> Result<Option<AdTracker>> {
		let row = sqlx::query_as::<_, TrackerRow>(
			r#"
			SELECT id, name, platform, campaign, target_url, is_active, created_at, updated_at
			FROM ad_trackers
			WHERE id = ?
			"#,
		)
		.bind(id.0)
		.fetch_optional(&self.pool)
		.await?;

		row.map(TryInto::try_into).transpose()
	}

	#[instrument(skip(self))]
	async fn list_trackers(&self) -> Result<Vec<AdTracker>> {
		let rows = sqlx::query_as::<_, TrackerRow>(
			r#"
			SELECT id, name, platform, campaign, target_url, is_active, created_at, updated_at
			FROM ad_trackers
			ORDER BY created_at DESC, id DESC
			"#,
		)
		.fetch_all(&self.pool)
		.await?;

		rows.into_iter().map(TryInto::try_into).collect()
	}

	#[instrument(skip(self, request), fields(tracker_id = %id))]
	async fn update_tracker(
		&self,
		id: TrackerId,
		request: UpdateTrackerRequest,
	) -> Result<Option<AdTracker>> {
		let mut tx = self.pool.begin().await?;

		// Absent fields keep their stored value; an empty target URL clears it.
		let result = sqlx::query(
			r#"
			UPDATE ad_trackers
			SET name = COALESCE(?1, name),
				platform = COALESCE(?2, platform),
				campaign = COALESCE(?3, campaign),
				target_url = CASE WHEN ?4 IS NULL THEN target_url ELSE NULLIF(?4, '') END,
				is_active = COALESCE(?5, is_active),
				updated_at = ?6
			WHERE id = ?7
			"#,
		)
		.bind(request.name)
		.bind(request.platform.map(|p| p.as_str()))
		.bind(request.campaign)
		.bind(request.target_url)
		.bind(request.is_active)
		.bind(Utc::now().to_rfc3339())
		.bind(id.0)
		.execute(&mut *tx)
		.await?;

		if result.rows_affected() == 0 {
			return Ok(None);
		}

		let row = sqlx::query_as::<_, TrackerRow>(
			r#"
			SELECT id, name, platform, campaign, target_url, is_active, created_at, updated_at
			FROM ad_trackers
			WHERE id = ?
			"#,
		)
		.bind(id.0)
		.fetch_one(&mut *tx)
		.await?;
		tx.commit().await?;

		row.try_into().map(Some)
	}

	#[instrument(skip(self), fields(tracker_id = %id))]
	async fn delete_tracker(&self, id: TrackerId) -> Result<bool> {
		let mut tx = self.pool.begin().await?;
		sqlx::query("DELETE FROM ad_tracker_hits WHERE tracker_id = ?")
			.bind(id.0)
			.execute(&mut *tx)
			.await?;
		sqlx::query("DELETE FROM ad_tracker_conversions WHERE tracker_id = ?")
			.bind(id.0)
			.execute(&mut *tx)
			.await?;
		let result = sqlx::query("DELETE FROM ad_trackers WHERE id = ?")
			.bind(id.0)
			.execute(&mut *tx)
			.await?;
		tx.commit().await?;

		Ok(result.rows_affected() > 0)
	}

	#[instrument(skip(self, hit), fields(tracker_id = %tracker_id, session_id = %hit.session_id))]
	async fn insert_hit(&self, tracker_id: TrackerId, hit: &HitPayload) -> Result<i64> {
		let result = sqlx::query(
			r#"
			INSERT INTO ad_tracker_hits
				(tracker_id, session_id, source, campaign, medium, content, term, referrer, device, created_at)
			VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(tracker_id.0)
		.bind(&hit.session_id)
		.bind(&hit.source)
		.bind(&hit.campaign)
		.bind(&hit.medium)
		.bind(&hit.content)
		.bind(&hit.term)
		.bind(&hit.referrer)
		.bind(&hit.device)
		.bind(Utc::now().to_rfc3339())
		.execute(&self.pool)
		.await?;

		Ok(result.last_insert_rowid())
	}

	#[instrument(
		skip(self, conversion),
		fields(tracker_id = %tracker_id, session_id = %conversion.session_id, conversion_type = %conversion.conversion_type)
	)]
	async fn insert_conversion(
		&self,
		tracker_id: TrackerId,
		conversion: &ConversionPayload,
	) -> Result<i64> {
		let result = sqlx::query(
			r#"
			INSERT INTO ad_tracker_conversions
				(tracker_id, session_id, conversion_type, value, currency, created_at)
			VALUES (?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(tracker_id.0)
		.bind(&conversion.session_id)
		.bind(&conversion.conversion_type)
		.bind(conversion.value)
		.bind(&conversion.currency)
		.bind(Utc::now().to_rfc3339())
		.execute(&self.pool)
		.await?;

		Ok(result.last_insert_rowid())
	}

	#[instrument(skip(self), fields(tracker_id = %id))]
	async fn tracker_stats(&self, id: TrackerId) -> Result<TrackerStats> {
		let (hits, unique_sessions): (i64, i64) = sqlx::query_as(
			r#"
			SELECT COUNT(*), COUNT(DISTINCT session_id)
			FROM ad_tracker_hits
			WHERE tracker_id = ?
			"#,
		)
		.bind(id.0)
		.fetch_one(&self.pool)
		.await?;

		let (conversions,): (i64,) =
			sqlx::query_as("SELECT COUNT(*) FROM ad_tracker_conversions WHERE tracker_id = ?")
				.bind(id.0)
				.fetch_one(&self.pool)
				.await?;

		Ok(TrackerStats::new(id, hits, conversions, unique_sessions))
	}

	async fn ping(&self) -> Result<()> {
		sqlx::query("SELECT 1").execute(&self.pool).await?;
		Ok(())
	}
}

#[derive(sqlx::FromRow)]
struct TrackerRow {
	id: i64,
	name: String,
	platform: String,
	campaign: String,
	target_url: Option<String>,
	is_active: bool,
	created_at: String,
	updated_at: String,
}

impl TryFrom<TrackerRow> for AdTracker {
	type Error = BeaconServerError;

	fn try_from(row: TrackerRow) -> Result<Self> {
		Ok(AdTracker {
			id: TrackerId(row.id),
			platform: row
				.platform
				.parse()
				.map_err(|_| BeaconServerError::CorruptRow(format!("platform '{}'", row.platform)))?,
			name: row.name,
			campaign: row.campaign,
			target_url: row.target_url,
			is_active: row.is_active,
			created_at: parse_timestamp(&row.created_at)?,
			updated_at: parse_timestamp(&row.updated_at)?,
		})
	}
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
	DateTime::parse_from_rfc3339(value)
		.map(|dt| dt.with_timezone(&Utc))
		.map_err(|e| BeaconServerError::CorruptRow(format!("timestamp '{value}': {e}")))
}
