// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Beacon ad-tracker server binary.

use std::path::PathBuf;
use std::sync::Arc;

use beacon_core::{generate_tracking_url, CampaignParams};
use beacon_server::{create_pool, create_router, run_migrations, AppState, SqliteTrackerRepository};
use clap::{Parser, Subcommand};
use tower_http::{
	cors::{Any, CorsLayer},
	trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Beacon server - campaign hit and conversion recording.
#[derive(Parser, Debug)]
#[command(name = "beacon-server", about = "Beacon ad-tracker server", version)]
struct Args {
	/// Path to a TOML config file (defaults to /etc/beacon/server.toml)
	#[arg(long, env = "BEACON_SERVER_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Print a campaign tracking URL and exit
	TrackingUrl {
		/// Landing page URL (defaults to the configured base URL)
		#[arg(long)]
		base_url: Option<String>,
		#[arg(long)]
		source: Option<String>,
		#[arg(long)]
		campaign: Option<String>,
		#[arg(long)]
		medium: Option<String>,
		#[arg(long)]
		content: Option<String>,
		#[arg(long)]
		term: Option<String>,
		/// Value for `utm_id`
		#[arg(long)]
		id: Option<String>,
		/// Fixed `utm_session`; a fresh one is generated when absent
		#[arg(long)]
		session: Option<String>,
	},
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Load .env file if present
	dotenvy::dotenv().ok();

	let config = match &args.config {
		Some(path) => beacon_server_config::load_config_with_file(path)?,
		None => beacon_server_config::load_config()?,
	};

	if let Some(Command::TrackingUrl {
		base_url,
		source,
		campaign,
		medium,
		content,
		term,
		id,
		session,
	}) = args.command
	{
		let params = CampaignParams {
			id,
			source,
			campaign,
			medium,
			content,
			term,
			session,
		};
		let base_url = base_url.unwrap_or_else(|| config.http.base_url.clone());
		println!("{}", generate_tracking_url(&base_url, &params)?);
		return Ok(());
	}

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	tracing::info!(
		database = %config.database.url,
		base_url = %config.http.base_url,
		"starting beacon-server"
	);

	let pool = create_pool(&config.database.url).await?;
	run_migrations(&pool).await?;

	let repo = Arc::new(SqliteTrackerRepository::new(pool));
	let state = AppState::new(repo, config.platforms.clone());

	let app = create_router(state)
		.layer(TraceLayer::new_for_http())
		.layer(
			CorsLayer::new()
				.allow_origin(Any)
				.allow_methods(Any)
				.allow_headers(Any),
		);

	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	tracing::info!("Server shutdown complete");
	Ok(())
}
