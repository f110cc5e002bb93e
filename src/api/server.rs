// Copyright 2025 LocaLLM Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::handlers::{
    chat, get_gpu, health, list_gpus, quote_gpu, rent_gpu, send_email,
};
use crate::app_state::{AppState, SharedState};
use crate::catalog::JitterTicker;
use crate::cli::ServeArgs;
use crate::common::config::AppConfig;

/// Install the global tracing subscriber (`RUST_LOG` overrides the default filter).
pub fn init_tracing() {
    // A second initialisation (tests, repeated runs) is ignored
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| AppConfig::DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/gpus", get(list_gpus))
        .route("/api/gpus/{id}", get(get_gpu))
        .route("/api/gpus/{id}/quote", post(quote_gpu))
        .route("/api/rent-gpu", post(rent_gpu))
        .route("/api/send-email", post(send_email))
        .route("/api/chat", post(chat))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Run the marketplace API server until the process is stopped.
pub async fn run_api_mode(args: &ServeArgs) {
    init_tracing();

    let state = match AppState::from_env() {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            eprintln!("Error: {e}");
            return;
        }
    };

    {
        let mut catalog = state.catalog.write().await;
        let added = catalog.initialize(args.synthetic);
        tracing::info!(
            total = catalog.len(),
            synthetic = added,
            "Marketplace catalog ready"
        );
    }

    // Lives until the server returns
    let _ticker = JitterTicker::start(state.catalog.clone(), Duration::from_secs(args.interval));

    let app = build_router(state);
    run_tcp_listener(app, args.port).await;
}

async fn run_tcp_listener(app: Router, port: u16) {
    let listener = match TcpListener::bind(&format!("0.0.0.0:{port}")).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind TCP listener on port {port}: {e}");
            eprintln!("Error: Failed to bind TCP listener on port {port}: {e}");
            return;
        }
    };
    match listener.local_addr() {
        Ok(addr) => tracing::info!("API server listening on {addr}"),
        Err(_) => tracing::info!("API server listening on port {port}"),
    }
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("TCP server error: {e}");
    }
}
