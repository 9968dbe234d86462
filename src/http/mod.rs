//! HTTP surface of the booking service.
//!
//! Form-encoded requests in, JSON pages out. Handlers only translate between HTTP and the
//! commands in [`crate::commands`].

pub mod error;
pub mod page;
pub mod routes;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::adapters::{
    clock::system::SystemClock,
    records::{json::JsonRecordSource, memory::MemoryRecords},
};
use crate::commands::DomainLogic;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub logic: DomainLogic<MemoryRecords, SystemClock>,
    /// Where to write records back after a booking, if changes are persisted
    pub persistence: Option<JsonRecordSource>,
}

impl AppState {
    pub fn new(records: MemoryRecords, persistence: Option<JsonRecordSource>) -> Arc<Self> {
        Arc::new(Self {
            logic: DomainLogic::new(Arc::new(records), Arc::new(SystemClock)),
            persistence,
        })
    }
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::clubs::index))
        .route(
            "/showSummary",
            get(routes::clubs::redirect_index).post(routes::clubs::show_summary),
        )
        .route("/book/{competition}/{club}", get(routes::booking::book))
        .route(
            "/purchasePlaces",
            get(routes::clubs::redirect_index).post(routes::booking::purchase_places),
        )
        .route("/pointsBoard", get(routes::clubs::points_board))
        .route("/logout", get(routes::clubs::redirect_index))
        .route("/health", get(routes::health::check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
