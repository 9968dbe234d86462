//! Login, points board and navigation endpoints.

use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use tower::ServiceExt;

use crate::commands::points_board::PointsBoardRequest;
use crate::commands::show_summary::{ShowSummaryRequest, Summary};
use crate::domain::Club;
use crate::http::error::ApiError;
use crate::http::page::Page;
use crate::http::AppState;

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: Option<String>,
}

#[derive(Serialize)]
pub struct PointsBoardResponse {
    pub clubs: Vec<Club>,
}

/// GET / — landing page.
pub async fn index() -> Page {
    Page::info("Please enter your secretary email to continue.")
}

/// Pages that only accept form submissions send GET requests back to the index.
pub async fn redirect_index() -> Redirect {
    Redirect::to("/")
}

/// POST /showSummary — log a club in by email.
#[tracing::instrument(skip(state, form))]
pub async fn show_summary(
    State(state): State<Arc<AppState>>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, ApiError> {
    // A missing or unreadable form is the same as no email at all
    let email = form.ok().and_then(|Form(form)| form.email);

    let summary = state
        .logic
        .clone()
        .oneshot(ShowSummaryRequest { email })
        .await?;

    Ok(match summary {
        Summary::MissingEmail => {
            Page::error("Please enter an email.").with_status(StatusCode::BAD_REQUEST)
        }
        Summary::UnknownEmail => Page::error("No account related to this email.")
            .with_status(StatusCode::UNAUTHORIZED),
        Summary::Welcome { club, competitions } => Page::default()
            .welcome(club, competitions)
            .into_response(),
    })
}

/// GET /pointsBoard — all clubs, most points first.
#[tracing::instrument(skip(state))]
pub async fn points_board(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PointsBoardResponse>, ApiError> {
    let clubs = state.logic.clone().oneshot(PointsBoardRequest).await?;
    Ok(Json(PointsBoardResponse { clubs }))
}
