//! Booking form and place purchase endpoints.

use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Form;
use serde::Deserialize;
use tower::ServiceExt;

use crate::commands::purchase_places::{
    PurchaseOutcome, PurchasePlacesRequest, Rejection, BOOKED_MESSAGE,
};
use crate::commands::show_booking::{BookingPage, ShowBookingRequest};
use crate::domain::Club;
use crate::http::error::ApiError;
use crate::http::page::Page;
use crate::http::AppState;
use crate::ports::records::RecordPort;

#[derive(Default, Deserialize)]
pub struct PurchaseForm {
    pub competition: Option<String>,
    pub club: Option<String>,
    pub places: Option<String>,
}

/// GET /book/{competition}/{club} — booking form, only for upcoming competitions.
#[tracing::instrument(skip(state))]
pub async fn book(
    State(state): State<Arc<AppState>>,
    Path((competition, club)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let page = state
        .logic
        .clone()
        .oneshot(ShowBookingRequest { competition, club })
        .await?;

    Ok(match page {
        BookingPage::UnknownEntity => Page::error("Something went wrong-please try again")
            .with_status(StatusCode::BAD_REQUEST),
        BookingPage::PastCompetition { club, .. } => {
            welcome(&state, "Error: can not purchase a place for past competitions", club)
                .await?
                .with_status(StatusCode::BAD_REQUEST)
        }
        BookingPage::Open { club, competition } => {
            Page::default().booking(club, competition).with_status(StatusCode::OK)
        }
    })
}

/// POST /purchasePlaces — spend club points on competition places.
#[tracing::instrument(skip(state, form))]
pub async fn purchase_places(
    State(state): State<Arc<AppState>>,
    form: Result<Form<PurchaseForm>, FormRejection>,
) -> Result<Response, ApiError> {
    let form = form.map(|Form(form)| form).unwrap_or_default();
    let (Some(competition), Some(club)) = (form.competition, form.club) else {
        return Ok(not_found());
    };

    let outcome = state
        .logic
        .clone()
        .oneshot(PurchasePlacesRequest {
            club,
            competition,
            places: form.places,
        })
        .await?;

    Ok(match outcome {
        PurchaseOutcome::NotFound => not_found(),
        PurchaseOutcome::Rejected {
            rejection,
            club,
            competition,
        } => match rejection {
            // Refusals that concern the whole competition go back to the welcome page
            Rejection::AlreadyAtCap | Rejection::OverLedgerCap => {
                welcome(&state, rejection.message(), club)
                    .await?
                    .with_status(rejection_status(rejection))
            }
            _ => Page::error(rejection.message())
                .booking(club, competition)
                .with_status(rejection_status(rejection)),
        },
        PurchaseOutcome::Booked(applied) => {
            persist(&state).await;
            let competitions = state.logic.records().list_competitions().await?;
            Page::info(BOOKED_MESSAGE)
                .welcome(applied.club, competitions)
                .with_status(StatusCode::OK)
        }
    })
}

/// Status code reported for each refusal
pub fn rejection_status(rejection: Rejection) -> StatusCode {
    match rejection {
        Rejection::MissingPlaces | Rejection::NegativeRequest => StatusCode::BAD_REQUEST,
        Rejection::AlreadyAtCap
        | Rejection::InsufficientPoints
        | Rejection::OverSingleTransactionLimit => StatusCode::FORBIDDEN,
        Rejection::InsufficientCapacity => StatusCode::CONFLICT,
        // Reported as a warning on a successful page
        Rejection::OverLedgerCap => StatusCode::OK,
    }
}

fn not_found() -> Response {
    Page::error("Competition or club not found.").with_status(StatusCode::NOT_FOUND)
}

async fn welcome(state: &AppState, message: &'static str, club: Club) -> Result<Page, ApiError> {
    let competitions = state.logic.records().list_competitions().await?;
    Ok(Page::error(message).welcome(club, competitions))
}

/// Write records back, if enabled. Failures are logged and do not affect the booking.
async fn persist(state: &AppState) {
    let Some(source) = &state.persistence else {
        return;
    };
    if let Err(err) = source.save(state.logic.records()).await {
        tracing::warn!(error = %err, "failed to persist records");
    }
}
