//! JSON body shared by all page-like responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::{Club, Competition};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Info,
    Error,
}

/// A page: an optional flash message and the records shown with it
#[derive(Debug, Default, Serialize)]
pub struct Page {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club: Option<Club>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competition: Option<Competition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competitions: Option<Vec<Competition>>,
}

impl Page {
    pub fn info(message: &'static str) -> Self {
        Self {
            message: Some(message),
            category: Some(Category::Info),
            ..Self::default()
        }
    }

    pub fn error(message: &'static str) -> Self {
        Self {
            message: Some(message),
            category: Some(Category::Error),
            ..Self::default()
        }
    }

    /// Welcome page of a club: the club and all competitions
    pub fn welcome(mut self, club: Club, competitions: Vec<Competition>) -> Self {
        self.club = Some(club);
        self.competitions = Some(competitions);
        self
    }

    /// Booking form of a competition for a club
    pub fn booking(mut self, club: Club, competition: Competition) -> Self {
        self.club = Some(club);
        self.competition = Some(competition);
        self
    }

    pub fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        self.with_status(StatusCode::OK)
    }
}
