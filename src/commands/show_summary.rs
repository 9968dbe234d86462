use std::task::{Context, Poll};

use crate::{
    domain::{Club, Competition},
    ports::records::RecordPort,
};
use tower::Service;

use super::{CommandFuture, DomainLogic, Error};

/// Login of a club representative by email
pub struct ShowSummaryRequest {
    pub email: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Summary {
    /// No email was submitted at all
    MissingEmail,
    /// No club uses this email
    UnknownEmail,
    Welcome {
        club: Club,
        competitions: Vec<Competition>,
    },
}

impl<R, C> Service<ShowSummaryRequest> for DomainLogic<R, C>
where
    R: RecordPort + 'static,
    C: Send + Sync + 'static,
{
    type Response = Summary;
    type Error = Error;
    type Future = CommandFuture<Summary>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ShowSummaryRequest) -> Self::Future {
        let records = self.records.clone();
        Box::pin(async move {
            let Some(email) = req.email else {
                return Ok(Summary::MissingEmail);
            };

            let Some(club) = records.find_club_by_email(&email).await? else {
                tracing::info!(%email, "no club for email");
                return Ok(Summary::UnknownEmail);
            };

            tracing::debug!(club = %club.name, "club logged in");
            let competitions = records.list_competitions().await?;

            Ok(Summary::Welcome { club, competitions })
        })
    }
}
