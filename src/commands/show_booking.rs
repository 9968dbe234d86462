use std::task::{Context, Poll};

use crate::{
    domain::{Club, Competition},
    ports::{clock::ClockPort, records::RecordPort},
};
use tower::Service;

use super::{CommandFuture, DomainLogic, Error};

/// Request to open the booking form of a competition for a club
pub struct ShowBookingRequest {
    pub competition: String,
    pub club: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum BookingPage {
    /// The club or the competition does not exist
    UnknownEntity,
    /// The competition already started, places can no longer be booked
    PastCompetition { club: Club, competition: Competition },
    /// The booking form can be shown
    Open { club: Club, competition: Competition },
}

impl<R, C> Service<ShowBookingRequest> for DomainLogic<R, C>
where
    R: RecordPort + 'static,
    C: ClockPort + 'static,
{
    type Response = BookingPage;
    type Error = Error;
    type Future = CommandFuture<BookingPage>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ShowBookingRequest) -> Self::Future {
        let records = self.records.clone();
        let clock = self.clock.clone();
        Box::pin(async move {
            let club = records.find_club_by_name(&req.club).await?;
            let competition = records.find_competition_by_name(&req.competition).await?;
            let (Some(club), Some(competition)) = (club, competition) else {
                return Ok(BookingPage::UnknownEntity);
            };

            if competition.is_past(clock.now()) {
                tracing::info!(
                    club = %club.name,
                    competition = %competition.name,
                    date = %competition.date,
                    "booking refused for past competition"
                );
                return Ok(BookingPage::PastCompetition { club, competition });
            }

            Ok(BookingPage::Open { club, competition })
        })
    }
}
