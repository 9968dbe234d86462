use std::task::{Context, Poll};

use crate::{
    domain::{Club, Competition, MAX_PLACES_PER_COMPETITION},
    ports::records::{AppliedBooking, RecordPort},
};
use tower::Service;

use super::{CommandFuture, DomainLogic, Error};

pub struct PurchasePlacesRequest {
    pub club: String,
    pub competition: String,
    /// Raw number of places, as submitted
    pub places: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// The club or the competition does not exist
    NotFound,
    /// A rule refused the purchase, nothing was changed
    Rejected {
        rejection: Rejection,
        club: Club,
        competition: Competition,
    },
    /// The places were booked
    Booked(AppliedBooking),
}

/// Reason for refusing a purchase
///
/// Variants are listed in the order in which rules are checked, after the number of places
/// has been parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// No number of places, or not an integer
    MissingPlaces,
    /// The competition already reached its cap of booked places
    AlreadyAtCap,
    /// The club does not have enough points
    InsufficientPoints,
    /// The competition does not have enough places left
    InsufficientCapacity,
    NegativeRequest,
    /// More places than allowed in a single purchase
    OverSingleTransactionLimit,
    /// The purchase would push the competition over its cap
    ///
    /// Unlike the other rejections, this one is reported as a warning on an otherwise
    /// successful page: nothing is booked, but the request is not treated as a failure.
    OverLedgerCap,
}

impl Rejection {
    pub fn message(&self) -> &'static str {
        match self {
            Rejection::MissingPlaces => "Please enter the number of places to reserve.",
            Rejection::AlreadyAtCap => "You have already booked 12 places for this competition.",
            Rejection::InsufficientPoints => "You don't have enough points.",
            Rejection::InsufficientCapacity => {
                "Not enough places available, you are trying to book more than the remaining places."
            }
            Rejection::NegativeRequest => "You can't book a negative number of places.",
            Rejection::OverSingleTransactionLimit => {
                "You can't book more than 12 places in a competition."
            }
            Rejection::OverLedgerCap => "You can't book more than 12 places for this competition.",
        }
    }
}

pub const BOOKED_MESSAGE: &str = "Great-booking complete!";

impl<R, C> Service<PurchasePlacesRequest> for DomainLogic<R, C>
where
    R: RecordPort + 'static,
    C: Send + Sync + 'static,
{
    type Response = PurchaseOutcome;
    type Error = Error;
    type Future = CommandFuture<PurchaseOutcome>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: PurchasePlacesRequest) -> Self::Future {
        let records = self.records.clone();
        let locks = self.locks.clone();
        Box::pin(async move {
            let (Some(club), Some(competition)) = (
                records.find_club_by_name(&req.club).await?,
                records.find_competition_by_name(&req.competition).await?,
            ) else {
                tracing::info!(club = %req.club, competition = %req.competition, "unknown club or competition");
                return Ok(PurchaseOutcome::NotFound);
            };

            // Only existing records get a lock. Clubs are always locked before competitions.
            let _club_guard = locks.lock(format!("club:{}", club.name)).await;
            let _competition_guard = locks
                .lock(format!("competition:{}", competition.name))
                .await;

            // Every read below must see the state as of the locks, not as of the lookup
            let (Some(club), Some(competition)) = (
                records.find_club_by_name(&club.name).await?,
                records.find_competition_by_name(&competition.name).await?,
            ) else {
                return Ok(PurchaseOutcome::NotFound);
            };

            let Some(requested) = parse_places(req.places.as_deref()) else {
                return Ok(reject(Rejection::MissingPlaces, club, competition));
            };

            let ledger_total = records.ledger_total(&competition.name).await?;

            let places = match check_rules(&club, &competition, ledger_total, requested) {
                Ok(places) => places,
                Err(rejection) => return Ok(reject(rejection, club, competition)),
            };

            let applied = records
                .apply_booking(&club.name, &competition.name, places)
                .await?;

            tracing::info!(
                club = %applied.club.name,
                competition = %applied.competition.name,
                places,
                points = applied.club.points,
                remaining = applied.competition.number_of_places,
                ledger_total = applied.ledger_total,
                reservation_id = %applied.reservation.reservation_id,
                "places booked"
            );

            Ok(PurchaseOutcome::Booked(applied))
        })
    }
}

fn reject(rejection: Rejection, club: Club, competition: Competition) -> PurchaseOutcome {
    tracing::info!(
        club = %club.name,
        competition = %competition.name,
        ?rejection,
        "purchase rejected"
    );
    PurchaseOutcome::Rejected {
        rejection,
        club,
        competition,
    }
}

/// Parse the submitted number of places
///
/// Surrounding whitespace is ignored. Returns `None` when nothing usable was submitted.
fn parse_places(places: Option<&str>) -> Option<i64> {
    places.map(str::trim).and_then(|places| places.parse().ok())
}

/// Check all booking rules against the current state
///
/// The first failing rule wins. On success, returns the number of places to book.
fn check_rules(
    club: &Club,
    competition: &Competition,
    ledger_total: u32,
    requested: i64,
) -> Result<u32, Rejection> {
    let cap = i64::from(MAX_PLACES_PER_COMPETITION);
    let ledger_total = i64::from(ledger_total);

    if ledger_total >= cap {
        return Err(Rejection::AlreadyAtCap);
    }
    if requested > i64::from(club.points) {
        return Err(Rejection::InsufficientPoints);
    }
    if requested > i64::from(competition.number_of_places) {
        return Err(Rejection::InsufficientCapacity);
    }
    if requested < 0 {
        return Err(Rejection::NegativeRequest);
    }
    if requested > cap {
        return Err(Rejection::OverSingleTransactionLimit);
    }
    if ledger_total + requested > cap {
        return Err(Rejection::OverLedgerCap);
    }

    // 0..=12 at this point
    u32::try_from(requested).map_err(|_| Rejection::NegativeRequest)
}
