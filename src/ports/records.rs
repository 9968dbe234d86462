use crate::domain::{ledger::Reservation, Club, Competition};

#[mockall::automock]
#[async_trait::async_trait]
pub trait RecordPort: Send + Sync {
    async fn find_club_by_name(&self, name: &str) -> Result<Option<Club>, Error>;
    async fn find_club_by_email(&self, email: &str) -> Result<Option<Club>, Error>;
    async fn find_competition_by_name(&self, name: &str) -> Result<Option<Competition>, Error>;

    /// All clubs, in the order of the record source
    async fn list_clubs(&self) -> Result<Vec<Club>, Error>;
    /// All competitions, in the order of the record source
    async fn list_competitions(&self) -> Result<Vec<Competition>, Error>;

    /// Places booked so far for a competition, 0 if it was never booked
    async fn ledger_total(&self, competition: &str) -> Result<u32, Error>;

    /// Apply a booking to the club, the competition and the ledger at once
    ///
    /// Either all three are updated or none of them is.
    async fn apply_booking(
        &self,
        club: &str,
        competition: &str,
        places: u32,
    ) -> Result<AppliedBooking, Error>;
}

/// State of the records right after a booking was applied
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedBooking {
    pub club: Club,
    pub competition: Competition,
    pub ledger_total: u32,
    pub reservation: Reservation,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A record targeted by a mutation does not exist
    #[error("{kind} {name} does not exist")]
    UnknownRecord { kind: &'static str, name: String },

    /// Trying to take more than what is left
    ///
    /// This would result in a negative number of points or places, which is not supported.
    #[error("trying to subtract {requested} from {kind} {name} which only has {available}")]
    Underflow {
        kind: &'static str,
        name: String,
        available: u32,
        requested: u32,
    },

    /// Concrete adapter errors
    ///
    /// This could represent any errors from a concrete adapter that is not part of the domain
    /// model, such as I/O, parsing, or lock poisoning errors.
    #[error("adapter error: {0:?}")]
    Adapter(Box<dyn std::error::Error + Send + Sync>),
}
