use crate::{
    domain::{ledger::ReservationLedger, Club, Competition},
    ports::records::{AppliedBooking, Error, RecordPort},
};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

/// In-memory record store
///
/// Clubs and competitions keep the order of the record source. Lookups go through indexes that
/// point to the first record with a given key, so duplicated names or emails always resolve to
/// the same record.
#[derive(Clone, Debug)]
pub struct MemoryRecords {
    records: Arc<Mutex<Records>>,
}

#[derive(Debug, Default)]
struct Records {
    clubs: Vec<Club>,
    club_by_name: HashMap<String, usize>,
    club_by_email: HashMap<String, usize>,
    competitions: Vec<Competition>,
    competition_by_name: HashMap<String, usize>,
    ledger: ReservationLedger,
}

impl MemoryRecords {
    pub fn new(clubs: Vec<Club>, competitions: Vec<Competition>) -> Self {
        let mut records = Records::default();
        for (pos, club) in clubs.iter().enumerate() {
            records.club_by_name.entry(club.name.clone()).or_insert(pos);
            records.club_by_email.entry(club.email.clone()).or_insert(pos);
        }
        for (pos, competition) in competitions.iter().enumerate() {
            records
                .competition_by_name
                .entry(competition.name.clone())
                .or_insert(pos);
        }
        records.clubs = clubs;
        records.competitions = competitions;

        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    /// Copy of all clubs and competitions, in source order
    pub fn snapshot(&self) -> Result<(Vec<Club>, Vec<Competition>), Error> {
        let records = self.records.lock()?;
        Ok((records.clubs.clone(), records.competitions.clone()))
    }
}

impl Default for MemoryRecords {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl Records {
    fn club(&self, name: &str) -> Option<usize> {
        self.club_by_name.get(name).copied()
    }

    fn competition(&self, name: &str) -> Option<usize> {
        self.competition_by_name.get(name).copied()
    }
}

#[async_trait::async_trait]
impl RecordPort for MemoryRecords {
    async fn find_club_by_name(&self, name: &str) -> Result<Option<Club>, Error> {
        let records = self.records.lock()?;
        Ok(records.club(name).map(|pos| records.clubs[pos].clone()))
    }

    async fn find_club_by_email(&self, email: &str) -> Result<Option<Club>, Error> {
        let records = self.records.lock()?;
        Ok(records
            .club_by_email
            .get(email)
            .map(|&pos| records.clubs[pos].clone()))
    }

    async fn find_competition_by_name(&self, name: &str) -> Result<Option<Competition>, Error> {
        let records = self.records.lock()?;
        Ok(records
            .competition(name)
            .map(|pos| records.competitions[pos].clone()))
    }

    async fn list_clubs(&self) -> Result<Vec<Club>, Error> {
        Ok(self.records.lock()?.clubs.clone())
    }

    async fn list_competitions(&self) -> Result<Vec<Competition>, Error> {
        Ok(self.records.lock()?.competitions.clone())
    }

    async fn ledger_total(&self, competition: &str) -> Result<u32, Error> {
        Ok(self.records.lock()?.ledger.current_total(competition))
    }

    async fn apply_booking(
        &self,
        club: &str,
        competition: &str,
        places: u32,
    ) -> Result<AppliedBooking, Error> {
        let mut records = self.records.lock()?;

        let club_pos = records.club(club).ok_or_else(|| Error::UnknownRecord {
            kind: "club",
            name: club.to_string(),
        })?;
        let competition_pos = records
            .competition(competition)
            .ok_or_else(|| Error::UnknownRecord {
                kind: "competition",
                name: competition.to_string(),
            })?;

        // Check everything before touching anything, so that a failure leaves no partial update
        let points = records.clubs[club_pos].points;
        let points = points.checked_sub(places).ok_or_else(|| Error::Underflow {
            kind: "club",
            name: club.to_string(),
            available: points,
            requested: places,
        })?;
        let remaining = records.competitions[competition_pos].number_of_places;
        let remaining = remaining.checked_sub(places).ok_or_else(|| Error::Underflow {
            kind: "competition",
            name: competition.to_string(),
            available: remaining,
            requested: places,
        })?;

        records.clubs[club_pos].points = points;
        records.competitions[competition_pos].number_of_places = remaining;
        let reservation = records.ledger.add_booking(competition, club, places);

        Ok(AppliedBooking {
            club: records.clubs[club_pos].clone(),
            competition: records.competitions[competition_pos].clone(),
            ledger_total: records.ledger.current_total(competition),
            reservation,
        })
    }
}

/// Erased [`PoisonError`]
///
/// `PoisonError` keeps the `MutexGuard` internally, which is not send. Thus we erase the error
/// and only keep the string representation instead.
#[derive(Debug, thiserror::Error)]
#[error("poison error: {0}")]
pub struct ErasedPoisonError(String);

impl<T> From<PoisonError<T>> for Error {
    fn from(err: PoisonError<T>) -> Self {
        Self::Adapter(Box::new(ErasedPoisonError(err.to_string())))
    }
}
