use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

/// Cumulative places booked per competition since the process started
///
/// The ledger is pure bookkeeping: it never validates what it is asked to record. Callers are
/// responsible for keeping each total at or below
/// [`MAX_PLACES_PER_COMPETITION`](super::MAX_PLACES_PER_COMPETITION).
#[derive(Clone, Debug, Default)]
pub struct ReservationLedger {
    entries: HashMap<String, LedgerEntry>,
}

#[derive(Clone, Debug, Default)]
struct LedgerEntry {
    total: u32,
    reservations: Vec<Reservation>,
}

/// A single booking recorded against a competition
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Reservation {
    pub reservation_id: Uuid,
    /// Name of the club that made the booking
    pub club: String,
    /// Number of places booked
    pub places: u32,
}

impl ReservationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places booked so far for a competition
    ///
    /// Competitions that were never booked have a total of 0.
    pub fn current_total(&self, competition: &str) -> u32 {
        self.entries
            .get(competition)
            .map(|entry| entry.total)
            .unwrap_or(0)
    }

    /// Record a booking of `amount` places by `club`
    pub fn add_booking(&mut self, competition: &str, club: &str, amount: u32) -> Reservation {
        let reservation = Reservation {
            reservation_id: Uuid::new_v4(),
            club: club.to_string(),
            places: amount,
        };

        let entry = self.entries.entry(competition.to_string()).or_default();
        entry.total += amount;
        entry.reservations.push(reservation.clone());

        reservation
    }

    /// Individual bookings that make up the total of a competition
    pub fn reservations(&self, competition: &str) -> &[Reservation] {
        self.entries
            .get(competition)
            .map(|entry| entry.reservations.as_slice())
            .unwrap_or_default()
    }
}
