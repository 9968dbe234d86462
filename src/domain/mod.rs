use chrono::NaiveDateTime;
use serde::Serialize;

pub mod ledger;

/// Maximum number of places that can be booked for a single competition
///
/// This applies both to a single purchase and to the cumulative total of all purchases made
/// against one competition, whichever club makes them.
pub const MAX_PLACES_PER_COMPETITION: u32 = 12;

/// A sports club that spends points to book competition places
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Club {
    /// Unique name of the club
    pub name: String,
    /// Email of the club representative
    ///
    /// This is also the login key.
    pub email: String,
    /// Current balance of points
    pub points: u32,
}

impl Club {
    pub fn new(name: impl Into<String>, email: impl Into<String>, points: u32) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            points,
        }
    }
}

/// A competition with a fixed date and a depleting number of places
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Competition {
    /// Unique name of the competition
    pub name: String,
    /// Local date and time at which the competition starts
    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDateTime,
    /// Remaining capacity
    #[serde(rename = "numberOfPlaces")]
    pub number_of_places: u32,
}

impl Competition {
    pub fn new(name: impl Into<String>, date: NaiveDateTime, number_of_places: u32) -> Self {
        Self {
            name: name.into(),
            date,
            number_of_places,
        }
    }

    /// Whether the competition has already started at `now`
    pub fn is_past(&self, now: NaiveDateTime) -> bool {
        self.date < now
    }
}

/// Date format used by the record source and in responses
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn serialize_date<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&date.format(DATE_FORMAT))
}
