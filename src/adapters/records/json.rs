//! Flat JSON files backing the record store.
//!
//! Clubs and competitions are read once at startup. Writing them back is opt-in and only
//! happens when the application is configured to persist changes.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::memory::MemoryRecords;
use crate::{
    domain::{Club, Competition, DATE_FORMAT},
    ports::records::Error,
};

/// Clubs and competitions stored as two JSON files
///
/// Clones share the same save lock, so saves from any clone are written one after the other.
#[derive(Clone, Debug)]
pub struct JsonRecordSource {
    clubs_path: PathBuf,
    competitions_path: PathBuf,
    save_lock: Arc<tokio::sync::Mutex<()>>,
}

#[derive(Debug, thiserror::Error)]
pub enum JsonRecordError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid {field} for {name}: {value:?}")]
    InvalidField {
        name: String,
        field: &'static str,
        value: String,
    },
}

impl From<JsonRecordError> for Error {
    fn from(err: JsonRecordError) -> Self {
        Self::Adapter(Box::new(err))
    }
}

#[derive(Deserialize, Serialize)]
struct ClubsFile {
    clubs: Vec<ClubRecord>,
}

#[derive(Deserialize, Serialize)]
struct CompetitionsFile {
    competitions: Vec<CompetitionRecord>,
}

#[derive(Deserialize, Serialize)]
struct ClubRecord {
    name: String,
    email: String,
    points: Count,
}

#[derive(Deserialize, Serialize)]
struct CompetitionRecord {
    name: String,
    date: String,
    #[serde(rename = "numberOfPlaces")]
    number_of_places: Count,
}

/// Numeric field stored either as a JSON string or a JSON number
#[derive(Deserialize, Serialize)]
#[serde(untagged)]
enum Count {
    Number(u32),
    Text(String),
}

impl Count {
    fn parse(&self, name: &str, field: &'static str) -> Result<u32, JsonRecordError> {
        match self {
            Count::Number(value) => Ok(*value),
            Count::Text(value) => value
                .trim()
                .parse()
                .map_err(|_| JsonRecordError::InvalidField {
                    name: name.to_string(),
                    field,
                    value: value.clone(),
                }),
        }
    }
}

impl TryFrom<ClubRecord> for Club {
    type Error = JsonRecordError;

    fn try_from(record: ClubRecord) -> Result<Self, Self::Error> {
        let points = record.points.parse(&record.name, "points")?;
        Ok(Club::new(record.name, record.email, points))
    }
}

impl TryFrom<CompetitionRecord> for Competition {
    type Error = JsonRecordError;

    fn try_from(record: CompetitionRecord) -> Result<Self, Self::Error> {
        let number_of_places = record
            .number_of_places
            .parse(&record.name, "numberOfPlaces")?;
        let date = NaiveDateTime::parse_from_str(&record.date, DATE_FORMAT).map_err(|_| {
            JsonRecordError::InvalidField {
                name: record.name.clone(),
                field: "date",
                value: record.date.clone(),
            }
        })?;
        Ok(Competition::new(record.name, date, number_of_places))
    }
}

impl JsonRecordSource {
    pub fn new(clubs_path: impl Into<PathBuf>, competitions_path: impl Into<PathBuf>) -> Self {
        Self {
            clubs_path: clubs_path.into(),
            competitions_path: competitions_path.into(),
            save_lock: Arc::default(),
        }
    }

    /// Read both files into a fresh in-memory store
    pub async fn load(&self) -> Result<MemoryRecords, Error> {
        let clubs: ClubsFile = read_json(&self.clubs_path).await?;
        let competitions: CompetitionsFile = read_json(&self.competitions_path).await?;

        let clubs = clubs
            .clubs
            .into_iter()
            .map(Club::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let competitions = competitions
            .competitions
            .into_iter()
            .map(Competition::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            clubs = clubs.len(),
            competitions = competitions.len(),
            "loaded records"
        );

        Ok(MemoryRecords::new(clubs, competitions))
    }

    /// Write the current clubs and competitions back to their files
    ///
    /// The snapshot is taken once the save lock is held, so the last save to run always writes
    /// the latest state.
    pub async fn save(&self, records: &MemoryRecords) -> Result<(), Error> {
        let _guard = self.save_lock.lock().await;
        let (clubs, competitions) = records.snapshot()?;

        let clubs = ClubsFile {
            clubs: clubs
                .into_iter()
                .map(|club| ClubRecord {
                    name: club.name,
                    email: club.email,
                    points: Count::Text(club.points.to_string()),
                })
                .collect(),
        };
        let competitions = CompetitionsFile {
            competitions: competitions
                .into_iter()
                .map(|competition| CompetitionRecord {
                    name: competition.name,
                    date: competition.date.format(DATE_FORMAT).to_string(),
                    number_of_places: Count::Text(competition.number_of_places.to_string()),
                })
                .collect(),
        };

        write_json(&self.clubs_path, &clubs).await?;
        write_json(&self.competitions_path, &competitions).await?;

        tracing::debug!("saved records");

        Ok(())
    }
}

async fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, JsonRecordError> {
    let content = tokio::fs::read(path)
        .await
        .map_err(|source| JsonRecordError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_slice(&content).map_err(|source| JsonRecordError::Json {
        path: path.to_path_buf(),
        source,
    })
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), JsonRecordError> {
    let content = serde_json::to_vec_pretty(value).map_err(|source| JsonRecordError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    // Readers see either the old file or the new one, never a truncated one
    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(".tmp");
    let tmp_path = PathBuf::from(tmp_path);
    tokio::fs::write(&tmp_path, content)
        .await
        .map_err(|source| JsonRecordError::Io {
            path: tmp_path.clone(),
            source,
        })?;
    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|source| JsonRecordError::Io {
            path: path.to_path_buf(),
            source,
        })
}
