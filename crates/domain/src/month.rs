use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Human readable date format used when talking about a `MusicMonth`,
/// e.g. "January 2, 2006"
pub const PRETTY_DATE_FORMAT: &str = "%B %-d, %Y";

/// A single day of a `MusicMonth` and the prompt members pick a song for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptDay {
    pub day: i64,
    pub prompt: String,
}

/// A `MusicMonth` is a planned month of daily prompts. It is created once
/// from a document and never changed afterwards. Several `MusicMonth`s can
/// exist at the same time and they are told apart by `start_time`.
#[derive(Debug, Clone, PartialEq)]
pub struct MusicMonth {
    pub id: ID,
    pub start_time: DateTime<Utc>,
    pub days: Vec<PromptDay>,
}

/// The document shape an administrator hands over when planning a month
#[derive(Debug, Deserialize)]
struct MonthDocument {
    start_time: DateTime<Utc>,
    days: Vec<PromptDay>,
}

#[derive(Error, Debug)]
pub enum InvalidMonthError {
    #[error("The month document is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Day {0} appears more than once")]
    DuplicateDay(i64),
}

impl MusicMonth {
    pub fn new(start_time: DateTime<Utc>, days: Vec<PromptDay>) -> Result<Self, InvalidMonthError> {
        let mut seen = HashSet::new();
        for day in &days {
            if !seen.insert(day.day) {
                return Err(InvalidMonthError::DuplicateDay(day.day));
            }
        }
        Ok(Self {
            id: Default::default(),
            start_time,
            days,
        })
    }

    /// Parses a document shaped like
    /// `{"start_time": "2024-01-01T00:00:00Z", "days": [{"day": 1, "prompt": "..."}]}`
    pub fn from_document(bytes: &[u8]) -> Result<Self, InvalidMonthError> {
        let document: MonthDocument = serde_json::from_slice(bytes)?;
        Self::new(document.start_time, document.days)
    }

    /// The key submissions and playlists of this month are stored under, e.g. "Jan 2024"
    pub fn label(&self) -> String {
        self.start_time.format("%b %Y").to_string()
    }

    pub fn pretty_start(&self) -> String {
        self.start_time.format(PRETTY_DATE_FORMAT).to_string()
    }

    pub fn prompt(&self, day: i64) -> Option<&PromptDay> {
        self.days.iter().find(|d| d.day == day)
    }

    /// One line per day, e.g. "January 1: Favorite song"
    pub fn prompt_lines(&self) -> Vec<String> {
        let month_name = self.start_time.format("%B");
        self.days
            .iter()
            .map(|d| format!("{} {}: {}", month_name, d.day, d.prompt))
            .collect()
    }
}

impl Entity for MusicMonth {
    fn id(&self) -> &ID {
        &self.id
    }
}
