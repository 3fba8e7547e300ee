use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Excellent,
    Good,
    Neutral,
    Poor,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::Excellent, Mood::Good, Mood::Neutral, Mood::Poor];

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Excellent => "excellent",
            Mood::Good => "good",
            Mood::Neutral => "neutral",
            Mood::Poor => "poor",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Excellent => "Excellent",
            Mood::Good => "Good",
            Mood::Neutral => "Neutral",
            Mood::Poor => "Poor",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMood(pub String);

impl fmt::Display for UnknownMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown mood '{}'", self.0)
    }
}

impl std::error::Error for UnknownMood {}

impl FromStr for Mood {
    type Err = UnknownMood;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str() == value)
            .ok_or_else(|| UnknownMood(value.to_string()))
    }
}

/// One recorded observation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: i64,
    pub mood: Mood,
    pub note: String,
    pub date: NaiveDate,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Deserialize)]
pub struct NewEntryRequest {
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodCount {
    pub mood: Mood,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodSummary {
    pub dominant_mood: Mood,
    pub total_entries: usize,
    pub counts: Vec<MoodCount>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub busy: bool,
}
