use crate::blob::BlobStore;
use crate::errors::StoreError;
use crate::models::{Mood, MoodEntry, MoodSummary};
use crate::stats::summarize;
use chrono::{DateTime, Local};
use tracing::{debug, error, warn};

/// Blob key the entry list lives under.
pub const ENTRIES_KEY: &str = "moodEntries";

/// Newest-first entry list, written through to a blob store on every change.
pub struct EntryStore<B> {
    blob: B,
    entries: Vec<MoodEntry>,
}

impl<B: BlobStore> EntryStore<B> {
    /// Loads the persisted list. Absent or unreadable data yields an empty list.
    pub async fn initialize(blob: B) -> Self {
        let entries = match blob.get(ENTRIES_KEY).await {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!("failed to parse {ENTRIES_KEY}, starting empty: {err}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("failed to read {ENTRIES_KEY}, starting empty: {err}");
                Vec::new()
            }
        };

        Self { blob, entries }
    }

    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    pub fn summary(&self) -> MoodSummary {
        summarize(&self.entries)
    }

    pub async fn add_entry(&mut self, mood: &str, note: &str) -> Option<MoodEntry> {
        self.add_entry_at(mood, note, Local::now()).await
    }

    /// Prepends a new entry created at `now`. Returns `None` and leaves the
    /// list untouched when `mood` is not a known mood.
    pub async fn add_entry_at(
        &mut self,
        mood: &str,
        note: &str,
        now: DateTime<Local>,
    ) -> Option<MoodEntry> {
        let mood: Mood = mood.parse().ok()?;

        let mut id = now.timestamp_millis();
        if let Some(max_id) = self.entries.iter().map(|entry| entry.id).max() {
            if id <= max_id {
                id = max_id.saturating_add(1);
            }
        }

        let entry = MoodEntry {
            id,
            mood,
            note: note.trim().to_string(),
            date: now.date_naive(),
            timestamp: now,
        };
        self.entries.insert(0, entry.clone());
        debug!(id, mood = %mood, "mood entry added");

        self.write_through().await;
        Some(entry)
    }

    pub async fn clear(&mut self) {
        let removed = self.entries.len();
        self.entries.clear();
        debug!(removed, "mood entries cleared");
        self.write_through().await;
    }

    pub async fn save(&self) -> Result<(), StoreError> {
        let payload = serde_json::to_vec(&self.entries)?;
        self.blob.put(ENTRIES_KEY, &payload).await
    }

    async fn write_through(&self) {
        if let Err(err) = self.save().await {
            error!("failed to persist {ENTRIES_KEY}: {err}");
        }
    }
}
