use crate::models::{Mood, MoodCount, MoodEntry, MoodSummary};

/// Number of most recent entries the summary looks at.
pub const SUMMARY_WINDOW: usize = 7;

/// Summarizes the newest `SUMMARY_WINDOW` entries of a newest-first list.
///
/// The dominant mood is the one with the strictly highest count. Moods are
/// compared in order of first occurrence in the window, so on a tie the
/// mood seen first (the most recent) wins. An empty window is `Neutral`.
pub fn summarize(entries: &[MoodEntry]) -> MoodSummary {
    let window = &entries[..entries.len().min(SUMMARY_WINDOW)];

    let mut seen: Vec<MoodCount> = Vec::with_capacity(Mood::ALL.len());
    for entry in window {
        match seen.iter_mut().find(|item| item.mood == entry.mood) {
            Some(item) => item.count += 1,
            None => seen.push(MoodCount {
                mood: entry.mood,
                count: 1,
            }),
        }
    }

    let mut dominant = MoodCount {
        mood: Mood::Neutral,
        count: 0,
    };
    for item in &seen {
        if item.count > dominant.count {
            dominant = *item;
        }
    }

    let counts = Mood::ALL
        .into_iter()
        .map(|mood| MoodCount {
            mood,
            count: seen
                .iter()
                .find(|item| item.mood == mood)
                .map_or(0, |item| item.count),
        })
        .collect();

    MoodSummary {
        dominant_mood: dominant.mood,
        total_entries: window.len(),
        counts,
    }
}
