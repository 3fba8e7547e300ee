use crate::models::{Mood, MoodEntry, MoodSummary};

pub fn render_index(entries: &[MoodEntry], summary: &MoodSummary) -> String {
    INDEX_HTML
        .replace("{{SUMMARY}}", &render_summary(entries, summary))
        .replace("{{MOOD_OPTIONS}}", &render_mood_options())
        .replace("{{ENTRIES}}", &render_entries(entries))
}

fn render_summary(entries: &[MoodEntry], summary: &MoodSummary) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let dominant = summary.dominant_mood;
    format!(
        r#"<section class="card">
      <h2>Your Week</h2>
      <div class="panel">
        <div class="stat">
          <span class="value" id="total-entries">{total}</span>
          <span class="label">Entries this week</span>
        </div>
        <div class="stat">
          <span class="pill mood-{mood}" id="dominant-mood">{label}</span>
          <span class="label">Dominant mood</span>
        </div>
      </div>
    </section>"#,
        total = summary.total_entries,
        mood = dominant.as_str(),
        label = dominant.label(),
    )
}

fn render_mood_options() -> String {
    Mood::ALL
        .into_iter()
        .map(|mood| {
            format!(
                r#"<label class="mood-option mood-{value}">
          <input type="radio" name="mood" value="{value}" />
          <span>{label}</span>
        </label>"#,
                value = mood.as_str(),
                label = mood.label(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

fn render_entries(entries: &[MoodEntry]) -> String {
    if entries.is_empty() {
        return r#"<div class="empty">
        <div>No entries yet</div>
        <div class="hint">Add your first mood entry above!</div>
      </div>"#
            .to_string();
    }

    let items: Vec<String> = entries
        .iter()
        .map(|entry| {
            let note = if entry.note.is_empty() {
                String::new()
            } else {
                format!(r#"<p class="note">{}</p>"#, escape_html(&entry.note))
            };
            format!(
                r#"<li class="entry">
          <span class="dot mood-{mood}"></span>
          <div>
            <div class="entry-head">
              <strong>{label}</strong>
              <time datetime="{iso}">{shown}</time>
            </div>
            {note}
          </div>
        </li>"#,
                mood = entry.mood.as_str(),
                label = entry.mood.label(),
                iso = entry.timestamp.to_rfc3339(),
                shown = entry.timestamp.format("%Y-%m-%d at %H:%M"),
            )
        })
        .collect();

    format!("<ul class=\"entries\">\n        {}\n      </ul>", items.join("\n        "))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Mood Tracker</title>
  <style>
    :root {
      --bg-1: #f3efff;
      --bg-2: #e6f0ff;
      --ink: #2b2a33;
      --muted: #6b6878;
      --accent: #3b82f6;
      --card: #ffffff;
      --shadow: 0 18px 40px rgba(59, 68, 120, 0.14);
      --excellent: #ec4899;
      --good: #22c55e;
      --neutral: #eab308;
      --poor: #ef4444;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), var(--bg-2));
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 32px 16px 48px;
    }

    .app {
      width: min(860px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    header {
      text-align: center;
    }

    h1 {
      margin: 0 0 6px;
      font-size: clamp(2rem, 4vw, 2.6rem);
    }

    h2 {
      margin: 0 0 16px;
      font-size: 1.25rem;
    }

    .subtitle,
    .hint {
      margin: 0;
      color: var(--muted);
    }

    .card {
      background: var(--card);
      border-radius: 16px;
      box-shadow: var(--shadow);
      padding: 24px;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(2, 1fr);
      gap: 16px;
      text-align: center;
    }

    .stat {
      display: grid;
      gap: 6px;
      justify-items: center;
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 700;
      color: var(--accent);
    }

    .stat .label {
      font-size: 0.9rem;
      color: var(--muted);
    }

    .pill {
      padding: 4px 14px;
      border-radius: 999px;
      font-weight: 600;
      background: rgba(0, 0, 0, 0.05);
    }

    .moods {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
      gap: 12px;
      margin-bottom: 20px;
    }

    .mood-option {
      border: 2px solid #e5e7eb;
      border-radius: 12px;
      padding: 16px;
      text-align: center;
      cursor: pointer;
      font-weight: 600;
    }

    .mood-option input {
      display: none;
    }

    .mood-option:has(input:checked) {
      border-color: currentColor;
      background: rgba(0, 0, 0, 0.03);
    }

    .mood-excellent { color: var(--excellent); }
    .mood-good { color: var(--good); }
    .mood-neutral { color: var(--neutral); }
    .mood-poor { color: var(--poor); }

    textarea {
      width: 100%;
      padding: 12px;
      border: 1px solid #d1d5db;
      border-radius: 10px;
      font: inherit;
      resize: none;
      margin: 8px 0 20px;
    }

    button {
      width: 100%;
      border: none;
      border-radius: 10px;
      padding: 14px 20px;
      font-size: 1rem;
      font-weight: 600;
      color: white;
      background: var(--accent);
      cursor: pointer;
    }

    button:disabled {
      background: #d1d5db;
      cursor: not-allowed;
    }

    .status {
      min-height: 1.2em;
      margin-top: 10px;
      color: var(--muted);
    }

    .status[data-type="error"] {
      color: var(--poor);
    }

    .entries {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 12px;
    }

    .entry {
      display: flex;
      gap: 14px;
      align-items: flex-start;
      padding: 14px;
      background: #f9fafb;
      border-radius: 10px;
    }

    .dot {
      width: 14px;
      height: 14px;
      margin-top: 4px;
      border-radius: 50%;
      background: currentColor;
      flex: none;
    }

    .entry-head {
      display: flex;
      gap: 10px;
      align-items: baseline;
    }

    .entry-head time {
      font-size: 0.85rem;
      color: var(--muted);
    }

    .note {
      margin: 4px 0 0;
      font-size: 0.9rem;
      color: #4b5563;
      white-space: pre-wrap;
    }

    .empty {
      text-align: center;
      padding: 24px 0;
      color: #9ca3af;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Mood Tracker</h1>
      <p class="subtitle">Track your daily emotions and reflect on your journey</p>
    </header>

    {{SUMMARY}}

    <section class="card">
      <h2>How are you feeling today?</h2>
      <form id="entry-form" method="post" action="/entries">
        <div class="moods">
        {{MOOD_OPTIONS}}
        </div>
        <label for="note">Add a note (optional)</label>
        <textarea id="note" name="note" rows="3" placeholder="What's on your mind?"></textarea>
        <button id="submit-btn" type="submit">Add Entry</button>
        <div class="status" id="status"></div>
      </form>
    </section>

    <section class="card">
      <h2>Recent Entries</h2>
      {{ENTRIES}}
    </section>
  </main>

  <script>
    const form = document.getElementById('entry-form');
    const submitBtn = document.getElementById('submit-btn');
    const noteEl = document.getElementById('note');
    const statusEl = document.getElementById('status');
    const moodInputs = Array.from(document.querySelectorAll('input[name="mood"]'));

    let busy = false;

    const selectedMood = () => {
      const checked = moodInputs.find((input) => input.checked);
      return checked ? checked.value : '';
    };

    const syncButton = () => {
      submitBtn.disabled = busy || !selectedMood();
      submitBtn.textContent = busy ? 'Saving...' : 'Add Entry';
    };

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    document.querySelectorAll('time[datetime]').forEach((el) => {
      const when = new Date(el.getAttribute('datetime'));
      if (!Number.isNaN(when.getTime())) {
        const time = when.toLocaleTimeString([], { hour: '2-digit', minute: '2-digit' });
        el.textContent = `${when.toLocaleDateString()} at ${time}`;
      }
    });

    moodInputs.forEach((input) => input.addEventListener('change', syncButton));

    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      const mood = selectedMood();
      if (!mood || busy) {
        return;
      }

      busy = true;
      syncButton();
      setStatus('', '');
      try {
        const res = await fetch('/api/entries', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ mood, note: noteEl.value })
        });
        if (!res.ok) {
          const msg = await res.text();
          throw new Error(msg || 'Request failed');
        }
        window.location.reload();
      } catch (err) {
        busy = false;
        syncButton();
        setStatus(err.message, 'error');
      }
    });

    syncButton();
  </script>
</body>
</html>
"#;
