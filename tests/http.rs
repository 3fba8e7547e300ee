use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::io::Write;
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct EntryResponse {
    id: i64,
    mood: String,
    note: String,
    date: String,
    timestamp: String,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    dominant_mood: String,
    total_entries: usize,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    busy: bool,
}

/// A running `mood_tracker` binary with its own data directory. Killed on drop.
struct TestServer {
    addr: SocketAddr,
    client: Client,
    child: Child,
}

impl TestServer {
    async fn start(data_dir: &Path, submit_delay_ms: u64) -> Self {
        let addr = TcpListener::bind("127.0.0.1:0")
            .and_then(|listener| listener.local_addr())
            .expect("reserve a local port");

        let child = Command::new(env!("CARGO_BIN_EXE_mood_tracker"))
            .env("PORT", addr.port().to_string())
            .env("APP_DATA_DIR", data_dir)
            .env("MOOD_SUBMIT_DELAY_MS", submit_delay_ms.to_string())
            .env("RUST_LOG", "info")
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .expect("failed to spawn server");

        let server = Self {
            addr,
            client: Client::new(),
            child,
        };
        server.wait_until(|_| true, "server did not become ready").await;
        server
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    async fn post_entry(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url("/api/entries"))
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    async fn entries(&self) -> Vec<EntryResponse> {
        self.client
            .get(self.url("/api/entries"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }

    async fn try_status(&self) -> Option<StatusResponse> {
        let response = self.client.get(self.url("/api/status")).send().await.ok()?;
        response.json().await.ok()
    }

    async fn wait_until(&self, done: impl Fn(&StatusResponse) -> bool, message: &str) {
        let deadline = Instant::now() + Duration::from_secs(3);
        while Instant::now() < deadline {
            if let Some(status) = self.try_status().await {
                if done(&status) {
                    return;
                }
            }
            sleep(Duration::from_millis(20)).await;
        }
        panic!("{message}");
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn unique_data_dir(tag: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("mood_tracker_http_{tag}_{}_{nanos}", std::process::id()))
}

#[tokio::test]
async fn http_add_entry_prepends_and_trims_note() {
    let server = TestServer::start(&unique_data_dir("add"), 0).await;

    let first = server.post_entry(serde_json::json!({ "mood": "poor" })).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let first: EntryResponse = first.json().await.unwrap();
    assert_eq!(first.note, "");

    let response = server
        .post_entry(serde_json::json!({ "mood": "excellent", "note": "  long walk  " }))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: EntryResponse = response.json().await.unwrap();
    assert_eq!(created.mood, "excellent");
    assert_eq!(created.note, "long walk");
    assert_eq!(created.date.len(), 10);
    assert!(!created.timestamp.is_empty());
    assert!(created.id > first.id);

    let entries = server.entries().await;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, created.id);
    assert_eq!(entries[1].id, first.id);
}

#[tokio::test]
async fn http_invalid_mood_is_rejected() {
    let server = TestServer::start(&unique_data_dir("invalid"), 0).await;

    for body in [
        serde_json::json!({ "mood": "ecstatic", "note": "x" }),
        serde_json::json!({ "mood": "" }),
        serde_json::json!({ "mood": " good" }),
        serde_json::json!({ "mood": "good " }),
        serde_json::json!({ "mood": "Good" }),
        serde_json::json!({ "note": "no mood" }),
    ] {
        let response = server.post_entry(body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "accepted {body}");
    }

    for form in [
        vec![("note", "form without mood")],
        vec![("mood", " neutral"), ("note", "padded mood")],
    ] {
        let response = server
            .client
            .post(server.url("/entries"))
            .form(&form)
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    assert!(server.entries().await.is_empty());
}

#[tokio::test]
async fn http_form_submission_adds_entry() {
    let server = TestServer::start(&unique_data_dir("form"), 0).await;

    let page = server
        .client
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains(r#"<form id="entry-form" method="post" action="/entries">"#));
    assert!(!page.contains(r#"type="submit" disabled"#));

    let response = server
        .client
        .post(server.url("/entries"))
        .form(&[("mood", "neutral"), ("note", "from the page")])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert!(response.text().await.unwrap().contains("from the page"));

    let entries = server.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].mood, "neutral");
}

#[tokio::test]
async fn http_summary_uses_newest_seven() {
    let server = TestServer::start(&unique_data_dir("summary"), 0).await;

    for mood in ["poor", "poor", "poor", "good", "good", "good", "good", "good", "good", "good"] {
        let response = server.post_entry(serde_json::json!({ "mood": mood })).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let summary: SummaryResponse = server
        .client
        .get(server.url("/api/summary"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(summary.total_entries, 7);
    assert_eq!(summary.dominant_mood, "good");
}

#[tokio::test]
async fn http_entries_survive_restart_and_clear() {
    let data_dir = unique_data_dir("restart");

    {
        let server = TestServer::start(&data_dir, 0).await;
        let response = server
            .post_entry(serde_json::json!({ "mood": "good", "note": "persisted" }))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let stored = std::fs::read_to_string(data_dir.join("moodEntries.json")).unwrap();
    assert!(stored.contains("persisted"));

    let server = TestServer::start(&data_dir, 0).await;
    let entries = server.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].note, "persisted");

    let response = server
        .client
        .delete(server.url("/api/entries"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(server.entries().await.is_empty());
    assert_eq!(
        std::fs::read_to_string(data_dir.join("moodEntries.json")).unwrap(),
        "[]"
    );
}

#[tokio::test]
async fn http_malformed_state_starts_empty() {
    let data_dir = unique_data_dir("malformed");
    std::fs::create_dir_all(&data_dir).unwrap();
    std::fs::write(data_dir.join("moodEntries.json"), "{ definitely not a list").unwrap();

    let server = TestServer::start(&data_dir, 0).await;
    assert!(server.entries().await.is_empty());

    let page = server
        .client
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("No entries yet"));
}

#[tokio::test]
async fn http_second_submission_while_busy_conflicts() {
    let server = TestServer::start(&unique_data_dir("busy"), 800).await;

    let first = {
        let client = server.client.clone();
        let url = server.url("/api/entries");
        tokio::spawn(async move {
            client
                .post(url)
                .json(&serde_json::json!({ "mood": "good" }))
                .send()
                .await
                .unwrap()
                .status()
        })
    };

    server
        .wait_until(|status| status.busy, "submission never became busy")
        .await;

    let second = server.post_entry(serde_json::json!({ "mood": "poor" })).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    assert_eq!(first.await.unwrap(), StatusCode::CREATED);
    let entries = server.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].mood, "good");
}

#[tokio::test]
async fn http_disconnect_during_delay_discards_submission() {
    let delay = Duration::from_millis(1000);
    let server = TestServer::start(&unique_data_dir("disconnect"), delay.as_millis() as u64).await;

    let body = r#"{"mood":"good","note":"never saved"}"#;
    let mut stream = TcpStream::connect(server.addr).unwrap();
    write!(
        stream,
        "POST /api/entries HTTP/1.1\r\nHost: {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
        server.addr,
        body.len(),
    )
    .unwrap();
    stream.flush().unwrap();

    server
        .wait_until(|status| status.busy, "submission never became busy")
        .await;
    stream.shutdown(Shutdown::Both).unwrap();
    drop(stream);

    sleep(delay + Duration::from_millis(500)).await;

    let status = server.try_status().await.expect("status");
    assert!(!status.busy);
    assert!(server.entries().await.is_empty());
    assert!(!server
        .client
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap()
        .contains("never saved"));
}
