//! Shared test infrastructure: a canned pricing-analysis API stub and a
//! runner for the compiled `pran` binary.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Command, Output};
use std::sync::{Arc, Mutex};
use std::thread;

/// In-memory record store shared with the server thread.
#[derive(Default)]
struct ServerState {
    records: HashMap<String, serde_json::Value>,
    next_id: u32,
}

/// Minimal HTTP stub implementing the two pricing-analysis endpoints.
pub struct StubServer {
    pub base_url: String,
    state: Arc<Mutex<ServerState>>,
}

impl StubServer {
    pub fn start() -> StubServer {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let addr = listener.local_addr().expect("stub server addr");
        let state = Arc::new(Mutex::new(ServerState::default()));
        let shared = Arc::clone(&state);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                handle_connection(stream, &shared);
            }
        });
        StubServer {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Number of records the server has accepted.
    pub fn record_count(&self) -> usize {
        self.state.lock().expect("server state").records.len()
    }

    /// The stored body for a record, if any.
    pub fn record(&self, project_id: &str) -> Option<serde_json::Value> {
        self.state
            .lock()
            .expect("server state")
            .records
            .get(project_id)
            .cloned()
    }
}

fn handle_connection(stream: TcpStream, state: &Arc<Mutex<ServerState>>) {
    let Ok(read_half) = stream.try_clone() else {
        return;
    };
    let mut reader = BufReader::new(read_half);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header).is_err() {
            return;
        }
        let header = header.trim();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }

    let mut body = vec![0u8; content_length];
    if content_length > 0 && reader.read_exact(&mut body).is_err() {
        return;
    }

    let (status, response) = route(&method, &path, &body, state);
    respond(stream, status, &response);
}

fn route(
    method: &str,
    path: &str,
    body: &[u8],
    state: &Arc<Mutex<ServerState>>,
) -> (&'static str, serde_json::Value) {
    match (method, path) {
        ("POST", "/api/pricing-analysis") => {
            let Ok(submitted) = serde_json::from_slice::<serde_json::Value>(body) else {
                return ("400 Bad Request", serde_json::json!({"error": "bad json"}));
            };
            let mut state = state.lock().expect("server state");
            state.next_id += 1;
            let project_id = format!("pa-{:03}", state.next_id);
            state.records.insert(project_id.clone(), submitted);
            (
                "201 Created",
                serde_json::json!({ "project_id": project_id }),
            )
        }
        ("GET", path) if path.starts_with("/api/pricing-analysis/") => {
            let project_id = path.trim_start_matches("/api/pricing-analysis/");
            let state = state.lock().expect("server state");
            match state.records.get(project_id) {
                Some(record) => {
                    let mut full = record.clone();
                    full["project_id"] = serde_json::json!(project_id);
                    ("200 OK", full)
                }
                None => (
                    "404 Not Found",
                    serde_json::json!({"error": "record not found"}),
                ),
            }
        }
        _ => ("404 Not Found", serde_json::json!({"error": "no route"})),
    }
}

fn respond(mut stream: TcpStream, status: &str, body: &serde_json::Value) {
    let body = body.to_string();
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
}

/// Run the compiled binary with the given arguments, panicking on spawn
/// failure but returning non-success outputs for assertion.
pub fn pran(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pran"))
        .args(args)
        .output()
        .expect("run pran")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
