//! Shared helpers for integration tests: a tiny blocking HTTP server with
//! canned routes, and a prompter that replays scripted answers.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::Result;
use now_sc::config::Config;
use now_sc::interactive::Prompter;

// =============================================================================
// Test HTTP server
// =============================================================================

/// Canned response for one method + path
#[derive(Debug, Clone)]
pub struct Route {
    pub method: &'static str,
    pub path: String,
    pub status: u16,
    pub body: Vec<u8>,
}

impl Route {
    pub fn get(path: &str, status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            method: "GET",
            path: path.to_string(),
            status,
            body: body.into(),
        }
    }

    pub fn post(path: &str, status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            method: "POST",
            path: path.to_string(),
            status,
            body: body.into(),
        }
    }
}

/// Request as seen by the server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }
}

/// Blocking HTTP/1.1 server on 127.0.0.1, one request per connection.
///
/// Unknown routes get a 404. The accept thread is detached and lives until
/// the test process exits.
pub struct TestServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl TestServer {
    pub fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                if let Some(request) = read_request(&mut stream) {
                    let (status, body) = routes
                        .iter()
                        .find(|r| r.method == request.method && r.path == request.path)
                        .map(|r| (r.status, r.body.clone()))
                        .unwrap_or((404, br#"{"message":"Not Found"}"#.to_vec()));
                    recorded.lock().unwrap().push(request);
                    write_response(&mut stream, status, &body);
                }
            }
        });

        Self { base_url, requests }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut header_buf = Vec::with_capacity(1024);
    let mut byte = [0u8; 1];
    while !header_buf.ends_with(b"\r\n\r\n") {
        match stream.read(&mut byte) {
            Ok(0) | Err(_) => return None,
            Ok(_) => header_buf.push(byte[0]),
        }
    }

    let mut parsed_headers = [httparse::EMPTY_HEADER; 64];
    let mut req = httparse::Request::new(&mut parsed_headers);
    match req.parse(&header_buf) {
        Ok(httparse::Status::Complete(_)) => {}
        _ => return None,
    }

    let method = req.method.unwrap_or("").to_string();
    let path = req.path.unwrap_or("/").to_string();
    let headers: Vec<(String, String)> = req
        .headers
        .iter()
        .map(|h| (h.name.to_string(), String::from_utf8_lossy(h.value).to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("Content-Length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = vec![0u8; content_length];
    if content_length > 0 && stream.read_exact(&mut body).is_err() {
        return None;
    }

    Some(RecordedRequest {
        method,
        path,
        headers,
        body,
    })
}

fn write_response(stream: &mut TcpStream, status: u16, body: &[u8]) {
    let reason = match status {
        200 => "OK",
        201 => "Created",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        _ => "Unknown",
    };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
    let _ = stream.flush();
}

// =============================================================================
// Scripted prompter
// =============================================================================

/// One scripted answer
#[derive(Debug, Clone)]
pub enum Answer {
    Text(String),
    Confirm(bool),
    Select(usize),
}

pub fn text(s: &str) -> Answer {
    Answer::Text(s.to_string())
}

/// Replays answers in order; panics if the flow asks something unexpected.
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: answers.into(),
            asked: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, label: &str) -> Answer {
        self.asked.push(label.to_string());
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected prompt: {}", label))
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, label: &str, default: Option<&str>) -> Result<String> {
        match self.next(label) {
            Answer::Text(t) if t.is_empty() => Ok(default.unwrap_or_default().to_string()),
            Answer::Text(t) => Ok(t),
            other => panic!("expected text answer for {:?}, got {:?}", label, other),
        }
    }

    fn confirm(&mut self, label: &str, _default: bool) -> Result<bool> {
        match self.next(label) {
            Answer::Confirm(b) => Ok(b),
            other => panic!("expected confirm answer for {:?}, got {:?}", label, other),
        }
    }

    fn select(&mut self, label: &str, items: &[String]) -> Result<usize> {
        match self.next(label) {
            Answer::Select(i) => {
                assert!(i < items.len(), "select index {} out of {} items", i, items.len());
                Ok(i)
            }
            other => panic!("expected select answer for {:?}, got {:?}", label, other),
        }
    }
}

// =============================================================================
// Config
// =============================================================================

/// Config rooted at `dir` with every endpoint pointed at `server`.
pub fn config_for(
    dir: &Path,
    server: &TestServer,
    openrouter_key: Option<&str>,
    github_token: Option<&str>,
) -> Config {
    let vars = vec![
        ("NOW_SC_PROMPTS_URL", server.url(LISTING_PATH)),
        ("NOW_SC_TEMPLATES_URL", server.url("/Templates")),
        ("NOW_SC_GITHUB_API_URL", server.url("")),
        ("NOW_SC_OPENROUTER_URL", server.url(COMPLETIONS_PATH)),
        ("OPENROUTER_API_KEY", openrouter_key.unwrap_or_default().to_string()),
        ("GITHUB_PAT", github_token.unwrap_or_default().to_string()),
    ];

    Config::from_lookup(dir.to_path_buf(), move |key: &str| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.clone())
    })
}

pub const LISTING_PATH: &str = "/repos/Now-AI-Foundry/Now-SC-Base-Prompts/contents/Prompts";
pub const COMM_TEMPLATE_PATH: &str = "/Templates/servicenow_poc_status_template.html";
pub const COMPLETIONS_PATH: &str = "/api/v1/chat/completions";
