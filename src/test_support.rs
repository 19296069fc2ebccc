//! Shared helpers for tests.
//!
//! Provides a minimal localhost HTTP stub that speaks just enough of the
//! torrent client's web API for the session client to be exercised against
//! real sockets, plus filesystem helpers for building save-path trees with
//! controlled modification times.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;

/// A canned response for one API path.
#[derive(Debug, Clone)]
pub(crate) struct StubRoute {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
    /// Cookie to set on the response (the login route sets the session id).
    pub set_cookie: Option<&'static str>,
}

impl StubRoute {
    pub(crate) fn json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: "application/json",
            body: body.into(),
            set_cookie: None,
        }
    }

    pub(crate) fn text(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: "text/plain",
            body: body.into(),
            set_cookie: None,
        }
    }

    pub(crate) fn login_ok() -> Self {
        Self {
            status: 200,
            content_type: "text/plain",
            body: "Ok.".to_string(),
            set_cookie: Some("SID=stub-session; path=/"),
        }
    }

    pub(crate) fn login_fails() -> Self {
        Self::text("Fails.")
    }
}

/// A request the stub observed, for assertions.
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub body: String,
}

/// Minimal single-threaded HTTP stub bound to an ephemeral localhost port.
///
/// Routes are matched on the exact path (query string excluded). Unmatched
/// paths get a 404. The accept loop runs on a detached thread for the life
/// of the test process.
pub(crate) struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    pub(crate) fn start(routes: HashMap<&'static str, StubRoute>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind stub server");
        let addr = listener.local_addr().unwrap();
        let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                handle_connection(stream, &routes, &recorded);
            }
        });

        Self { addr, requests }
    }

    pub(crate) fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn handle_connection(
    stream: TcpStream,
    routes: &HashMap<&'static str, StubRoute>,
    recorded: &Arc<Mutex<Vec<RecordedRequest>>>,
) {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();
    let (path, query) = match target.split_once('?') {
        Some((p, q)) => (p.to_string(), q.to_string()),
        None => (target, String::new()),
    };

    // Headers; only Content-Length matters for reading the body.
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).is_err() || line.trim().is_empty() {
            break;
        }
        if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }

    let mut body = vec![0u8; content_length];
    if content_length > 0 && reader.read_exact(&mut body).is_err() {
        return;
    }

    recorded.lock().unwrap().push(RecordedRequest {
        method,
        path: path.clone(),
        query,
        body: String::from_utf8_lossy(&body).to_string(),
    });

    let response = match routes.get(path.as_str()) {
        Some(route) => {
            let cookie_header = route
                .set_cookie
                .map(|c| format!("Set-Cookie: {}\r\n", c))
                .unwrap_or_default();
            format!(
                "HTTP/1.1 {} OK\r\nContent-Type: {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n{}",
                route.status,
                route.content_type,
                route.body.len(),
                cookie_header,
                route.body
            )
        }
        None => {
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string()
        }
    };

    let mut stream = reader.into_inner();
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

/// Create a file with content under `root`, creating parent directories.
pub(crate) fn write_file(root: &Path, relative: &str, content: &str) -> std::path::PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// Backdate a file or directory's modification time by whole hours.
pub(crate) fn backdate(path: &Path, hours: u64) {
    let mtime = std::time::SystemTime::now() - std::time::Duration::from_secs(hours * 3600);
    let file = std::fs::File::open(path).unwrap();
    file.set_times(
        std::fs::FileTimes::new()
            .set_accessed(mtime)
            .set_modified(mtime),
    )
    .unwrap();
}
