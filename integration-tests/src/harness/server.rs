use crate::harness::{CapturedEvent, init_test_tracing};
use arc_swap::ArcSwap;
use reqwest::blocking::{Client, RequestBuilder};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::net::TcpStream;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread;
use std::time::{Duration, Instant};
use tailway_core::conf::{ENTRYPOINT_FILE, load_config};
use tailway_core::server::{build_pingora_server, build_runtime_state};
use tempfile::TempDir;

pub const ROUTE: &str = "/bin/tail/log";

/// Handle to a running Tailway test server with its own log directory.
pub struct TestServer {
    base_url: String,
    client: Client,
    log_dir: PathBuf,
    // Owns the config and log directories for the server's lifetime.
    _root: TempDir,
}

impl TestServer {
    /// Start a server tailing a fresh log directory seeded with `logs`
    /// (`name` -> contents).
    ///
    /// Each server gets its own port and directory, so tests can run in parallel.
    pub fn start(logs: &[(&str, &str)]) -> Self {
        // Initialize tracing (this must happen first).
        init_test_tracing(events());

        let root = tempfile::tempdir().expect("failed to create temp dir");
        let log_dir = root.path().join("logs");
        fs::create_dir(&log_dir).expect("failed to create log dir");

        for (name, contents) in logs {
            fs::write(log_dir.join(name), contents).expect("failed to seed log file");
        }

        let listen_port = free_port();
        write_config(root.path(), listen_port);

        let validated = load_config(root.path()).expect("failed to load test config");
        let cfg = validated.config;

        // Wrap in ArcSwap (matches production shape)
        let state = Arc::new(ArcSwap::from_pointee(build_runtime_state(&cfg)));

        let server = build_pingora_server(&cfg, state).expect("failed to build tailway server");

        // Run server in background thread
        thread::spawn(move || {
            server.run_forever();
        });

        let base_url = format!("http://127.0.0.1:{listen_port}");

        // Wait for server to accept connections
        wait_for_server(&base_url);

        let client = Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .expect("failed to build client");

        Self {
            base_url,
            client,
            log_dir,
            _root: root,
        }
    }

    /// GET the tail endpoint with a raw query string.
    pub fn tail(&self, query: &str) -> RequestBuilder {
        self.get(&format!("{ROUTE}?{query}"))
    }

    /// Convenience helper for GET requests.
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(format!("{}{}", self.base_url, path))
    }

    pub fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Append to a log, creating it if needed.
    pub fn append(&self, name: &str, contents: &str) {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.log_dir.join(name))
            .expect("failed to open log for append");
        file.write_all(contents.as_bytes())
            .expect("failed to append to log");
    }

    /// Replace a log's contents, as a rotation would.
    pub fn rotate(&self, name: &str, contents: &str) {
        fs::write(self.log_dir.join(name), contents).expect("failed to rotate log");
    }
}

fn write_config(root: &Path, port: u16) {
    let hcl = format!(
        r#"
server = {{
  version = 1
}}

listener = {{
  addr = "127.0.0.1:{port}"
}}

tail = {{
  route                   = "{ROUTE}"
  log_dir                 = "logs"
  bytes_to_read           = 2048
  refresh_interval_millis = 1000
}}
"#
    );

    fs::write(root.join(ENTRYPOINT_FILE), hcl).expect("failed to write test config");
}

/// Poll until the server responds (or panic).
fn wait_for_server(listen_addr: &str) {
    let addr = listen_addr.strip_prefix("http://").unwrap_or(listen_addr);

    let deadline = Instant::now() + Duration::from_secs(2);

    loop {
        match TcpStream::connect(addr) {
            Ok(_) => return,
            Err(_) => {
                if Instant::now() > deadline {
                    panic!("server failed to start at {}", listen_addr);
                }
                thread::sleep(Duration::from_millis(25));
            }
        }
    }
}

static EVENTS: OnceLock<Arc<Mutex<Vec<CapturedEvent>>>> = OnceLock::new();

pub fn events() -> Arc<Mutex<Vec<CapturedEvent>>> {
    EVENTS
        .get_or_init(|| Arc::new(Mutex::new(Vec::new())))
        .clone()
}

/// Allocate a free port on localhost.
/// This is required to avoid port collisions when running tests in parallel.
fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}
