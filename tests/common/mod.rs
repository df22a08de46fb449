#![allow(dead_code)]

use coin_toss::{AppState, router};
use reqwest::{Client, Response};
use serde::Deserialize;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Render feed as the page sees it.
#[derive(Debug, Deserialize)]
pub struct Snapshot {
    pub guess: Option<String>,
    pub heads: u64,
    pub tails: u64,
    pub total: u64,
    pub correct: u64,
    pub is_flipping: bool,
    pub message: String,
}

enum Backing {
    Binary(Child),
    InProcess(JoinHandle<()>),
}

/// A running server; stopped when dropped.
pub struct TestServer {
    pub base_url: String,
    backing: Backing,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        match &mut self.backing {
            Backing::Binary(child) => {
                let _ = child.kill();
                let _ = child.wait();
            }
            Backing::InProcess(task) => task.abort(),
        }
    }
}

impl TestServer {
    /// Runs the `coin_toss` binary with a private data dir and the given env.
    pub async fn binary(env: &[(&str, &str)]) -> Self {
        let port = free_port();
        let mut command = Command::new(env!("CARGO_BIN_EXE_coin_toss"));
        command
            .env("PORT", port.to_string())
            .env("APP_DATA_PATH", scratch_dir("http"))
            .env("RUST_LOG", "info")
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        for (name, value) in env {
            command.env(name, value);
        }
        let child = command.spawn().expect("failed to spawn server");

        #[cfg(unix)]
        kill_on_exit::register(child.id());

        let server = Self {
            base_url: format!("http://127.0.0.1:{port}"),
            backing: Backing::Binary(child),
        };
        server.wait_until_ready().await;
        server
    }

    /// Serves `router(state)` on the current runtime, so tests can pick the
    /// store, coin and pacing.
    pub async fn in_process(state: AppState) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind random port");
        let addr = listener.local_addr().expect("local addr");
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, router(state)).await;
        });

        let server = Self {
            base_url: format!("http://{addr}"),
            backing: Backing::InProcess(task),
        };
        server.wait_until_ready().await;
        server
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn wait_until_ready(&self) {
        let client = Client::new();
        let deadline = Instant::now() + Duration::from_secs(3);
        loop {
            if let Ok(resp) = client.get(self.url("/api/state")).send().await {
                if resp.status().is_success() {
                    return;
                }
            }
            if Instant::now() > deadline {
                panic!("server did not become ready");
            }
            sleep(Duration::from_millis(100)).await;
        }
    }

    pub async fn state(&self, client: &Client) -> Snapshot {
        client
            .get(self.url("/api/state"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }

    pub async fn post(&self, client: &Client, path: &str, body: serde_json::Value) -> Response {
        client.post(self.url(path)).json(&body).send().await.unwrap()
    }

    /// Posts and expects a successful snapshot back.
    pub async fn post_ok(&self, client: &Client, path: &str, body: serde_json::Value) -> Snapshot {
        let response = self.post(client, path, body).await;
        assert!(response.status().is_success(), "{path}: {}", response.status());
        response.json().await.unwrap()
    }
}

fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn scratch_dir(tag: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("coin_toss_{tag}_{}_{nanos}", std::process::id()));
    path.to_string_lossy().to_string()
}

/// Shared servers live in statics and are never dropped, so the child is
/// signalled from an `atexit` hook instead.
#[cfg(unix)]
mod kill_on_exit {
    use std::sync::Once;
    use std::sync::atomic::{AtomicI32, Ordering};

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}
