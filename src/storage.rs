use crate::models::ProgressRecord;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::fs;
use tracing::{debug, error, warn};

/// Versioned key of the single persisted record.
pub const STORAGE_KEY: &str = "coin_toss_progress_v1";

/// Durable key-value slot. Values are opaque text.
#[async_trait]
pub trait Store: Send + Sync {
    async fn read(&self, key: &str) -> io::Result<Option<String>>;
    async fn write(&self, key: &str, value: &str) -> io::Result<()>;
    /// Removing a key that is not there succeeds.
    async fn remove(&self, key: &str) -> io::Result<()>;
}

/// One `<key>.json` file per key inside `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub async fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let store = Self::new(dir);
        fs::create_dir_all(&store.dir).await?;
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl Store for FileStore {
    async fn read(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn write(&self, key: &str, value: &str) -> io::Result<()> {
        fs::write(self.path_for(key), value).await
    }

    async fn remove(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path_for(key)).await {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// Process-local slot, used when no data directory is usable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn read(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> io::Result<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> io::Result<()> {
        self.entries().remove(key);
        Ok(())
    }
}

pub async fn load_progress(store: &dyn Store) -> ProgressRecord {
    match store.read(STORAGE_KEY).await {
        Ok(Some(text)) => parse_progress(&text),
        Ok(None) => ProgressRecord::default(),
        Err(err) => {
            error!("failed to read progress: {err}");
            ProgressRecord::default()
        }
    }
}

/// Best effort: a failed write leaves the in-memory counters authoritative.
pub async fn save_progress(store: &dyn Store, record: &ProgressRecord) {
    let payload = match serde_json::to_string(record) {
        Ok(payload) => payload,
        Err(err) => {
            warn!("failed to encode progress: {err}");
            return;
        }
    };
    if let Err(err) = store.write(STORAGE_KEY, &payload).await {
        warn!("failed to persist progress: {err}");
    }
}

pub async fn clear_progress(store: &dyn Store) {
    if let Err(err) = store.remove(STORAGE_KEY).await {
        warn!("failed to clear progress: {err}");
    }
}

/// Lenient decode: each counter is coerced on its own and falls back to zero,
/// so one bad field never discards the others.
pub fn parse_progress(text: &str) -> ProgressRecord {
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(err) => {
            debug!("ignoring unparsable progress record: {err}");
            return ProgressRecord::default();
        }
    };
    let Some(fields) = value.as_object() else {
        debug!("ignoring progress record that is not an object");
        return ProgressRecord::default();
    };

    ProgressRecord {
        heads: counter(fields, "heads"),
        tails: counter(fields, "tails"),
        total: counter(fields, "total"),
        correct: counter(fields, "correct"),
    }
}

fn counter(fields: &Map<String, Value>, name: &str) -> u64 {
    fields.get(name).map(coerce_count).unwrap_or(0)
}

fn coerce_count(value: &Value) -> u64 {
    match value {
        Value::Number(number) => match number.as_u64() {
            Some(n) => n,
            None => number.as_f64().map(float_count).unwrap_or(0),
        },
        Value::String(text) => text_count(text.trim()),
        Value::Bool(flag) => u64::from(*flag),
        Value::Null | Value::Array(_) | Value::Object(_) => 0,
    }
}

/// Numeric text, including unsigned `0x`/`0o`/`0b` integer literals.
fn text_count(text: &str) -> u64 {
    if text.is_empty() {
        return 0;
    }
    let radix = match text.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => 16,
        Some("0o") => 8,
        Some("0b") => 2,
        _ => return text.parse::<f64>().map(float_count).unwrap_or(0),
    };
    let digits = &text[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return 0;
    }
    u64::from_str_radix(digits, radix).unwrap_or(0)
}

fn float_count(value: f64) -> u64 {
    if value.is_finite() && value >= 0.0 {
        value.trunc() as u64
    } else {
        0
    }
}
