pub mod app;
pub mod coin;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod runner;
pub mod session;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{FileStore, MemoryStore, Store, load_progress};
