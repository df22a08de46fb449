use crate::coin::OutcomeSource;
use crate::models::Snapshot;
use crate::runner::Pacing;
use crate::session::Session;
use crate::storage::{Store, load_progress};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handle to the one application session, shared with every handler.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
    pub store: Arc<dyn Store>,
    pub coin: Arc<dyn OutcomeSource>,
    pub pacing: Pacing,
}

impl AppState {
    pub fn new(
        session: Session,
        store: Arc<dyn Store>,
        coin: Arc<dyn OutcomeSource>,
        pacing: Pacing,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            store,
            coin,
            pacing,
        }
    }

    /// Builds the session from whatever the store holds.
    pub async fn load(store: Arc<dyn Store>, coin: Arc<dyn OutcomeSource>, pacing: Pacing) -> Self {
        let record = load_progress(store.as_ref()).await;
        Self::new(Session::from_record(record), store, coin, pacing)
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.session.lock().await.snapshot()
    }
}
