use std::sync::Arc;
use std::time::Instant;

use crate::dispatch::EmailDispatcher;

/// State shared by all handlers.
///
/// Capabilities are constructed once at startup and injected here; handlers
/// never reach for globals.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<EmailDispatcher>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(dispatcher: EmailDispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            started_at: Instant::now(),
        }
    }
}
