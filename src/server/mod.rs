//! HTTP server wiring: shared state and router construction.

mod app;
mod state;

pub use app::create_app;
pub use state::AppState;
