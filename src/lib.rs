pub mod app;
pub mod day;
pub mod errors;
pub mod handlers;
pub mod history;
pub mod models;
pub mod scheduler;
pub mod session;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;

pub use app::router;
pub use session::Session;
pub use state::AppState;
pub use storage::{open_store, resolve_data_path, resolve_default_theme};
