pub mod app;
pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod histogram;
pub mod models;
pub mod state;
pub mod storage;
pub mod ui;
pub mod validation;

pub use app::router;
pub use config::Config;
pub use histogram::{build as build_histogram, DailyBucket, TimestampedEvent};
pub use state::AppState;
pub use storage::load_or_create_identity;
