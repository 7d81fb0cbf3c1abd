pub mod auth;
pub mod config;
pub mod database;
pub mod disaster;
pub mod errors;
pub mod models;
pub mod routes;
pub mod state;

pub use config::Config;
pub use errors::{AppError, Result};
pub use state::AppState;
