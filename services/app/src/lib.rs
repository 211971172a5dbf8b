pub mod adapters;
pub mod config;
pub mod error;
pub mod keys;
pub mod pages;
pub mod session;
pub mod state;

pub use error::AppError;
pub use state::AppState;
