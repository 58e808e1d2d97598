//! HTTP gateway module
//!
//! Serves the two handler groups side by side: the inference gateway at
//! `/api/ai` and the record store adapter at `/api/data`.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
