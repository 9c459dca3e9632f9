pub mod convert;
pub mod files;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use routes::create_router;

use serde::Serialize;

/// JSON error body shared by all handlers.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
