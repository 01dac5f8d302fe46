//! API models

pub mod alerts;
pub mod auth;
pub mod dashboard;
pub mod forms;

pub use alerts::*;
pub use auth::*;
pub use dashboard::*;
pub use forms::*;

use serde::Serialize;

/// Plain acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
