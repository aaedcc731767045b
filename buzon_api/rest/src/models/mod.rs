use serde::Serialize;

pub mod contact;

/// Error body shared by every endpoint: `success` is always false and
/// `message` is safe to show to the caller.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub success: bool,
    pub message: String,
}
