//! Type definitions shared across server modules
//!
//! - `response` - API response wrappers and error responses

pub mod response;

pub use response::{ApiResponse, ErrorResponse, error_codes};
