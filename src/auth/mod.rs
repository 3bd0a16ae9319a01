//! Authentication module for the GDAX API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Timestamp generation for signed requests
//! - HMAC-SHA256 signature generation for authenticated requests

mod credentials;
mod signature;
mod timestamp;

pub use credentials::Credentials;
pub use signature::sign_request;
pub use timestamp::{FixedTimestamp, SystemTimestamp, TimestampProvider};
