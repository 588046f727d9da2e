//
//  billplz
//  api/common/mod.rs
//

//! Common API types shared across Billplz resources.
//!
//! This module provides:
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`SplitPayment`] - The split-payment rule shape embedded in both
//!   collection and open-collection responses
//!
//! # Error handling
//!
//! A non-2xx gateway response is deliberately *not* an `ApiError`: the
//! transport layer returns the raw response for the caller to inspect, and
//! the resource layer decodes bodies without checking status. The variants
//! here cover failures on this side of the wire — bad configuration, a file
//! that cannot be read for upload, the network itself, and response bodies
//! that do not match the documented shapes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;

/// Unified error type for all Billplz API operations.
///
/// # Example
///
/// ```rust
/// use billplz::ApiError;
///
/// fn handle<T>(result: Result<T, ApiError>) {
///     match result {
///         Ok(_) => println!("Success!"),
///         Err(ApiError::FileRead { path, .. }) => {
///             eprintln!("Could not read upload file: {}", path);
///         }
///         Err(e) => eprintln!("Error: {}", e),
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid client configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A network-level error occurred during the request.
    ///
    /// Connection failures, TLS errors, and timeouts imposed by the caller's
    /// own HTTP configuration all surface here, unmodified and unretried.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A file declared for upload could not be read.
    ///
    /// Raised at encode time, before any network call is made.
    #[error("Failed to read upload file {path}: {source}")]
    FileRead {
        /// The path as supplied by the caller.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A response body could not be decoded into the documented shape.
    ///
    /// Gateway error bodies (non-2xx responses) surface this way when a
    /// resource operation decodes them; callers that need the raw error
    /// body use the transport layer directly.
    #[error("Failed to decode response: {0}")]
    Json(#[from] serde_json::Error),
}

/// A split-payment rule, as returned by the gateway.
///
/// Attached to collections and open collections to distribute a fixed or
/// percentage cut of each payment to a secondary verified account. Cut
/// fields are nullable: exactly one of `fixed_cut` and `variable_cut` is
/// set on an active rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitPayment {
    /// Email address of the rule's recipient (a verified Billplz account).
    #[serde(default)]
    pub email: Option<String>,

    /// Fixed cut in the smallest currency unit (e.g. cents).
    #[serde(default)]
    pub fixed_cut: Option<i64>,

    /// Percentage cut as a positive integer.
    #[serde(default)]
    pub variable_cut: Option<i64>,

    /// Whether bill and receipt templates show the recipient's infographic.
    #[serde(default)]
    pub split_header: bool,
}
