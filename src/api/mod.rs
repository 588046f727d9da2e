//
//  billplz
//  api/mod.rs
//

//! # API Client Layer
//!
//! This module implements the Billplz API v3 surface.
//!
//! ## Architecture
//!
//! - [`client`]: The authenticated transport context ([`client::ApiClient`]):
//!   Basic credential, base URL resolution, URL-encoded and multipart
//!   dispatch
//! - [`params`]: The parameter encoder: bracketed-key flattening of nested
//!   parameter trees, with declared file-capable fields in multipart mode
//! - [`common`]: The [`common::ApiError`] taxonomy and shared response shapes
//! - [`collections`], [`open_collections`]: Resource operations — thin
//!   compositions that build a parameter tree, dispatch, and decode JSON
//!
//! ## Usage
//!
//! ```rust,no_run
//! use billplz::{Billplz, Config, Environment};
//!
//! # fn example() -> Result<(), billplz::ApiError> {
//! let client = Billplz::new(Config::new("api-key", Environment::Production))?;
//! // client.collections.create(...).await
//! // client.open_collections.create(...).await
//! # Ok(())
//! # }
//! ```

/// Core HTTP transport context with authentication.
pub mod client;

/// Shared error taxonomy and response shapes.
pub mod common;

/// Nested-parameter encoding into bracketed-key bodies.
pub mod params;

/// Collection resource operations.
pub mod collections;

/// Open collection (payment form) resource operations.
pub mod open_collections;

use crate::config::Config;

use self::client::ApiClient;
use self::collections::Collections;
use self::common::ApiError;
use self::open_collections::OpenCollections;

/// The top-level Billplz client.
///
/// Bundles the resource handles over one shared transport context. The
/// context is immutable after construction, so the client (and its handles)
/// can be used from concurrent tasks without synchronization.
///
/// # Example
///
/// ```rust,no_run
/// use billplz::{Billplz, Config, Environment};
///
/// # fn example() -> Result<(), billplz::ApiError> {
/// let billplz = Billplz::new(Config::new("api-key", Environment::Sandbox))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Billplz {
    /// Collection operations.
    pub collections: Collections,

    /// Open collection (payment form) operations.
    pub open_collections: OpenCollections,
}

impl Billplz {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let client = ApiClient::new(&config)?;
        Ok(Self {
            collections: Collections::new(client.clone()),
            open_collections: OpenCollections::new(client),
        })
    }
}
