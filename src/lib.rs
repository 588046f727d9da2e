//
//  billplz
//  lib.rs
//

//! # Billplz API Client Library
//!
//! A typed Rust client for the [Billplz](https://www.billplz.com) payment
//! gateway API v3.
//!
//! ## Overview
//!
//! This library handles the three things every Billplz call needs:
//!
//! - **Authentication**: the API key is base64-encoded once at client
//!   construction and sent as an HTTP Basic `Authorization` header on every
//!   request.
//! - **Parameter encoding**: nested parameter objects are flattened into the
//!   gateway's bracketed-key convention (`split_payment[email]`) as either
//!   URL-encoded pairs or multipart form fields, with image-upload fields
//!   carrying file content.
//! - **Typed responses**: JSON response bodies are decoded into documented
//!   response shapes.
//!
//! ## Module Structure
//!
//! - [`config`]: Client configuration (API key and target environment)
//! - [`api`]: Transport context, parameter encoder, and resource operations
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use billplz::{Billplz, Config, Environment};
//! use billplz::api::collections::CreateCollectionParams;
//!
//! # async fn example() -> Result<(), billplz::ApiError> {
//! let client = Billplz::new(Config::new("your-api-key", Environment::Sandbox))?;
//!
//! let collection = client
//!     .collections
//!     .create(CreateCollectionParams {
//!         title: "My Store".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("Created collection {}", collection.id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Scope
//!
//! The library issues one HTTP request per operation and imposes no retries,
//! timeouts, or rate limiting of its own; callers who need transport-level
//! resilience wrap their calls accordingly.

/// Client configuration.
///
/// Holds the two configuration inputs the gateway needs: the API key and the
/// target environment (sandbox or production). The environment determines
/// the base URL via an exhaustive match over a closed enum.
pub mod config;

/// API client implementation for the Billplz gateway.
///
/// This module provides:
/// - [`api::client`]: The authenticated HTTP transport context
/// - [`api::params`]: The parameter-tree encoder (bracketed keys, file fields)
/// - [`api::collections`]: Collection operations
/// - [`api::open_collections`]: Open collection (payment form) operations
/// - [`api::common`]: Error taxonomy and shared response shapes
pub mod api;

/// Re-export of the top-level client facade.
///
/// [`Billplz`] bundles the resource handles (`collections`,
/// `open_collections`) over a single shared transport context.
pub use api::Billplz;

/// Re-export of the unified API error type.
pub use api::common::ApiError;

/// Re-exports of the configuration types.
pub use config::{Config, ConfigError, Environment};

/// Re-exports of the parameter-encoding types, for callers that build
/// request bodies directly against the transport context.
pub use api::params::{FormField, ParamTree, ParamValue};

/// Library version, derived from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
