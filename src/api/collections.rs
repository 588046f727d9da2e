//
//  billplz
//  api/collections.rs
//

//! Billplz Collection operations.
//!
//! A collection is the billing grouping entity bills are created under,
//! analogous to a merchant sub-account or product line. Creation supports an
//! optional logo upload and an optional split-payment rule.
//!
//! # Example
//!
//! ```rust,no_run
//! use billplz::{Billplz, Config, Environment};
//! use billplz::api::collections::{CreateCollectionParams, SplitPaymentParams};
//!
//! # async fn example() -> Result<(), billplz::ApiError> {
//! let client = Billplz::new(Config::new("api-key", Environment::Sandbox))?;
//!
//! let collection = client
//!     .collections
//!     .create(CreateCollectionParams {
//!         title: "My Store".to_string(),
//!         logo: Some("uploads/logo.png".into()),
//!         split_payment: Some(SplitPaymentParams {
//!             email: "verified@example.com".to_string(),
//!             fixed_cut: Some(100),
//!             variable_cut: None,
//!             split_header: true,
//!         }),
//!     })
//!     .await?;
//! println!("Collection id: {}", collection.id);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::api::common::{ApiError, SplitPayment};
use crate::api::params::ParamTree;

/// A split-payment rule to attach at creation time.
///
/// Exactly one of `fixed_cut` and `variable_cut` should be set; the gateway
/// enforces that combination, not this library. Both cut fields are always
/// sent, as the literal `null` when unset — the gateway reads an explicit
/// null as "this cut does not apply", which is not the same as omitting the
/// field.
#[derive(Debug, Clone)]
pub struct SplitPaymentParams {
    /// Email address of the rule's recipient (must be a verified Billplz
    /// account).
    pub email: String,

    /// Fixed cut in the smallest currency unit (e.g. `100` cents for RM 1.00).
    pub fixed_cut: Option<i64>,

    /// Percentage cut as a positive integer.
    pub variable_cut: Option<i64>,

    /// Whether bill and receipt templates show the recipient's infographic.
    pub split_header: bool,
}

impl SplitPaymentParams {
    pub(crate) fn into_tree(self) -> ParamTree {
        ParamTree::new()
            .with("email", self.email)
            .with("fixed_cut", self.fixed_cut)
            .with("variable_cut", self.variable_cut)
            .with("split_header", self.split_header)
    }
}

/// Parameters for creating a collection.
#[derive(Debug, Clone, Default)]
pub struct CreateCollectionParams {
    /// Collection title, displayed on bill templates.
    pub title: String,

    /// Path to a logo image. The gateway resizes it to avatar (40x40) and
    /// thumb (180x180) dimensions; whitelisted formats are `jpg`, `jpeg`,
    /// `gif` and `png`. Omitted from the request when unset.
    pub logo: Option<PathBuf>,

    /// Split-payment rule for the collection. Omitted when unset.
    pub split_payment: Option<SplitPaymentParams>,
}

impl CreateCollectionParams {
    fn into_tree(self) -> ParamTree {
        let mut tree = ParamTree::new().with("title", self.title);
        if let Some(logo) = self.logo {
            tree.insert("logo", logo);
        }
        if let Some(split_payment) = self.split_payment {
            tree.insert("split_payment", split_payment.into_tree());
        }
        tree
    }
}

/// Logo URLs returned for a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionLogo {
    /// URL of the 180x180 rendition, null until processing completes.
    #[serde(default)]
    pub thumb_url: Option<String>,

    /// URL of the 40x40 rendition, null until processing completes.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A collection, as returned by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    /// The collection id, needed by the Bill API.
    pub id: String,

    /// The collection title.
    pub title: String,

    /// Logo renditions.
    #[serde(default)]
    pub logo: Option<CollectionLogo>,

    /// The collection's split-payment rule.
    #[serde(default)]
    pub split_payment: Option<SplitPayment>,
}

/// Collection operations.
///
/// Obtained from [`Billplz::collections`](crate::Billplz); shares the
/// client's transport context.
#[derive(Debug, Clone)]
pub struct Collections {
    client: ApiClient,
}

impl Collections {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Creates a collection, optionally with a logo upload and a split rule.
    ///
    /// Issues `POST collections` as multipart form data; the `logo` field
    /// carries file content when set.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::FileRead`] if the logo path cannot be read,
    /// [`ApiError::Network`] for transport failures, and [`ApiError::Json`]
    /// if the response body does not decode as a collection (including
    /// gateway error bodies).
    pub async fn create(&self, params: CreateCollectionParams) -> Result<Collection, ApiError> {
        let response = self
            .client
            .request_multipart(Method::POST, "collections", &params.into_tree(), &["logo"])
            .await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_flatten_in_declaration_order() {
        let params = CreateCollectionParams {
            title: "My Store".to_string(),
            logo: None,
            split_payment: Some(SplitPaymentParams {
                email: "a@b.com".to_string(),
                fixed_cut: None,
                variable_cut: Some(5),
                split_header: false,
            }),
        };

        assert_eq!(
            params.into_tree().to_pairs(),
            vec![
                ("title".to_string(), "My Store".to_string()),
                ("split_payment[email]".to_string(), "a@b.com".to_string()),
                ("split_payment[fixed_cut]".to_string(), "null".to_string()),
                ("split_payment[variable_cut]".to_string(), "5".to_string()),
                ("split_payment[split_header]".to_string(), "false".to_string()),
            ]
        );
    }

    #[test]
    fn test_unset_logo_is_omitted() {
        let params = CreateCollectionParams {
            title: "t".to_string(),
            ..Default::default()
        };

        assert_eq!(
            params.into_tree().to_pairs(),
            vec![("title".to_string(), "t".to_string())]
        );
    }

    #[tokio::test]
    async fn test_create_decodes_collection_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v3/collections")
            .with_status(200)
            .with_body(
                r#"{
                    "id": "inbmmepb",
                    "title": "My Store",
                    "logo": {"thumb_url": null, "avatar_url": null},
                    "split_payment": {
                        "email": "a@b.com",
                        "fixed_cut": 100,
                        "variable_cut": null,
                        "split_header": true
                    }
                }"#,
            )
            .create_async()
            .await;

        let collections = Collections::new(ApiClient::with_base_url(
            "test-key",
            format!("{}/api/v3/", server.url()),
        ));
        let collection = collections
            .create(CreateCollectionParams {
                title: "My Store".to_string(),
                ..Default::default()
            })
            .await
            .expect("create");

        assert_eq!(collection.id, "inbmmepb");
        assert_eq!(collection.title, "My Store");
        let logo = collection.logo.expect("logo");
        assert!(logo.thumb_url.is_none());
        let split = collection.split_payment.expect("split payment");
        assert_eq!(split.fixed_cut, Some(100));
        assert!(split.variable_cut.is_none());
        assert!(split.split_header);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_gateway_error_body_surfaces_as_decode_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v3/collections")
            .with_status(422)
            .with_body(r#"{"error":{"type":"InvalidRequestError","message":["Title can't be blank"]}}"#)
            .create_async()
            .await;

        let collections = Collections::new(ApiClient::with_base_url(
            "test-key",
            format!("{}/api/v3/", server.url()),
        ));
        let err = collections
            .create(CreateCollectionParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Json(_)));
    }
}
