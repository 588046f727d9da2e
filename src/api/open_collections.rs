//
//  billplz
//  api/open_collections.rs
//

//! Billplz Open Collection (payment form) operations.
//!
//! An open collection is a publicly shareable payment page generated from a
//! collection. The amount can be fixed, or left open for the payer to decide
//! (`amount` sent as the explicit `null`); quantity works the same way.

use std::path::PathBuf;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::api::common::{ApiError, SplitPayment};
use crate::api::params::ParamTree;

use super::collections::SplitPaymentParams;

/// Parameters for creating an open collection.
///
/// `title`, `description` and `amount` are the gateway's required trio;
/// `amount` set to `None` is sent as the explicit `null`, which makes the
/// payment form open-amount. The remaining optionals are omitted from the
/// request entirely when unset.
#[derive(Debug, Clone, Default)]
pub struct CreateOpenCollectionParams {
    /// Payment form title, displayed on the page and bill template.
    pub title: String,

    /// Payment form description.
    pub description: String,

    /// Amount in the smallest currency unit. `None` is sent as `null` and
    /// lets the payer specify the amount.
    pub amount: Option<i64>,

    /// Whether the amount is fixed (payer cannot change it).
    pub fixed_amount: Option<bool>,

    /// Whether the quantity is fixed at one.
    pub fixed_quantity: Option<bool>,

    /// Label of the payment button (e.g. `"Pay"` or `"Buy"`).
    pub payment_button: Option<String>,

    /// Label for the first reference field shown on the form.
    pub reference_1_label: Option<String>,

    /// Label for the second reference field shown on the form.
    pub reference_2_label: Option<String>,

    /// Email address shown as the contact link on the form.
    pub email_link: Option<String>,

    /// Path to a photo for the form. The gateway resizes it to retina
    /// (960x960) and avatar (180x180) dimensions.
    pub photo: Option<PathBuf>,

    /// Split-payment rule for the payment form.
    pub split_payment: Option<SplitPaymentParams>,
}

impl CreateOpenCollectionParams {
    fn into_tree(self) -> ParamTree {
        let mut tree = ParamTree::new()
            .with("title", self.title)
            .with("description", self.description)
            .with("amount", self.amount);
        if let Some(fixed_amount) = self.fixed_amount {
            tree.insert("fixed_amount", fixed_amount);
        }
        if let Some(fixed_quantity) = self.fixed_quantity {
            tree.insert("fixed_quantity", fixed_quantity);
        }
        if let Some(payment_button) = self.payment_button {
            tree.insert("payment_button", payment_button);
        }
        if let Some(label) = self.reference_1_label {
            tree.insert("reference_1_label", label);
        }
        if let Some(label) = self.reference_2_label {
            tree.insert("reference_2_label", label);
        }
        if let Some(email_link) = self.email_link {
            tree.insert("email_link", email_link);
        }
        if let Some(photo) = self.photo {
            tree.insert("photo", photo);
        }
        if let Some(split_payment) = self.split_payment {
            tree.insert("split_payment", split_payment.into_tree());
        }
        tree
    }
}

/// Photo URLs returned for an open collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenCollectionPhoto {
    /// URL of the 960x960 rendition, null until processing completes.
    #[serde(default)]
    pub retina_url: Option<String>,

    /// URL of the 180x180 rendition, null until processing completes.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// An open collection, as returned by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenCollection {
    /// The open collection id.
    pub id: String,

    /// The payment form title.
    pub title: String,

    /// The payment form description.
    #[serde(default)]
    pub description: Option<String>,

    /// Amount in the smallest currency unit; null for open-amount forms.
    #[serde(default)]
    pub amount: Option<i64>,

    /// The payment button label.
    #[serde(default)]
    pub payment_button: Option<String>,

    /// Photo renditions.
    #[serde(default)]
    pub photo: Option<OpenCollectionPhoto>,

    /// Public URL of the payment form.
    #[serde(default)]
    pub url: Option<String>,

    /// The open collection's split-payment rule.
    #[serde(default)]
    pub split_payment: Option<SplitPayment>,
}

/// Open collection operations.
///
/// Obtained from [`Billplz::open_collections`](crate::Billplz); shares the
/// client's transport context.
#[derive(Debug, Clone)]
pub struct OpenCollections {
    client: ApiClient,
}

impl OpenCollections {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Creates an open collection (payment form).
    ///
    /// Issues `POST open_collections` as multipart form data; the `photo`
    /// field carries file content when set.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::FileRead`] if the photo path cannot be read,
    /// [`ApiError::Network`] for transport failures, and [`ApiError::Json`]
    /// if the response body does not decode as an open collection (including
    /// gateway error bodies).
    pub async fn create(
        &self,
        params: CreateOpenCollectionParams,
    ) -> Result<OpenCollection, ApiError> {
        let response = self
            .client
            .request_multipart(
                Method::POST,
                "open_collections",
                &params.into_tree(),
                &["photo"],
            )
            .await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_amount_is_sent_as_explicit_null() {
        let params = CreateOpenCollectionParams {
            title: "Donations".to_string(),
            description: "Open amount".to_string(),
            amount: None,
            payment_button: Some("Pay".to_string()),
            ..Default::default()
        };

        assert_eq!(
            params.into_tree().to_pairs(),
            vec![
                ("title".to_string(), "Donations".to_string()),
                ("description".to_string(), "Open amount".to_string()),
                ("amount".to_string(), "null".to_string()),
                ("payment_button".to_string(), "Pay".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_create_decodes_open_collection_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v3/open_collections")
            .with_status(200)
            .with_body(
                r#"{
                    "id": "0pp87t_6",
                    "title": "DONATIONS",
                    "description": "Open amount",
                    "amount": null,
                    "payment_button": "pay",
                    "photo": {"retina_url": null, "avatar_url": null},
                    "url": "https://www.billplz.com/0pp87t_6",
                    "split_payment": null
                }"#,
            )
            .create_async()
            .await;

        let open_collections = OpenCollections::new(ApiClient::with_base_url(
            "test-key",
            format!("{}/api/v3/", server.url()),
        ));
        let form = open_collections
            .create(CreateOpenCollectionParams {
                title: "Donations".to_string(),
                description: "Open amount".to_string(),
                ..Default::default()
            })
            .await
            .expect("create");

        assert_eq!(form.id, "0pp87t_6");
        assert!(form.amount.is_none());
        assert_eq!(form.url.as_deref(), Some("https://www.billplz.com/0pp87t_6"));
        assert!(form.split_payment.is_none());
        mock.assert_async().await;
    }
}
