//
//  billplz
//  api/client.rs
//

//! # HTTP Transport Context for the Billplz API
//!
//! This module provides [`ApiClient`], the credential/transport context
//! every resource operation goes through. It holds the base64-encoded API
//! key and the resolved base URL for the lifetime of the client, and issues
//! authenticated requests in the two body encodings the gateway accepts.
//!
//! ## Contract
//!
//! - The `Authorization` header is HTTP Basic with the bare base64-encoded
//!   API key — no trailing colon-separated password segment. That is the
//!   gateway's convention and must not be "corrected".
//! - Request URLs are the base URL plus a relative path by plain
//!   concatenation; paths are passed without a leading slash
//!   (`"collections"`, not `"/collections"`).
//! - Responses come back raw, without status inspection: checking for
//!   gateway errors and parsing their bodies is the caller's job.
//! - No retries and no imposed timeout; transport failures propagate
//!   unmodified as [`ApiError::Network`].

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, Response};
use tracing::debug;

use crate::api::common::ApiError;
use crate::api::params::{FormField, ParamTree};
use crate::config::Config;

/// The authenticated HTTP transport for the Billplz API.
///
/// Immutable once constructed and cheap to clone; clones share the
/// underlying connection pool, and concurrent calls need no synchronization.
///
/// # Example
///
/// ```rust,no_run
/// use billplz::api::client::ApiClient;
/// use billplz::{Config, Environment, ParamTree};
/// use reqwest::Method;
///
/// # async fn example() -> Result<(), billplz::ApiError> {
/// let client = ApiClient::new(&Config::new("api-key", Environment::Sandbox))?;
/// let body = ParamTree::new().with("title", "My Store");
///
/// let response = client
///     .request_url_encoded(Method::POST, "collections", &body)
///     .await?;
/// // The caller inspects status and parses the body.
/// assert!(response.status().is_success());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// The underlying HTTP client.
    http: Client,
    /// The base64-encoded API key, as placed after `Basic ` in the
    /// `Authorization` header.
    credential: String,
    /// Resolved base URL, always ending in a trailing slash.
    base_url: String,
}

impl ApiClient {
    /// Creates a transport context from client configuration.
    ///
    /// The API key is base64-encoded (standard alphabet, padding kept) once
    /// here and reused for every request; the base URL is resolved from the
    /// configured environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(format!("billplz-rs/{}", crate::VERSION))
            .build()?;

        Ok(Self {
            http,
            credential: STANDARD.encode(&config.api_key),
            base_url: config.environment.base_url().to_string(),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(api_key: &str, base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            credential: STANDARD.encode(api_key),
            base_url: base_url.into(),
        }
    }

    /// Returns the resolved API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues a request with an `application/x-www-form-urlencoded` body.
    ///
    /// `body` is flattened into ordered bracketed-key pairs; `path` is
    /// relative to the base URL and must not start with a slash.
    ///
    /// Returns the raw response without status inspection. JSON decoding and
    /// gateway-error handling are the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the request could not be sent.
    pub async fn request_url_encoded(
        &self,
        method: Method,
        path: &str,
        body: &ParamTree,
    ) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "dispatching url-encoded request");

        let response = self
            .http
            .request(method, &url)
            .header(AUTHORIZATION, format!("Basic {}", self.credential))
            .form(&body.to_pairs())
            .send()
            .await?;

        Ok(response)
    }

    /// Issues a request with a `multipart/form-data` body.
    ///
    /// Identical contract to [`request_url_encoded`](Self::request_url_encoded),
    /// except that `body` is flattened into multipart fields and the
    /// top-level keys named in `file_fields` carry file content. Files are
    /// read in full at encode time, so an unreadable path fails with
    /// [`ApiError::FileRead`] before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::FileRead`] for an unreadable upload file and
    /// [`ApiError::Network`] if the request could not be sent.
    pub async fn request_multipart(
        &self,
        method: Method,
        path: &str,
        body: &ParamTree,
        file_fields: &[&str],
    ) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let form = build_form(body.to_form_fields(file_fields)?)?;
        debug!(%method, %url, "dispatching multipart request");

        let response = self
            .http
            .request(method, &url)
            .header(AUTHORIZATION, format!("Basic {}", self.credential))
            .multipart(form)
            .send()
            .await?;

        Ok(response)
    }
}

/// Converts flattened form fields into a reqwest multipart form, preserving
/// field order.
fn build_form(fields: Vec<FormField>) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            FormField::Text { name, value } => form.text(name, value),
            FormField::File {
                name,
                filename,
                content_type,
                data,
            } => {
                let part = Part::bytes(data)
                    .file_name(filename)
                    .mime_str(&content_type)?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    // base64("test-key")
    const CREDENTIAL: &str = "dGVzdC1rZXk=";

    fn test_client(server: &mockito::Server) -> ApiClient {
        ApiClient::with_base_url("test-key", format!("{}/api/v3/", server.url()))
    }

    #[tokio::test]
    async fn test_url_encoded_request_sends_basic_credential_and_pairs() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v3/collections")
            .match_header("authorization", format!("Basic {CREDENTIAL}").as_str())
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("title".into(), "My Store".into()),
                mockito::Matcher::UrlEncoded("split_payment[fixed_cut]".into(), "null".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"id":"abc"}"#)
            .create_async()
            .await;

        let body = ParamTree::new().with("title", "My Store").with(
            "split_payment",
            ParamTree::new().with("fixed_cut", Option::<i64>::None),
        );
        let response = test_client(&server)
            .request_url_encoded(Method::POST, "collections", &body)
            .await
            .expect("request");

        assert!(response.status().is_success());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_multipart_request_sends_basic_credential_and_file_part() {
        let mut file = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .expect("create temp file");
        file.write_all(b"png-bytes").expect("write temp file");
        let path = file.path().display().to_string();

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v3/collections")
            .match_header("authorization", format!("Basic {CREDENTIAL}").as_str())
            .match_header(
                "content-type",
                mockito::Matcher::Regex("^multipart/form-data".to_string()),
            )
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::Regex(format!(
                    "name=\"logo\"; filename=\"{}\"",
                    regex_escape(&path)
                )),
                mockito::Matcher::Regex("Content-Type: image/png".to_string()),
                mockito::Matcher::Regex("png-bytes".to_string()),
            ]))
            .with_status(200)
            .with_body(r#"{"id":"abc"}"#)
            .create_async()
            .await;

        let body = ParamTree::new()
            .with("title", "My Store")
            .with("logo", file.path());
        let response = test_client(&server)
            .request_multipart(Method::POST, "collections", &body, &["logo"])
            .await
            .expect("request");

        assert!(response.status().is_success());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_2xx_response_is_returned_raw() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v3/collections")
            .with_status(422)
            .with_body(r#"{"error":{"type":"InvalidRequestError"}}"#)
            .create_async()
            .await;

        let response = test_client(&server)
            .request_url_encoded(Method::POST, "collections", &ParamTree::new())
            .await
            .expect("request");

        // No implicit throwing on gateway errors; the caller inspects.
        assert_eq!(response.status().as_u16(), 422);
    }

    #[tokio::test]
    async fn test_multipart_missing_file_fails_without_network_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v3/collections")
            .expect(0)
            .create_async()
            .await;

        let body = ParamTree::new().with("logo", "/nonexistent/logo.png");
        let err = test_client(&server)
            .request_multipart(Method::POST, "collections", &body, &["logo"])
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::FileRead { .. }));
        mock.assert_async().await;
    }

    // Minimal escape for temp-file paths embedded in matcher regexes.
    fn regex_escape(path: &str) -> String {
        path.replace('\\', "\\\\").replace('.', "\\.")
    }
}
