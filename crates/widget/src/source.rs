//! Remote cart source: the single outbound fetch made at startup.
//!
//! The endpoint returns `{ "items": [...] }` where each item carries `id`,
//! `title`, `image`, `presentment_price` (paise) and an optional
//! `quantity`. There is no auth, no pagination, no retry and no timeout.

use std::future::Future;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use cart_widget_core::{ItemId, Money};

/// Errors that can occur while fetching the cart payload.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("Unexpected status: {0}")]
    Status(StatusCode),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The payload served by the cart endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CartPayload {
    pub items: Vec<RemoteItem>,
}

/// An item as the endpoint describes it.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteItem {
    pub id: ItemId,
    pub title: String,
    pub image: String,
    pub presentment_price: Money,
    /// Missing, `null` and non-positive values all mean one.
    #[serde(default)]
    pub quantity: Option<i64>,
}

/// Port for fetching the cart payload.
pub trait CartSource {
    /// Fetch and parse the payload.
    fn fetch(&self) -> impl Future<Output = Result<CartPayload, SourceError>> + Send;
}

/// Fetches the payload with a plain `GET`.
#[derive(Debug, Clone)]
pub struct HttpCartSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpCartSource {
    /// Create a source for `url`.
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    /// The endpoint this source fetches.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

impl CartSource for HttpCartSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<CartPayload, SourceError> {
        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }

        let body = response.text().await?;
        let payload: CartPayload = serde_json::from_str(&body)?;
        debug!(items = payload.items.len(), "Fetched cart payload");
        Ok(payload)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_parses_optional_quantity() {
        let payload: CartPayload = serde_json::from_str(
            r#"{"items":[
                {"id":1,"title":"Shoe","image":"u","presentment_price":150000,"quantity":2},
                {"id":2,"title":"Sock","image":"v","presentment_price":9900},
                {"id":3,"title":"Cap","image":"w","presentment_price":5000,"quantity":null}
            ]}"#,
        )
        .unwrap();

        let quantities: Vec<Option<i64>> = payload.items.iter().map(|i| i.quantity).collect();
        assert_eq!(quantities, vec![Some(2), None, None]);
        assert_eq!(payload.items[0].presentment_price, Money::from_minor(150_000));
    }

    #[test]
    fn test_payload_without_items_is_an_error() {
        assert!(serde_json::from_str::<CartPayload>(r#"{"products":[]}"#).is_err());
    }

    #[test]
    fn test_source_error_display() {
        let err = SourceError::Status(StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Unexpected status: 404 Not Found");
    }
}
