//! Response with eager status/headers and lazily-awaited body.

use futures::future::{BoxFuture, FutureExt, Shared};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::{FetchError, HeadersReceived, TransportError};
use crate::headers::{parse_headers, ResponseHeaders};

pub(super) type BodyFuture = Shared<BoxFuture<'static, Result<Arc<[u8]>, TransportError>>>;

/// A response whose status and headers are known once the transport reports
/// headers. Every body accessor awaits the same completion, any number of
/// times and in any order.
pub struct Response {
    url: String,
    status: u16,
    status_text: String,
    headers: ResponseHeaders,
    body: BodyFuture,
}

impl Response {
    pub(super) fn new(url: String, head: HeadersReceived, body: BodyFuture) -> Self {
        Self {
            url,
            status: head.status,
            status_text: head.status_text,
            headers: parse_headers(&head.raw_headers),
            body,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// True for any 2xx status. Body content plays no part.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn headers(&self) -> &ResponseHeaders {
        &self.headers
    }

    /// Raw payload, exactly as received.
    pub async fn bytes(&self) -> Result<Arc<[u8]>, FetchError> {
        Ok(self.body.clone().await?)
    }

    pub async fn text(&self) -> Result<String, FetchError> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }

    pub async fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        let text = self.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl std::fmt::Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Response")
            .field("url", &self.url)
            .field("status", &self.status)
            .field("status_text", &self.status_text)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

pub(super) fn body_future(
    rx: tokio::sync::oneshot::Receiver<Result<Vec<u8>, TransportError>>,
) -> BodyFuture {
    rx.map(|received| {
        received
            .unwrap_or(Err(TransportError::Closed))
            .map(Arc::from)
    })
    .boxed()
    .shared()
}
