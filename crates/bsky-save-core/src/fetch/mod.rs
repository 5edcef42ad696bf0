//! Binary fetcher.
//!
//! Wraps an `HttpTransport` (production: libcurl via the `curl` crate) into a
//! request/response API. `fetch` resolves as soon as headers arrive; the body
//! is awaited separately through `Response::bytes`/`text`/`json`.

mod curl_transport;
mod error;
mod response;
mod transport;

pub use curl_transport::CurlTransport;
pub use error::{FetchError, TransportError};
pub use response::Response;
pub use transport::{HeadersReceived, HttpTransport, TransportEvents, TransportReporter};

/// One outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub method: String,
    pub headers: Vec<(String, String)>,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: "GET".to_string(),
            headers: Vec::new(),
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Sends `request` and waits for the headers-received event.
///
/// A transport failure before headers arrive rejects here; a failure after
/// that rejects the body accessors instead.
pub async fn fetch<T>(transport: &T, request: FetchRequest) -> Result<Response, FetchError>
where
    T: HttpTransport + ?Sized,
{
    let events = transport.send(&request);
    let body = response::body_future(events.body);
    let head = events
        .headers
        .await
        .unwrap_or(Err(TransportError::Closed))?;
    tracing::debug!(url = %request.url, status = head.status, "headers received");
    Ok(Response::new(request.url, head, body))
}

/// Convenience owner of a transport.
#[derive(Debug, Clone, Default)]
pub struct Fetcher<T> {
    transport: T,
}

impl<T: HttpTransport> Fetcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn get(&self, url: &str) -> Result<Response, FetchError> {
        fetch(&self.transport, FetchRequest::get(url)).await
    }

    pub async fn request(&self, request: FetchRequest) -> Result<Response, FetchError> {
        fetch(&self.transport, request).await
    }
}
