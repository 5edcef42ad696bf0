//! The cross-origin request capability behind the fetcher.
//!
//! A transport reports two events per request: headers received, then
//! completion with the full body. Either may instead carry a failure.

use tokio::sync::oneshot;

use super::{FetchRequest, TransportError};

/// Status line and raw header block of the final response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadersReceived {
    pub status: u16,
    pub status_text: String,
    /// Newline-delimited `name: value` lines, without the status line.
    pub raw_headers: String,
}

/// Receiving side of one request's events.
pub struct TransportEvents {
    pub headers: oneshot::Receiver<Result<HeadersReceived, TransportError>>,
    pub body: oneshot::Receiver<Result<Vec<u8>, TransportError>>,
}

impl TransportEvents {
    /// Creates a linked reporter/events pair.
    pub fn channel() -> (TransportReporter, TransportEvents) {
        let (headers_tx, headers_rx) = oneshot::channel();
        let (body_tx, body_rx) = oneshot::channel();
        (
            TransportReporter {
                headers: Some(headers_tx),
                body: Some(body_tx),
            },
            TransportEvents {
                headers: headers_rx,
                body: body_rx,
            },
        )
    }
}

/// Sending side used by transport implementations. Each event fires at most once.
pub struct TransportReporter {
    headers: Option<oneshot::Sender<Result<HeadersReceived, TransportError>>>,
    body: Option<oneshot::Sender<Result<Vec<u8>, TransportError>>>,
}

impl TransportReporter {
    pub fn headers_received(&mut self, head: HeadersReceived) {
        if let Some(tx) = self.headers.take() {
            let _ = tx.send(Ok(head));
        }
    }

    pub fn headers_pending(&self) -> bool {
        self.headers.is_some()
    }

    pub fn complete(mut self, body: Vec<u8>) {
        if let Some(tx) = self.body.take() {
            let _ = tx.send(Ok(body));
        }
    }

    /// Rejects whichever events have not fired yet.
    pub fn fail(mut self, err: TransportError) {
        if let Some(tx) = self.headers.take() {
            let _ = tx.send(Err(err.clone()));
        }
        if let Some(tx) = self.body.take() {
            let _ = tx.send(Err(err));
        }
    }
}

/// Issues byte-preserving requests, bypassing page-level fetch restrictions.
pub trait HttpTransport {
    fn send(&self, request: &FetchRequest) -> TransportEvents;
}

impl<T: HttpTransport + ?Sized> HttpTransport for std::rc::Rc<T> {
    fn send(&self, request: &FetchRequest) -> TransportEvents {
        (**self).send(request)
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for std::sync::Arc<T> {
    fn send(&self, request: &FetchRequest) -> TransportEvents {
        (**self).send(request)
    }
}
