//! libcurl-backed transport.
//!
//! Each request runs on its own OS thread (libcurl easy handles block). The
//! header callback assembles the header block of each response in a redirect
//! chain and reports the first non-interim, non-redirect one.

use std::str;
use std::thread;
use std::time::Duration;

use super::{FetchRequest, HeadersReceived, HttpTransport, TransportError, TransportEvents, TransportReporter};

/// Transport built on the curl crate. No timeout unless `connect_timeout`
/// is set.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    pub connect_timeout: Option<Duration>,
    pub max_redirections: u32,
    pub user_agent: String,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            max_redirections: 10,
            user_agent: concat!("bsky-save/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpTransport for CurlTransport {
    fn send(&self, request: &FetchRequest) -> TransportEvents {
        let (reporter, events) = TransportEvents::channel();
        let opts = self.clone();
        let request = request.clone();
        thread::spawn(move || perform(&opts, &request, reporter));
        events
    }
}

fn perform(opts: &CurlTransport, request: &FetchRequest, mut reporter: TransportReporter) {
    match transfer(opts, request, &mut reporter) {
        Ok(body) => reporter.complete(body),
        Err(err) => {
            tracing::warn!(url = %request.url, "transfer failed: {}", err);
            reporter.fail(err)
        }
    }
}

fn transfer(
    opts: &CurlTransport,
    request: &FetchRequest,
    reporter: &mut TransportReporter,
) -> Result<Vec<u8>, TransportError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(&request.url).map_err(map_curl_error)?;
    if request.method.eq_ignore_ascii_case("GET") {
        easy.get(true).map_err(map_curl_error)?;
    } else {
        easy.custom_request(&request.method).map_err(map_curl_error)?;
    }
    easy.follow_location(true).map_err(map_curl_error)?;
    easy.max_redirections(opts.max_redirections).map_err(map_curl_error)?;
    if let Some(timeout) = opts.connect_timeout {
        easy.connect_timeout(timeout).map_err(map_curl_error)?;
    }
    easy.useragent(&opts.user_agent).map_err(map_curl_error)?;

    if !request.headers.is_empty() {
        let mut list = curl::easy::List::new();
        for (k, v) in &request.headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))
                .map_err(map_curl_error)?;
        }
        easy.http_headers(list).map_err(map_curl_error)?;
    }

    let mut body = Vec::new();
    let mut block = HeaderBlock::default();
    {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                if let Ok(line) = str::from_utf8(data) {
                    if let Some(head) = block.push_line(line) {
                        reporter.headers_received(head);
                    }
                }
                true
            })
            .map_err(map_curl_error)?;
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(map_curl_error)?;
        transfer.perform().map_err(map_curl_error)?;
    }

    // Servers that never terminate the header block still get a headers event.
    if reporter.headers_pending() {
        let status = easy.response_code().map_err(map_curl_error)?;
        let mut head = block.finish();
        if head.status == 0 {
            head.status = u16::try_from(status).unwrap_or(0);
        }
        reporter.headers_received(head);
    }
    Ok(body)
}

fn map_curl_error(err: curl::Error) -> TransportError {
    if err.is_operation_timedout() {
        TransportError::TimedOut
    } else {
        TransportError::Failed(err.to_string())
    }
}

/// Accumulates header lines of the response currently being received.
#[derive(Debug, Default)]
struct HeaderBlock {
    status: u16,
    status_text: String,
    lines: Vec<String>,
    has_location: bool,
}

impl HeaderBlock {
    /// Feeds one raw header line. Returns the finished block when it belongs
    /// to the final response.
    fn push_line(&mut self, line: &str) -> Option<HeadersReceived> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.starts_with("HTTP/") {
            *self = HeaderBlock::default();
            let (status, text) = parse_status_line(line);
            self.status = status;
            self.status_text = text;
            return None;
        }
        if !line.is_empty() {
            if line
                .split_once(':')
                .is_some_and(|(name, _)| name.trim().eq_ignore_ascii_case("location"))
            {
                self.has_location = true;
            }
            self.lines.push(line.to_string());
            return None;
        }
        let interim = (100..200).contains(&self.status);
        let redirect = (300..400).contains(&self.status) && self.has_location;
        if self.status == 0 || interim || redirect {
            return None;
        }
        Some(self.finish())
    }

    fn finish(&mut self) -> HeadersReceived {
        HeadersReceived {
            status: self.status,
            status_text: std::mem::take(&mut self.status_text),
            raw_headers: std::mem::take(&mut self.lines).join("\n"),
        }
    }
}

/// `HTTP/1.1 200 OK` -> (200, "OK"); `HTTP/2 204` -> (204, "").
fn parse_status_line(line: &str) -> (u16, String) {
    let mut parts = line.splitn(3, ' ');
    let _version = parts.next();
    let status = parts
        .next()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);
    let text = parts.next().unwrap_or("").trim().to_string();
    (status, text)
}
