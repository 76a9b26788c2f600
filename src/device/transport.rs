//! Request/response transport to a ColorWall device.
//!
//! Each call is one blocking exchange. Nothing is retried and no deadline is
//! imposed; callers wanting bounded latency must wrap the call themselves.

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::error::{ColorWallError, Result};
use crate::protocol::CONTENT_TYPE_JSON;

/// Status and body of one device response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// One request/response exchange with the device.
///
/// Implementations return `Err(Connection)` only when no response was
/// received. Any HTTP status, including errors, is a successful exchange.
pub trait Transport {
    /// Address of the device this transport talks to.
    fn host(&self) -> &str;

    /// `GET path`.
    fn get(&self, path: &str) -> Result<Response>;

    /// `POST path` with a JSON body.
    fn post_json(&self, path: &str, body: String) -> Result<Response>;
}

// =============================================================================
// HTTP
// =============================================================================

/// Blocking HTTP transport.
///
/// Idle connections are never kept, so every exchange opens and closes its
/// own connection.
pub struct HttpTransport {
    host: String,
    base_url: String,
    client: Client,
}

impl HttpTransport {
    /// Create a transport for `host` (`ip`, `ip:port` or an `http://` URL).
    pub fn new(host: &str) -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(0)
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(|e| ColorWallError::connection(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            host: host.to_string(),
            base_url: base_url(host),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn finish(&self, response: reqwest::blocking::Response) -> Result<Response> {
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(Response { status, body })
    }
}

impl Transport for HttpTransport {
    fn host(&self) -> &str {
        &self.host
    }

    fn get(&self, path: &str) -> Result<Response> {
        let response = self.client.get(self.url(path)).send()?;
        self.finish(response)
    }

    fn post_json(&self, path: &str, body: String) -> Result<Response> {
        let response = self
            .client
            .post(self.url(path))
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .body(body)
            .send()?;
        self.finish(response)
    }
}

/// Normalize a configured host into a base URL without trailing slash.
fn base_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! Scripted transport for exercising the client without a device.

    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// A recorded request: method, path and body.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Request {
        pub method: &'static str,
        pub path: String,
        pub body: Option<String>,
    }

    /// Replays queued outcomes in order and records every request.
    #[derive(Default)]
    pub struct MockTransport {
        replies: RefCell<VecDeque<Result<Response>>>,
        pub requests: RefCell<Vec<Request>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(self, status: u16, body: &str) -> Self {
            self.replies
                .borrow_mut()
                .push_back(Ok(Response::new(status, body)));
            self
        }

        pub fn refuse(self) -> Self {
            self.replies
                .borrow_mut()
                .push_back(Err(ColorWallError::connection("connection refused")));
            self
        }

        pub fn push_reply(&self, status: u16, body: &str) {
            self.replies
                .borrow_mut()
                .push_back(Ok(Response::new(status, body)));
        }

        pub fn push_refuse(&self) {
            self.replies
                .borrow_mut()
                .push_back(Err(ColorWallError::connection("connection refused")));
        }

        pub fn last_request(&self) -> Option<Request> {
            self.requests.borrow().last().cloned()
        }

        fn next(&self) -> Result<Response> {
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ColorWallError::connection("no scripted reply")))
        }
    }

    impl Transport for MockTransport {
        fn host(&self) -> &str {
            "mock-wall"
        }

        fn get(&self, path: &str) -> Result<Response> {
            self.requests.borrow_mut().push(Request {
                method: "GET",
                path: path.into(),
                body: None,
            });
            self.next()
        }

        fn post_json(&self, path: &str, body: String) -> Result<Response> {
            self.requests.borrow_mut().push(Request {
                method: "POST",
                path: path.into(),
                body: Some(body),
            });
            self.next()
        }
    }
}
