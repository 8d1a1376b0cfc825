//! HTTP transport: a single GET that asks for gzip and undoes it.

use std::io::Read;

use flate2::read::GzDecoder;
use reqwest::header::{ACCEPT_ENCODING, CONTENT_ENCODING};
use tracing::debug;
use url::Url;

use crate::types::{EventWsError, EventWsResult};

/// User-Agent sent with every request.
const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Response body handed to the parser.
pub type Body = Box<dyn Read + Send>;

/// Opens a URL and returns the decoded response body.
///
/// Implementations must not retry. The returned reader owns the connection;
/// dropping it releases the connection.
pub trait HttpTransport: Send + Sync {
    fn open(&self, url: &Url) -> EventWsResult<Body>;
}

/// Blocking transport backed by reqwest.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> EventWsResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .map_err(|e| EventWsError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Use an already configured client.
    ///
    /// The client must not be built with reqwest's own gzip support enabled,
    /// otherwise the body is decoded twice.
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn open(&self, url: &Url) -> EventWsResult<Body> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT_ENCODING, "gzip")
            .send()
            .map_err(|e| EventWsError::Transport(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EventWsError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let encoding = response
            .headers()
            .get(CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        Ok(decode_body(encoding.as_deref(), response))
    }
}

/// Wrap `body` in a gzip decoder when `content_encoding` is `gzip`, compared
/// case-insensitively. Any other value, or none, passes the body through.
pub fn decode_body<R: Read + Send + 'static>(content_encoding: Option<&str>, body: R) -> Body {
    match content_encoding {
        Some(encoding) if encoding.trim().eq_ignore_ascii_case("gzip") => {
            debug!("Decoding gzip response");
            Box::new(GzDecoder::new(body))
        }
        _ => Box::new(body),
    }
}
