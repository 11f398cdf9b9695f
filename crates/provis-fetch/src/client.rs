use std::io::Read;

use crate::error::{Error, Result};

/// Blocking HTTP client abstraction.
///
/// This trait provides the minimal interface needed for fetching: open a
/// URL and hand back the response body as a reader. Implementations handle
/// their own redirect following, TLS configuration, and error mapping; a
/// non-success response status is an error, not a readable body.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - Mock implementations for testing
pub trait HttpClient {
    /// Error type for HTTP operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Open `url` and return the response body as a sequential reader.
    fn open(&self, url: &str) -> std::result::Result<Box<dyn Read>, Self::Error>;
}

/// Production HTTP client implementation using reqwest.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Create a new ReqwestClient with default configuration.
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("provis/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Client)?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    type Error = reqwest::Error;

    fn open(&self, url: &str) -> std::result::Result<Box<dyn Read>, Self::Error> {
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(Box::new(response))
    }
}
