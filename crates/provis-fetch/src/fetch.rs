use std::fs::File;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::client::HttpClient;
use crate::error::{Error, Result};

/// Downloads a single resource to a local file.
pub struct Fetcher<C: HttpClient> {
    client: C,
}

impl<C: HttpClient> Fetcher<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Stream the body of `url` into `destination`, overwriting any
    /// existing file, and return the number of bytes written.
    ///
    /// No retry and no resume: after a failure the destination may hold a
    /// partial body and must not be relied on.
    pub fn fetch(&self, url: &str, destination: &Path) -> Result<u64> {
        debug!(url, "opening remote resource");
        let mut body = self.client.open(url).map_err(|e| Error::Request {
            url: url.to_string(),
            source: Box::new(e),
        })?;

        let mut out = File::create(destination).map_err(|e| Error::Create {
            path: destination.to_path_buf(),
            source: e,
        })?;

        let written = io::copy(&mut body, &mut out).map_err(|e| Error::Transfer {
            url: url.to_string(),
            path: destination.to_path_buf(),
            source: e,
        })?;

        debug!(url, bytes = written, "download complete");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};

    use super::*;

    struct StaticClient {
        body: &'static [u8],
    }

    impl HttpClient for StaticClient {
        type Error = io::Error;

        fn open(&self, _url: &str) -> std::result::Result<Box<dyn Read>, Self::Error> {
            Ok(Box::new(Cursor::new(self.body)))
        }
    }

    struct RefusingClient;

    impl HttpClient for RefusingClient {
        type Error = io::Error;

        fn open(&self, url: &str) -> std::result::Result<Box<dyn Read>, Self::Error> {
            Err(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                format!("GET {url} refused"),
            ))
        }
    }

    #[test]
    fn fetch_writes_body_to_destination() {
        let temp_dir = tempfile::Builder::new()
            .prefix("provis-fetch-")
            .tempdir()
            .expect("failed to create temp dir");
        let destination = temp_dir.path().join("installer.zip");

        let fetcher = Fetcher::new(StaticClient { body: b"archive bytes" });
        let written = fetcher
            .fetch("http://localhost/archive.zip", &destination)
            .unwrap();

        assert_eq!(written, 13);
        assert_eq!(std::fs::read(&destination).unwrap(), b"archive bytes");
    }

    #[test]
    fn fetch_overwrites_existing_file() {
        let temp_dir = tempfile::Builder::new()
            .prefix("provis-fetch-")
            .tempdir()
            .expect("failed to create temp dir");
        let destination = temp_dir.path().join("installer.zip");
        std::fs::write(&destination, b"previous, much longer content").unwrap();

        let fetcher = Fetcher::new(StaticClient { body: b"new" });
        fetcher
            .fetch("http://localhost/archive.zip", &destination)
            .unwrap();

        assert_eq!(std::fs::read(&destination).unwrap(), b"new");
    }

    #[test]
    fn transport_failure_is_a_request_error() {
        let temp_dir = tempfile::Builder::new()
            .prefix("provis-fetch-")
            .tempdir()
            .expect("failed to create temp dir");
        let destination = temp_dir.path().join("installer.zip");

        let fetcher = Fetcher::new(RefusingClient);
        let result = fetcher.fetch("http://localhost/archive.zip", &destination);

        assert!(matches!(result, Err(Error::Request { .. })));
        assert!(!destination.exists());
    }

    #[test]
    fn unwritable_destination_is_a_create_error() {
        let fetcher = Fetcher::new(StaticClient { body: b"bytes" });
        let result = fetcher.fetch(
            "http://localhost/archive.zip",
            Path::new("/nonexistent/dir/installer.zip"),
        );

        assert!(matches!(result, Err(Error::Create { .. })));
    }
}
