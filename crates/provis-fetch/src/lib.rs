//! Blocking HTTP download of a single resource to a local file.

pub use client::{HttpClient, ReqwestClient};
pub use error::{Error, Result};
pub use fetch::Fetcher;

mod client;
mod error;
mod fetch;
