// src/core/net.rs
// Page sources. The pipeline only needs "give me the text behind this URL";
// tests and offline runs swap in a file or an in-memory page.

use std::{fs, path::PathBuf, time::Duration};

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};

use crate::config::consts::{ACCEPT_LANGUAGE as ACCEPT_LANG, REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::core::thai;
use crate::error::{Error, Result};

pub trait Source {
    /// Fetch `url` and return the decoded page text.
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Live HTTP(S) source.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANG));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }
}

impl Source for HttpSource {
    fn fetch(&self, url: &str) -> Result<String> {
        let t = std::time::Instant::now();
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::HttpStatus { url: s!(url), status: status.as_u16() });
        }
        let bytes = resp.bytes()?;
        logd!("GET {url}: {} bytes in {:?}", bytes.len(), t.elapsed());
        Ok(thai::decode_body(&bytes))
    }
}

/// A page saved to disk; the URL is ignored.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Source for FileSource {
    fn fetch(&self, url: &str) -> Result<String> {
        logd!("Reading {} in place of {url}", self.path.display());
        let bytes = fs::read(&self.path)?;
        Ok(thai::decode_body(&bytes))
    }
}

/// Fixed page text, for tests.
pub struct StaticSource(pub String);

impl Source for StaticSource {
    fn fetch(&self, _url: &str) -> Result<String> {
        Ok(self.0.clone())
    }
}
