use crate::level::Level;
use crate::record::LogRecord;
use crate::sink::Sink;
use async_trait::async_trait;
use reqwest::Client;
use std::error::Error;

/// Structured address for an [`HttpSink`].
///
/// Assembled as `scheme://host:port/path`; a path without a leading `/`
/// gains one.
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    pub host: String,
    pub port: u16,
    pub path: String,
    pub use_tls: bool,
}

impl HttpEndpoint {
    pub fn url(&self) -> String {
        let scheme = if self.use_tls { "https" } else { "http" };
        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };
        format!("{}://{}:{}{}", scheme, self.host, self.port, path)
    }
}

/// Sink that POSTs each sealed record as a JSON body.
///
/// Delivery failures carry the target URL and a human-readable message
/// on the error channel, never a raw error object.
#[derive(Clone)]
pub struct HttpSink {
    client: Client,
    url: String,
    min_level: Option<Level>,
}

impl HttpSink {
    /// Sink targeting a complete URL.
    pub fn new(url: impl Into<String>) -> Self {
        HttpSink {
            client: Client::new(),
            url: url.into(),
            min_level: None,
        }
    }

    /// Sink targeting a structured endpoint.
    pub fn from_endpoint(endpoint: &HttpEndpoint) -> Self {
        HttpSink::new(endpoint.url())
    }

    /// Only deliver records at least as severe as `level`.
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = Some(level);
        self
    }

    /// Target URL records are delivered to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Sink for HttpSink {
    fn name(&self) -> &str {
        "http"
    }

    fn min_level(&self) -> Option<Level> {
        self.min_level
    }

    async fn deliver(&self, record: &LogRecord) -> Result<(), Box<dyn Error + Send + Sync>> {
        let body = match &record.serialized {
            Some(text) => text.clone(),
            None => {
                return Err(format!(
                    "log delivery to {} failed: record was not sealed",
                    self.url
                )
                .into())
            }
        };

        let resp = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| format!("log delivery to {} failed: {}", self.url, e))?;

        if resp.status().is_success() {
            Ok(())
        } else {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_else(|_| "<no body>".to_string());
            Err(format!(
                "log delivery to {} failed with status {}: {}",
                self.url, status, text
            )
            .into())
        }
    }
}
