use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::BudgetSnapshot;
use crate::error::{ChartError, ChartResult};

/// Where the budget document is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_path")]
    pub path: String,
    /// Request timeout; `None` leaves the transport's own limits in place.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            path: default_path(),
            timeout_ms: None,
        }
    }
}

impl EndpointConfig {
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_owned()
}

fn default_path() -> String {
    "/budget".to_owned()
}

/// The budget data source boundary: one blocking read of the budget document.
pub trait BudgetSource: Send + Sync {
    fn fetch(&self) -> ChartResult<BudgetSnapshot>;

    /// Human-readable origin used in logs.
    fn describe(&self) -> String;
}

/// Serves a fixed response body.
#[derive(Debug, Clone)]
pub struct StaticBudgetSource {
    body: String,
}

impl StaticBudgetSource {
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl BudgetSource for StaticBudgetSource {
    fn fetch(&self) -> ChartResult<BudgetSnapshot> {
        BudgetSnapshot::from_json_str(&self.body)
    }

    fn describe(&self) -> String {
        "static body".to_owned()
    }
}

/// Reads the budget document from a local JSON file.
#[derive(Debug, Clone)]
pub struct FileBudgetSource {
    path: PathBuf,
}

impl FileBudgetSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BudgetSource for FileBudgetSource {
    fn fetch(&self) -> ChartResult<BudgetSnapshot> {
        let body = fs::read_to_string(&self.path).map_err(|err| {
            ChartError::Transport(format!("failed to read `{}`: {err}", self.path.display()))
        })?;
        BudgetSnapshot::from_json_str(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(feature = "http-source")]
pub use http::HttpBudgetSource;

#[cfg(feature = "http-source")]
mod http {
    use std::time::Duration;

    use super::{BudgetSource, EndpointConfig};
    use crate::core::BudgetSnapshot;
    use crate::error::{ChartError, ChartResult};

    /// `GET`s the budget document over HTTP.
    #[derive(Debug, Clone)]
    pub struct HttpBudgetSource {
        client: reqwest::blocking::Client,
        url: String,
    }

    impl HttpBudgetSource {
        pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> ChartResult<Self> {
            let mut builder = reqwest::blocking::Client::builder();
            if let Some(timeout) = timeout {
                builder = builder.timeout(timeout);
            }
            let client = builder
                .build()
                .map_err(|e| ChartError::Transport(format!("reqwest client error: {e}")))?;
            Ok(Self {
                client,
                url: url.into(),
            })
        }

        pub fn from_endpoint(endpoint: &EndpointConfig) -> ChartResult<Self> {
            Self::new(endpoint.url(), endpoint.timeout_ms.map(Duration::from_millis))
        }
    }

    impl BudgetSource for HttpBudgetSource {
        fn fetch(&self) -> ChartResult<BudgetSnapshot> {
            let body = self
                .client
                .get(&self.url)
                .send()
                .and_then(|response| response.error_for_status())
                .and_then(|response| response.text())
                .map_err(|e| ChartError::Transport(format!("budget request error: {e}")))?;
            BudgetSnapshot::from_json_str(&body)
        }

        fn describe(&self) -> String {
            self.url.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BudgetSource, EndpointConfig, FileBudgetSource, StaticBudgetSource};
    use crate::error::ChartError;

    #[test]
    fn endpoint_url_joins_without_double_slash() {
        let endpoint = EndpointConfig {
            base_url: "http://example.test/".to_owned(),
            path: "/budget".to_owned(),
            timeout_ms: None,
        };
        assert_eq!(endpoint.url(), "http://example.test/budget");
    }

    #[test]
    fn static_source_decodes_body() {
        let source = StaticBudgetSource::new(r#"{"myBudget":[{"title":"Rent","budget":10}]}"#);
        let snapshot = source.fetch().expect("valid body");
        assert_eq!(snapshot.categories.len(), 1);
    }

    #[test]
    fn missing_file_is_transport_error() {
        let source = FileBudgetSource::new("/definitely/not/here/budget.json");
        let err = source.fetch().expect_err("missing file");
        assert!(matches!(err, ChartError::Transport(_)));
    }
}
