// Core Client Implementation

use crate::request::{Method, Request};
use crate::resources::*;
use crate::store::Store;
use crate::types::*;
use async_trait::async_trait;
use lazy_static::lazy_static;
use reqwest::{header, Client as HttpClient};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

/// Trait for intercepting the transport layer for testing purposes
///
/// A mock transport receives the fully-built request descriptor and returns
/// the raw JSON the real API would have produced.
#[async_trait]
pub trait MockTransport: Send + Sync {
    async fn handle(&self, request: Request) -> ApiResult<Value>;
}

lazy_static! {
    static ref CLIENT_CONFIG: Mutex<TlsConfig> = Mutex::new(TlsConfig::default());
}

/// Configuration for TLS
#[derive(Clone, Debug)]
pub struct TlsConfig {
    pub min_tls_version: Option<reqwest::tls::Version>,
    pub cert_verification: bool,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            min_tls_version: Some(reqwest::tls::Version::TLS_1_2),
            cert_verification: true,
        }
    }
}

/// Set global TLS configuration for all Nimbus clients
pub fn set_tls_config(config: TlsConfig) {
    if let Ok(mut cfg) = CLIENT_CONFIG.lock() {
        *cfg = config;
    }
}

/// Wire shape of an API error body.
#[derive(serde::Deserialize)]
struct ErrorsBody {
    errors: Vec<ApiProblem>,
}

#[derive(Clone)]
pub struct Nimbus {
    pub(crate) http_client: HttpClient,
    pub(crate) token: SecureToken,
    pub base_url: String, // Made public for testing
    store: Arc<Store>,
    registry: Arc<OnceLock<Arc<ResourceClientRegistry>>>,
    pub(crate) mock_transport: Arc<Mutex<Option<Arc<dyn MockTransport>>>>,
}

impl Nimbus {
    /// Create a new Nimbus client with the specified API token
    pub fn new(token: impl Into<String>) -> Self {
        let tls_config = match CLIENT_CONFIG.lock() {
            Ok(guard) => {
                let config = guard.clone();
                drop(guard);
                config
            }
            Err(_) => {
                // If lock is poisoned, create a new default config
                TlsConfig::default()
            }
        };

        Self::with_tls_config(token, tls_config)
    }

    /// Create a new Nimbus client with a specific TLS configuration
    fn with_tls_config(token: impl Into<String>, tls_config: TlsConfig) -> Self {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = HttpClient::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(120))
            .danger_accept_invalid_certs(!tls_config.cert_verification);

        if let Some(version) = tls_config.min_tls_version {
            builder = builder.min_tls_version(version);
        }

        let http_client = builder.build().expect("Failed to create HTTP client");

        Self {
            http_client,
            token: SecureToken::new(token),
            base_url: "https://api.nimbus.cloud/v4".to_string(),
            store: Arc::new(Store::new()),
            registry: Arc::new(OnceLock::new()),
            mock_transport: Arc::new(Mutex::new(None)),
        }
    }

    /// Set a custom base URL for the API
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Inject a shared store to be reconciled after successful mutations
    ///
    /// By default each client owns a fresh store; injecting one lets several
    /// clients (or views) share the same last-known-good state.
    pub fn with_store(mut self, store: Arc<Store>) -> Self {
        self.store = store;
        self
    }

    /// The store this client reconciles after mutations
    pub fn store(&self) -> Arc<Store> {
        self.store.clone()
    }

    /// Set a mock transport for this client
    /// This is useful for testing
    pub fn set_mock_transport(&self, transport: Arc<dyn MockTransport>) {
        if let Ok(mut guard) = self.mock_transport.lock() {
            *guard = Some(transport);
        }
    }

    /// Create a new Nimbus client with a mock transport for testing
    pub fn with_mock_transport<T>(token: impl Into<String>, transport: T) -> Self
    where
        T: Into<Arc<dyn MockTransport>>,
    {
        let client = Self::new(token);
        client.set_mock_transport(transport.into());
        client
    }

    /// Execute a request and deserialize the response body
    pub(crate) async fn execute<T: DeserializeOwned>(&self, request: Request) -> ApiResult<T> {
        let raw = self.execute_raw(request).await?;
        serde_json::from_value(raw.clone()).map_err(|e| {
            ApiError::parse(
                format!("failed to decode response: {}", e),
                Some(raw.to_string()),
                Some(e),
            )
        })
    }

    /// Execute a request whose response body is irrelevant
    pub(crate) async fn execute_unit(&self, request: Request) -> ApiResult<()> {
        self.execute_raw(request).await?;
        Ok(())
    }

    /// Execute a request, potentially using a mock transport if one is set
    async fn execute_raw(&self, request: Request) -> ApiResult<Value> {
        // Get the mock transport outside of the await
        let mock_opt = {
            if let Ok(guard) = self.mock_transport.lock() {
                guard.as_ref().cloned()
            } else {
                None
            }
        };

        if let Some(mock) = mock_opt {
            return mock.handle(request).await;
        }

        let target = format!("{}{}", self.base_url, request.path);
        let url = url::Url::parse(&target)
            .map_err(|e| ApiError::validation(format!("invalid request URL {:?}: {}", target, e)))?;

        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .http_client
            .request(method, url)
            .bearer_auth(self.token.as_str());

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(filter) = request.filter_header() {
            builder = builder.header("X-Filter", filter);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Self::error_from_body(status.as_u16(), &text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| {
            ApiError::parse(
                format!("response was not valid JSON: {}", e),
                Some(sanitize_error_message(&text)),
                Some(e),
            )
        })
    }

    /// Map a non-2xx response body into a structured API error
    fn error_from_body(status: u16, body: &str) -> ApiError {
        match serde_json::from_str::<ErrorsBody>(body) {
            Ok(parsed) if !parsed.errors.is_empty() => ApiError::api(status, parsed.errors),
            _ => ApiError::api_reason(status, sanitize_error_message(body)),
        }
    }

    /// Get the resource client registry
    pub fn resources(&self) -> Arc<ResourceClientRegistry> {
        self.registry
            .get_or_init(|| {
                let nimbus = Arc::new(self.clone());
                Arc::new(ResourceClientRegistry::new(nimbus))
            })
            .clone()
    }

    /// Get the resource client for DNS domains
    pub fn domains(&self) -> Arc<DomainsClient> {
        self.resources().domains()
    }

    /// Get the resource client for managed database clusters
    pub fn databases(&self) -> Arc<DatabasesClient> {
        self.resources().databases()
    }

    /// Get the resource client for firewalls
    pub fn firewalls(&self) -> Arc<FirewallsClient> {
        self.resources().firewalls()
    }

    /// Get the resource client for compute instances
    pub fn instances(&self) -> Arc<InstancesClient> {
        self.resources().instances()
    }

    /// Register a custom resource client
    pub fn register_resource<T: ResourceClient + 'static>(&self, name: &str, client: T) -> &Self {
        self.resources().register(name, client);
        self
    }

    /// Get a custom resource client by name
    pub fn get_resource(&self, name: &str) -> Option<Arc<dyn ResourceClient>> {
        self.resources().get(name)
    }
}
