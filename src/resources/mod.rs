//! Resource-Specific API Clients
//!
//! This module contains one client per resource type (domains, databases,
//! firewalls, instances). Each resource client implements the
//! `ResourceClient` and `ResourceOperations` traits and exposes the named
//! actions for its backend endpoint family.
//!
//! ## Architecture
//!
//! The resource client system uses a trait-based approach:
//!
//! - `ResourceClient` trait: resource identification for the registry system
//! - `ValidationOperations` trait: argument validation shared by all clients
//! - `ResourceOperations` trait: request building + transport + store helpers
//! - `BaseResourceClient`: implements all three and serves as a composition base
//!
//! Resource clients use composition rather than inheritance by containing a
//! `BaseResourceClient` instance and delegating trait implementations to it.
//!
//! Every action follows the same flow: build an immutable request descriptor,
//! optionally validate the payload against the action's schema, execute the
//! request, and on success reconcile the client-side store. List and get
//! actions never touch the store.

pub mod base;
pub mod databases;
pub mod domains;
pub mod firewalls;
pub mod instances;

// Re-export resource clients
pub use databases::{Database, DatabasesClient, DatabaseStatus, Engine};
pub use domains::{Domain, DomainsClient, DomainStatus, DomainType};
pub use firewalls::{Firewall, FirewallsClient, FirewallRules, FirewallStatus};
pub use instances::{Instance, InstancesClient, InstanceStatus};

use crate::client::Nimbus;
use crate::request::{Filter, ListParams, Method, Request};
use crate::schema::Schema;
use crate::types::*;
use dashmap::DashMap;
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, OnceLock};

/// Type alias for boxed resource-action futures
pub type ApiFuture<'a, T> = BoxFuture<'a, ApiResult<T>>;

/// Common trait for all resource clients
///
/// Provides resource identification for the registry system.
pub trait ResourceClient: Send + Sync {
    /// The resource name for this client
    fn resource_name(&self) -> &str;
}

/// Common trait for validation operations
pub trait ValidationOperations: ResourceClient {
    /// Validate a resource id is positive
    fn validate_id(&self, id: i64) -> ApiResult<i64> {
        if id <= 0 {
            return Err(ApiError::validation(format!(
                "{} id must be positive, got {}",
                self.resource_name(),
                id
            )));
        }
        Ok(id)
    }

    /// Validate a string parameter is not empty
    fn validate_string<S: Into<String>>(&self, value: S, param_name: &str) -> ApiResult<String> {
        let string = value.into();
        if string.trim().is_empty() {
            return Err(ApiError::validation(format!(
                "{} cannot be empty",
                param_name
            )));
        }
        Ok(string)
    }
}

/// Common implementation for resource operations
pub trait ResourceOperations: ResourceClient {
    /// Get a reference to the Nimbus client
    fn nimbus(&self) -> &Nimbus;

    /// Fetch a single record by path
    fn fetch<'a, T: DeserializeOwned>(&'a self, path: String) -> ApiFuture<'a, T> {
        Box::pin(async move {
            let request = Request::new().url(path)?.method(Method::Get);
            self.nimbus().execute(request).await
        })
    }

    /// Fetch one page of a list endpoint, with optional params and filter
    fn fetch_page<'a, T: DeserializeOwned>(
        &'a self,
        path: String,
        params: Option<ListParams>,
        filter: Option<Filter>,
    ) -> ApiFuture<'a, Page<T>> {
        Box::pin(async move {
            let mut request = Request::new().url(path)?.method(Method::Get);
            if let Some(params) = &params {
                request = request.params(params);
            }
            if let Some(filter) = filter {
                request = request.filter(filter);
            }
            self.nimbus().execute(request).await
        })
    }

    /// Submit a payload, validating it against the action's schema first
    ///
    /// Schema validation fails before any network activity occurs.
    fn submit<'a, T, P>(
        &'a self,
        method: Method,
        path: String,
        payload: &'a P,
        schema: Option<&'a Schema>,
    ) -> ApiFuture<'a, T>
    where
        T: DeserializeOwned,
        P: Serialize + Sync,
    {
        Box::pin(async move {
            let request = Request::new().url(path)?.method(method);
            let request = match schema {
                Some(schema) => request.validated_body(payload, schema)?,
                None => {
                    let value = serde_json::to_value(payload).map_err(|e| {
                        ApiError::parse("failed to serialize payload", None, Some(e))
                    })?;
                    request.body(value)
                }
            };
            self.nimbus().execute(request).await
        })
    }

    /// Submit a bodyless request and discard the response
    fn submit_unit<'a>(&'a self, method: Method, path: String) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let request = Request::new().url(path)?.method(method);
            self.nimbus().execute_unit(request).await
        })
    }
}

/// Registry for resource clients that provides a central access point.
pub struct ResourceClientRegistry {
    nimbus: Arc<Nimbus>,
    // DashMap for lock-free concurrent access to custom clients
    clients: Arc<DashMap<String, Arc<dyn ResourceClient>>>,
    // Cached instances of the built-in resource clients
    domains_client: OnceLock<Arc<DomainsClient>>,
    databases_client: OnceLock<Arc<DatabasesClient>>,
    firewalls_client: OnceLock<Arc<FirewallsClient>>,
    instances_client: OnceLock<Arc<InstancesClient>>,
}

impl ResourceClientRegistry {
    /// Create a new resource client registry associated with a Nimbus client
    pub(crate) fn new(nimbus: Arc<Nimbus>) -> Self {
        Self {
            nimbus,
            clients: Arc::new(DashMap::new()),
            domains_client: OnceLock::new(),
            databases_client: OnceLock::new(),
            firewalls_client: OnceLock::new(),
            instances_client: OnceLock::new(),
        }
    }

    /// Get the domains client (cached)
    pub fn domains(&self) -> Arc<DomainsClient> {
        self.domains_client
            .get_or_init(|| Arc::new(DomainsClient::new(self.nimbus.clone())))
            .clone()
    }

    /// Get the databases client (cached)
    pub fn databases(&self) -> Arc<DatabasesClient> {
        self.databases_client
            .get_or_init(|| Arc::new(DatabasesClient::new(self.nimbus.clone())))
            .clone()
    }

    /// Get the firewalls client (cached)
    pub fn firewalls(&self) -> Arc<FirewallsClient> {
        self.firewalls_client
            .get_or_init(|| Arc::new(FirewallsClient::new(self.nimbus.clone())))
            .clone()
    }

    /// Get the instances client (cached)
    pub fn instances(&self) -> Arc<InstancesClient> {
        self.instances_client
            .get_or_init(|| Arc::new(InstancesClient::new(self.nimbus.clone())))
            .clone()
    }

    /// Register a custom resource client (lock-free)
    pub fn register<T: ResourceClient + 'static>(&self, name: &str, client: T) {
        self.clients.insert(name.to_string(), Arc::new(client));
    }

    /// Get a registered custom resource client by name (lock-free)
    pub fn get(&self, name: &str) -> Option<Arc<dyn ResourceClient>> {
        self.clients.get(name).map(|r| r.value().clone())
    }

    /// Get all registered custom resource names
    pub fn list_resources(&self) -> Vec<String> {
        self.clients.iter().map(|entry| entry.key().clone()).collect()
    }
}
