//! Base implementation for resource clients.
//!
//! This module provides the foundation for resource client implementations,
//! including common operations and error handling patterns.

use crate::client::Nimbus;
use crate::resources::{ResourceClient, ResourceOperations, ValidationOperations};
use std::sync::Arc;

/// Base client for resource implementations
/// Provides common functionality for all resource clients
pub struct BaseResourceClient {
    /// Reference to the Nimbus client
    nimbus: Arc<Nimbus>,
    /// Resource name for this client
    resource_name: String,
}

impl BaseResourceClient {
    /// Create a new base resource client
    pub fn new(nimbus: Arc<Nimbus>, resource_name: impl Into<String>) -> Self {
        Self {
            nimbus,
            resource_name: resource_name.into(),
        }
    }
}

impl ResourceClient for BaseResourceClient {
    fn resource_name(&self) -> &str {
        &self.resource_name
    }
}

impl ValidationOperations for BaseResourceClient {}

impl ResourceOperations for BaseResourceClient {
    fn nimbus(&self) -> &Nimbus {
        &self.nimbus
    }
}
