//! # nimbus-rs: A typed async Rust SDK for the Nimbus Cloud API
//!
//! This SDK provides a comprehensive, modular interface to the Nimbus Cloud
//! infrastructure API, with resource clients for DNS domains, managed
//! database clusters, firewalls, and compute instances.
//!
//! ## Key Features
//!
//! - Immutable request descriptors built from composable option-setters
//! - Client-side schema validation that fails before any network call
//! - One structured error shape for schema, API, and transport failures
//! - An injected client-side store reconciled after every successful mutation
//! - A headless confirm-dialog state machine for destructive lifecycle actions
//! - Secure API token handling with memory zeroing
//! - TLS security configuration
//!
//! ## Basic Usage
//!
//! ```no_run
//! use nimbus_rs::{from_env, CreateDomain, DomainType};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a client from environment variable
//!     let nimbus = from_env()?;
//!
//!     // Create a domain; the returned record is upserted into the store
//!     let domain = nimbus
//!         .domains()
//!         .create(&CreateDomain::new("example.com", DomainType::Master))
//!         .await?;
//!
//!     println!("created domain {} ({})", domain.domain, domain.id);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod confirm;
pub mod request;
pub mod resources;
pub mod schema;
pub mod store;
pub mod types;

// Re-export core components
pub use client::{set_tls_config, MockTransport, Nimbus, TlsConfig};
pub use confirm::{ConfirmFlow, DialogState, LifecycleAction, LifecycleDialog, MutationState};
pub use request::{Filter, ListParams, Method, Order, Request};
pub use schema::{FieldRule, Schema};
pub use store::{ResourceCache, Store, StoreRecord};
pub use types::{
    sanitize_error_message, ApiError, ApiProblem, ApiResult, Page, SecureToken, Violation,
};

// Re-export resource components
pub use resources::{
    // Base traits
    ResourceClient,
    ResourceOperations,
    ValidationOperations,

    // Resource client types
    DatabasesClient,
    DomainsClient,
    FirewallsClient,
    InstancesClient,
};

// Resource-specific types
pub use resources::databases::{
    CreateDatabase, Database, DatabaseCredentials, DatabaseStatus, Engine, UpdateDatabase,
};
pub use resources::domains::{CreateDomain, Domain, DomainStatus, DomainType, UpdateDomain};
pub use resources::firewalls::{
    CreateFirewall, Firewall, FirewallRule, FirewallRules, FirewallStatus, PolicyType,
    RuleProtocol, UpdateFirewall,
};
pub use resources::instances::{
    CloneInstance, CreateInstance, Instance, InstanceStatus, UpdateInstance,
};

pub mod prelude {
    //! Convenient imports for commonly used types and functions
    pub use crate::{
        from_env, new_client, ApiError, ApiResult, Filter, ListParams, Nimbus, Page, SecureToken,
        Store, TlsConfig,
    };
    pub use crate::resources::{
        DatabasesClient, DomainsClient, FirewallsClient, InstancesClient,
    };

    // Resource-specific types
    pub use crate::resources::{
        databases::{CreateDatabase, Database, Engine},
        domains::{CreateDomain, Domain, DomainType},
        firewalls::{CreateFirewall, Firewall},
        instances::{CreateInstance, Instance},
    };
}

// Entry point functions
pub fn new_client(token: impl Into<String>) -> Nimbus {
    Nimbus::new(token)
}

pub fn from_env() -> Result<Nimbus, ApiError> {
    match std::env::var("NIMBUS_API_TOKEN") {
        Ok(token) => Ok(Nimbus::new(token)),
        Err(_) => Err(ApiError::MissingToken),
    }
}
