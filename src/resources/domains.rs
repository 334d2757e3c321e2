// DNS domains client

use crate::client::Nimbus;
use crate::request::{Filter, ListParams, Method};
use crate::resources::{
    base::BaseResourceClient, ResourceClient, ResourceOperations, ValidationOperations,
};
use crate::schema::{FieldRule, Schema};
use crate::store::StoreRecord;
use crate::types::{ApiResult, Page};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Client for the `/domains` endpoint family
pub struct DomainsClient {
    base: BaseResourceClient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainType {
    Master,
    Slave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainStatus {
    Active,
    Disabled,
    EditMode,
}

/// A DNS domain managed by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub id: i64,
    pub domain: String,
    #[serde(rename = "type")]
    pub domain_type: DomainType,
    pub status: DomainStatus,
    #[serde(default)]
    pub soa_email: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ttl_sec: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
}

impl StoreRecord for Domain {
    fn record_id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateDomain {
    pub domain: String,
    #[serde(rename = "type")]
    pub domain_type: DomainType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soa_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_sec: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl CreateDomain {
    pub fn new(domain: impl Into<String>, domain_type: DomainType) -> Self {
        Self {
            domain: domain.into(),
            domain_type,
            soa_email: None,
            description: None,
            ttl_sec: None,
            tags: None,
        }
    }
}

/// Partial update; every field is optional.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateDomain {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DomainStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soa_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_sec: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

pub fn create_domain_schema() -> Schema {
    Schema::new()
        .field(
            "domain",
            FieldRule::string().required().min_length(1).max_length(253),
        )
        .field(
            "type",
            FieldRule::string().required().one_of(&["master", "slave"]),
        )
        .field(
            "status",
            FieldRule::string()
                .one_of(&["active", "disabled"])
                .default_value("active"),
        )
        .field("soa_email", FieldRule::string().max_length(254))
        .field("description", FieldRule::string().max_length(253))
        .field("ttl_sec", FieldRule::integer().min(0))
        .field("tags", FieldRule::string_list())
}

pub fn update_domain_schema() -> Schema {
    Schema::new()
        .field("domain", FieldRule::string().min_length(1).max_length(253))
        .field(
            "status",
            FieldRule::string().one_of(&["active", "disabled", "edit_mode"]),
        )
        .field("soa_email", FieldRule::string().max_length(254))
        .field("description", FieldRule::string().max_length(253))
        .field("ttl_sec", FieldRule::integer().min(0))
        .field("tags", FieldRule::string_list())
}

pub fn import_zone_schema() -> Schema {
    Schema::new()
        .field(
            "domain",
            FieldRule::string().required().min_length(1).max_length(253),
        )
        .field(
            "remote_nameserver",
            FieldRule::string().required().min_length(1),
        )
}

impl DomainsClient {
    pub(crate) fn new(nimbus: Arc<Nimbus>) -> Self {
        Self {
            base: BaseResourceClient::new(nimbus, "domains"),
        }
    }

    /// Returns a paginated list of domains. Never mutates the store.
    pub async fn list(
        &self,
        params: Option<ListParams>,
        filter: Option<Filter>,
    ) -> ApiResult<Page<Domain>> {
        self.fetch_page("/domains".to_string(), params, filter).await
    }

    /// Returns all of the information about a specified domain.
    pub async fn get(&self, id: i64) -> ApiResult<Domain> {
        let id = self.validate_id(id)?;
        self.fetch(format!("/domains/{}", id)).await
    }

    /// Adds a new domain to the DNS manager.
    ///
    /// The server-returned record, not the submitted payload, is upserted
    /// into the store.
    pub async fn create(&self, payload: &CreateDomain) -> ApiResult<Domain> {
        let domain: Domain = self
            .submit(
                Method::Post,
                "/domains".to_string(),
                payload,
                Some(&create_domain_schema()),
            )
            .await?;
        self.nimbus().store().domains.upsert(domain.clone());
        Ok(domain)
    }

    /// Updates information about a domain.
    pub async fn update(&self, id: i64, payload: &UpdateDomain) -> ApiResult<Domain> {
        let id = self.validate_id(id)?;
        let domain: Domain = self
            .submit(
                Method::Put,
                format!("/domains/{}", id),
                payload,
                Some(&update_domain_schema()),
            )
            .await?;
        self.nimbus().store().domains.upsert(domain.clone());
        Ok(domain)
    }

    /// Deletes a domain and all associated records.
    ///
    /// The store entry is removed before this call returns, so a successful
    /// delete never leaves the id visible.
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let id = self.validate_id(id)?;
        self.submit_unit(Method::Delete, format!("/domains/{}", id))
            .await?;
        self.nimbus().store().domains.remove(id);
        Ok(())
    }

    /// Clones a domain under a new name.
    pub async fn clone_domain(&self, id: i64, new_domain: impl Into<String>) -> ApiResult<Domain> {
        let id = self.validate_id(id)?;
        let new_domain = self.validate_string(new_domain, "domain")?;
        let domain: Domain = self
            .submit(
                Method::Post,
                format!("/domains/{}/clone", id),
                &json!({ "domain": new_domain }),
                None,
            )
            .await?;
        self.nimbus().store().domains.upsert(domain.clone());
        Ok(domain)
    }

    /// Imports a domain zone from a remote nameserver that allows AXFR
    /// zone transfers.
    pub async fn import_zone(
        &self,
        domain: impl Into<String>,
        remote_nameserver: impl Into<String>,
    ) -> ApiResult<Domain> {
        let domain = self.validate_string(domain, "domain")?;
        let remote_nameserver = self.validate_string(remote_nameserver, "remote_nameserver")?;
        let imported: Domain = self
            .submit(
                Method::Post,
                "/domains/import".to_string(),
                &json!({ "domain": domain, "remote_nameserver": remote_nameserver }),
                Some(&import_zone_schema()),
            )
            .await?;
        self.nimbus().store().domains.upsert(imported.clone());
        Ok(imported)
    }
}

impl ResourceClient for DomainsClient {
    fn resource_name(&self) -> &str {
        self.base.resource_name()
    }
}

impl ValidationOperations for DomainsClient {}

impl ResourceOperations for DomainsClient {
    fn nimbus(&self) -> &Nimbus {
        self.base.nimbus()
    }
}
