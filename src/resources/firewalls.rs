// Firewalls client

use crate::client::Nimbus;
use crate::request::{Filter, ListParams, Method};
use crate::resources::{
    base::BaseResourceClient, ResourceClient, ResourceOperations, ValidationOperations,
};
use crate::schema::{FieldRule, Schema};
use crate::store::StoreRecord;
use crate::types::{ApiResult, Page};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Client for the `/firewalls` endpoint family
pub struct FirewallsClient {
    base: BaseResourceClient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirewallStatus {
    Enabled,
    Disabled,
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleProtocol {
    #[serde(rename = "ALL")]
    All,
    #[serde(rename = "TCP")]
    Tcp,
    #[serde(rename = "UDP")]
    Udp,
    #[serde(rename = "ICMP")]
    Icmp,
    #[serde(rename = "IPENCAP")]
    IpEncap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyType {
    #[serde(rename = "ACCEPT")]
    Accept,
    #[serde(rename = "DROP")]
    Drop,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleAddresses {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirewallRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub protocol: RuleProtocol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<String>,
    pub action: PolicyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresses: Option<RuleAddresses>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirewallRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inbound: Option<Vec<FirewallRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outbound: Option<Vec<FirewallRule>>,
    pub inbound_policy: PolicyType,
    pub outbound_policy: PolicyType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirewallEntity {
    pub id: i64,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub label: String,
    pub url: String,
}

/// A cloud firewall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Firewall {
    pub id: i64,
    pub label: String,
    pub status: FirewallStatus,
    pub rules: FirewallRules,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub entities: Vec<FirewallEntity>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
}

impl StoreRecord for Firewall {
    fn record_id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateFirewall {
    pub label: String,
    pub rules: FirewallRules,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Partial update; every field is optional. Status may not be set to
/// `deleted` here; that is what `delete` is for.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateFirewall {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<FirewallStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

pub fn create_firewall_schema() -> Schema {
    Schema::new()
        .field(
            "label",
            FieldRule::string().required().min_length(3).max_length(32),
        )
        .field("rules", FieldRule::object().required())
        .field("tags", FieldRule::string_list())
}

pub fn update_firewall_schema() -> Schema {
    Schema::new()
        .field("label", FieldRule::string().min_length(3).max_length(32))
        .field(
            "status",
            FieldRule::string().one_of(&["enabled", "disabled"]),
        )
        .field("tags", FieldRule::string_list())
}

impl FirewallsClient {
    pub(crate) fn new(nimbus: Arc<Nimbus>) -> Self {
        Self {
            base: BaseResourceClient::new(nimbus, "firewalls"),
        }
    }

    /// Returns a paginated list of firewalls. Never mutates the store.
    pub async fn list(
        &self,
        params: Option<ListParams>,
        filter: Option<Filter>,
    ) -> ApiResult<Page<Firewall>> {
        self.fetch_page("/firewalls".to_string(), params, filter)
            .await
    }

    /// Returns a single firewall by id.
    pub async fn get(&self, id: i64) -> ApiResult<Firewall> {
        let id = self.validate_id(id)?;
        self.fetch(format!("/firewalls/{}", id)).await
    }

    /// Creates a firewall and upserts the returned record.
    pub async fn create(&self, payload: &CreateFirewall) -> ApiResult<Firewall> {
        let firewall: Firewall = self
            .submit(
                Method::Post,
                "/firewalls".to_string(),
                payload,
                Some(&create_firewall_schema()),
            )
            .await?;
        self.nimbus().store().firewalls.upsert(firewall.clone());
        Ok(firewall)
    }

    /// Updates a firewall and upserts the returned record.
    pub async fn update(&self, id: i64, payload: &UpdateFirewall) -> ApiResult<Firewall> {
        let id = self.validate_id(id)?;
        let firewall: Firewall = self
            .submit(
                Method::Put,
                format!("/firewalls/{}", id),
                payload,
                Some(&update_firewall_schema()),
            )
            .await?;
        self.nimbus().store().firewalls.upsert(firewall.clone());
        Ok(firewall)
    }

    /// Deletes a firewall and removes its store entry.
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let id = self.validate_id(id)?;
        self.submit_unit(Method::Delete, format!("/firewalls/{}", id))
            .await?;
        self.nimbus().store().firewalls.remove(id);
        Ok(())
    }

    /// Replaces the rule set of a firewall; the refreshed record is fetched
    /// and upserted so entities and status stay consistent with the server.
    pub async fn update_rules(&self, id: i64, rules: &FirewallRules) -> ApiResult<FirewallRules> {
        let id = self.validate_id(id)?;
        let rules: FirewallRules = self
            .submit(
                Method::Put,
                format!("/firewalls/{}/rules", id),
                rules,
                None,
            )
            .await?;
        let firewall: Firewall = self.fetch(format!("/firewalls/{}", id)).await?;
        self.nimbus().store().firewalls.upsert(firewall);
        Ok(rules)
    }
}

impl ResourceClient for FirewallsClient {
    fn resource_name(&self) -> &str {
        self.base.resource_name()
    }
}

impl ValidationOperations for FirewallsClient {}

impl ResourceOperations for FirewallsClient {
    fn nimbus(&self) -> &Nimbus {
        self.base.nimbus()
    }
}
