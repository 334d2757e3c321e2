// Compute instances client

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

/// Client for the `/instances` endpoint family
pub struct InstancesClient {
    base: BaseResourceClient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceStatus {
    Running,
    Offline,
    Booting,
    Rebooting,
    ShuttingDown,
    Provisioning,
    Deleting,
    Migrating,
}

/// A compute instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub id: i64,
    pub label: String,
    pub status: InstanceStatus,
    pub region: String,
    #[serde(rename = "type")]
    pub instance_type: String,
    #[serde(default)]
    pub ipv4: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
}

impl StoreRecord for Instance {
    fn record_id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateInstance {
    pub label: String,
    pub region: String,
    #[serde(rename = "type")]
    pub instance_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_pass: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backups_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Partial update; every field is optional.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateInstance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Options for cloning an instance into a new one.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CloneInstance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backups_enabled: Option<bool>,
}

pub fn create_instance_schema() -> Schema {
    Schema::new()
        .field(
            "label",
            FieldRule::string().required().min_length(3).max_length(64),
        )
        .field("region", FieldRule::string().required().min_length(1))
        .field("type", FieldRule::string().required().min_length(1))
        .field("image", FieldRule::string().min_length(1))
        .field("root_pass", FieldRule::string().min_length(7).max_length(128))
        .field("backups_enabled", FieldRule::boolean().default_value(false))
        .field("tags", FieldRule::string_list())
}

pub fn update_instance_schema() -> Schema {
    Schema::new()
        .field("label", FieldRule::string().min_length(3).max_length(64))
        .field("tags", FieldRule::string_list())
}

pub fn reset_password_schema() -> Schema {
    Schema::new().field(
        "root_pass",
        FieldRule::string().required().min_length(7).max_length(128),
    )
}

impl InstancesClient {
    pub(crate) fn new(nimbus: Arc<Nimbus>) -> Self {
        Self {
            base: BaseResourceClient::new(nimbus, "instances"),
        }
    }

    /// Returns a paginated list of instances. Never mutates the store.
    pub async fn list(
        &self,
        params: Option<ListParams>,
        filter: Option<Filter>,
    ) -> ApiResult<Page<Instance>> {
        self.fetch_page("/instances".to_string(), params, filter)
            .await
    }

    /// Returns a single instance by id.
    pub async fn get(&self, id: i64) -> ApiResult<Instance> {
        let id = self.validate_id(id)?;
        self.fetch(format!("/instances/{}", id)).await
    }

    /// Provisions a new instance and upserts the returned record.
    pub async fn create(&self, payload: &CreateInstance) -> ApiResult<Instance> {
        let instance: Instance = self
            .submit(
                Method::Post,
                "/instances".to_string(),
                payload,
                Some(&create_instance_schema()),
            )
            .await?;
        self.nimbus().store().instances.upsert(instance.clone());
        Ok(instance)
    }

    /// Updates an instance and upserts the returned record.
    pub async fn update(&self, id: i64, payload: &UpdateInstance) -> ApiResult<Instance> {
        let id = self.validate_id(id)?;
        let instance: Instance = self
            .submit(
                Method::Put,
                format!("/instances/{}", id),
                payload,
                Some(&update_instance_schema()),
            )
            .await?;
        self.nimbus().store().instances.upsert(instance.clone());
        Ok(instance)
    }

    /// Deletes an instance and removes its store entry.
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let id = self.validate_id(id)?;
        self.submit_unit(Method::Delete, format!("/instances/{}", id))
            .await?;
        self.nimbus().store().instances.remove(id);
        Ok(())
    }

    /// Clones an instance; the new instance is upserted into the store.
    pub async fn clone_instance(&self, id: i64, payload: &CloneInstance) -> ApiResult<Instance> {
        let id = self.validate_id(id)?;
        let instance: Instance = self
            .submit(
                Method::Post,
                format!("/instances/{}/clone", id),
                payload,
                None,
            )
            .await?;
        self.nimbus().store().instances.upsert(instance.clone());
        Ok(instance)
    }

    /// Reboots an instance.
    ///
    /// The reboot endpoint returns no body, so the record is re-fetched and
    /// upserted afterwards; the store reflects the server's view of the
    /// transitional status.
    pub async fn reboot(&self, id: i64) -> ApiResult<Instance> {
        let id = self.validate_id(id)?;
        self.submit_unit(Method::Post, format!("/instances/{}/reboot", id))
            .await?;
        let instance: Instance = self.fetch(format!("/instances/{}", id)).await?;
        self.nimbus().store().instances.upsert(instance.clone());
        Ok(instance)
    }

    /// Resets the root password on an offline instance. No store change; the
    /// record itself is unaffected.
    pub async fn reset_root_password(&self, id: i64, root_pass: impl Into<String>) -> ApiResult<()> {
        let id = self.validate_id(id)?;
        let root_pass = self.validate_string(root_pass, "root_pass")?;
        let request = crate::request::Request::new()
            .url(format!("/instances/{}/password", id))?
            .method(Method::Post)
            .validated_body(&json!({ "root_pass": root_pass }), &reset_password_schema())?;
        self.nimbus().execute_unit(request).await
    }
}

impl ResourceClient for InstancesClient {
    fn resource_name(&self) -> &str {
        self.base.resource_name()
    }
}

impl ValidationOperations for InstancesClient {}

impl ResourceOperations for InstancesClient {
    fn nimbus(&self) -> &Nimbus {
        self.base.nimbus()
    }
}
