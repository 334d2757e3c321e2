// Managed database clusters client

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

/// Client for the `/databases/{engine}/instances` endpoint family
pub struct DatabasesClient {
    base: BaseResourceClient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Mysql,
    Postgresql,
}

impl Engine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Mysql => "mysql",
            Engine::Postgresql => "postgresql",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseStatus {
    Provisioning,
    Active,
    Suspending,
    Suspended,
    Resuming,
    Resizing,
    Degraded,
    Failed,
}

/// A managed database cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub id: i64,
    pub label: String,
    pub engine: Engine,
    pub status: DatabaseStatus,
    pub region: String,
    #[serde(default)]
    pub cluster_size: Option<u32>,
    #[serde(default)]
    pub allow_list: Vec<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
}

impl StoreRecord for Database {
    fn record_id(&self) -> i64 {
        self.id
    }
}

/// Root credentials for a cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateDatabase {
    pub label: String,
    pub engine: Engine,
    pub region: String,
    #[serde(rename = "type")]
    pub plan_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_list: Option<Vec<String>>,
}

/// Partial update; every field is optional.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateDatabase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_list: Option<Vec<String>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub plan_type: Option<String>,
}

pub fn create_database_schema() -> Schema {
    Schema::new()
        .field(
            "label",
            FieldRule::string().required().min_length(3).max_length(32),
        )
        .field(
            "engine",
            FieldRule::string()
                .required()
                .one_of(&["mysql", "postgresql"]),
        )
        .field("region", FieldRule::string().required().min_length(1))
        .field("type", FieldRule::string().required().min_length(1))
        .field(
            "cluster_size",
            FieldRule::integer().min(1).max(3).default_value(1),
        )
        .field("allow_list", FieldRule::string_list())
}

pub fn update_database_schema() -> Schema {
    Schema::new()
        .field("label", FieldRule::string().min_length(3).max_length(32))
        .field("allow_list", FieldRule::string_list())
        .field("type", FieldRule::string().min_length(1))
}

impl DatabasesClient {
    pub(crate) fn new(nimbus: Arc<Nimbus>) -> Self {
        Self {
            base: BaseResourceClient::new(nimbus, "databases"),
        }
    }

    fn instance_path(&self, engine: Engine, id: i64) -> String {
        format!("/databases/{}/instances/{}", engine.as_str(), id)
    }

    /// Returns a paginated list of clusters for one engine. Never mutates
    /// the store.
    pub async fn list(
        &self,
        engine: Engine,
        params: Option<ListParams>,
        filter: Option<Filter>,
    ) -> ApiResult<Page<Database>> {
        self.fetch_page(
            format!("/databases/{}/instances", engine.as_str()),
            params,
            filter,
        )
        .await
    }

    /// Returns a single cluster by id.
    pub async fn get(&self, engine: Engine, id: i64) -> ApiResult<Database> {
        let id = self.validate_id(id)?;
        self.fetch(self.instance_path(engine, id)).await
    }

    /// Provisions a new cluster and upserts the returned record.
    pub async fn create(&self, payload: &CreateDatabase) -> ApiResult<Database> {
        let database: Database = self
            .submit(
                Method::Post,
                format!("/databases/{}/instances", payload.engine.as_str()),
                payload,
                Some(&create_database_schema()),
            )
            .await?;
        self.nimbus().store().databases.upsert(database.clone());
        Ok(database)
    }

    /// Updates a cluster and upserts the returned record.
    pub async fn update(
        &self,
        engine: Engine,
        id: i64,
        payload: &UpdateDatabase,
    ) -> ApiResult<Database> {
        let id = self.validate_id(id)?;
        let database: Database = self
            .submit(
                Method::Put,
                self.instance_path(engine, id),
                payload,
                Some(&update_database_schema()),
            )
            .await?;
        self.nimbus().store().databases.upsert(database.clone());
        Ok(database)
    }

    /// Deletes a cluster and removes its store entry.
    pub async fn delete(&self, engine: Engine, id: i64) -> ApiResult<()> {
        let id = self.validate_id(id)?;
        self.submit_unit(Method::Delete, self.instance_path(engine, id))
            .await?;
        self.nimbus().store().databases.remove(id);
        Ok(())
    }

    /// Suspends a running cluster.
    ///
    /// The suspend endpoint returns no body, so the record is re-fetched
    /// afterwards and upserted; the store always reflects the server's view
    /// of the cluster status.
    pub async fn suspend(&self, engine: Engine, id: i64) -> ApiResult<Database> {
        let id = self.validate_id(id)?;
        self.submit_unit(
            Method::Post,
            format!("{}/suspend", self.instance_path(engine, id)),
        )
        .await?;
        self.refresh(engine, id).await
    }

    /// Powers a suspended cluster back on. Same store policy as `suspend`.
    pub async fn resume(&self, engine: Engine, id: i64) -> ApiResult<Database> {
        let id = self.validate_id(id)?;
        self.submit_unit(
            Method::Post,
            format!("{}/resume", self.instance_path(engine, id)),
        )
        .await?;
        self.refresh(engine, id).await
    }

    /// Returns the root credentials for a cluster.
    pub async fn credentials(&self, engine: Engine, id: i64) -> ApiResult<DatabaseCredentials> {
        let id = self.validate_id(id)?;
        self.fetch(format!("{}/credentials", self.instance_path(engine, id)))
            .await
    }

    /// Resets the root password for a cluster.
    pub async fn reset_credentials(&self, engine: Engine, id: i64) -> ApiResult<()> {
        let id = self.validate_id(id)?;
        self.submit_unit(
            Method::Post,
            format!("{}/credentials/reset", self.instance_path(engine, id)),
        )
        .await
    }

    /// Re-fetch a cluster and upsert the server's representation.
    async fn refresh(&self, engine: Engine, id: i64) -> ApiResult<Database> {
        let database: Database = self.fetch(self.instance_path(engine, id)).await?;
        self.nimbus().store().databases.upsert(database.clone());
        Ok(database)
    }
}

impl ResourceClient for DatabasesClient {
    fn resource_name(&self) -> &str {
        self.base.resource_name()
    }
}

impl ValidationOperations for DatabasesClient {}

impl ResourceOperations for DatabasesClient {
    fn nimbus(&self) -> &Nimbus {
        self.base.nimbus()
    }
}
