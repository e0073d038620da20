//! Project holding endpoints
//!
//! Project names are free text (spaces, slashes, CJK) and are always
//! percent-encoded into the path.

use serde_json::Value;

use super::{Resource, endpoint};
use crate::{
    client::Client,
    error::Result,
    http::RequestDescriptor,
    types::{AssetAllocation, AssetRatios, IndustryAllocation, IndustryAllocationUpdate, MonthRangeParams},
};

const PREFIX: &str = "/api/project-holding";

/// Project holding resource.
#[derive(Debug, Clone)]
pub struct ProjectHoldings {
    client: Client,
}

impl ProjectHoldings {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Every project with its latest recorded month.
    pub async fn projects(&self) -> Result<Value> {
        self.client
            .send_value(RequestDescriptor::get(endpoint(PREFIX, &["projects"])))
            .await
    }

    /// Asset and industry records of one project.
    pub async fn detail(&self, project_name: &str) -> Result<Value> {
        self.client
            .send_value(RequestDescriptor::get(endpoint(PREFIX, &[project_name])))
            .await
    }

    /// Add an asset allocation record. The project in the path wins over
    /// the one in the body.
    pub async fn create_asset(&self, project_name: &str, record: &AssetAllocation) -> Result<Value> {
        let request =
            RequestDescriptor::post(endpoint(PREFIX, &[project_name, "asset"])).json(record)?;
        self.client.send_value(request).await
    }

    /// Add an industry allocation record.
    pub async fn create_industry(
        &self,
        project_name: &str,
        record: &IndustryAllocation,
    ) -> Result<Value> {
        let request =
            RequestDescriptor::post(endpoint(PREFIX, &[project_name, "industry"])).json(record)?;
        self.client.send_value(request).await
    }

    /// Change the ratios of an asset record.
    pub async fn update_asset(&self, record_id: i64, ratios: &AssetRatios) -> Result<Value> {
        let request = RequestDescriptor::put(endpoint(PREFIX, &["asset", &record_id.to_string()]))
            .json(ratios)?;
        self.client.send_value(request).await
    }

    /// Change an industry record.
    pub async fn update_industry(
        &self,
        record_id: i64,
        update: &IndustryAllocationUpdate,
    ) -> Result<Value> {
        let request = RequestDescriptor::put(endpoint(PREFIX, &["industry", &record_id.to_string()]))
            .json(update)?;
        self.client.send_value(request).await
    }

    /// Delete an asset record.
    pub async fn delete_asset(&self, record_id: i64) -> Result<Value> {
        let request =
            RequestDescriptor::delete(endpoint(PREFIX, &["asset", &record_id.to_string()]));
        self.client.send_value(request).await
    }

    /// Delete an industry record.
    pub async fn delete_industry(&self, record_id: i64) -> Result<Value> {
        let request =
            RequestDescriptor::delete(endpoint(PREFIX, &["industry", &record_id.to_string()]));
        self.client.send_value(request).await
    }

    /// Asset and industry analysis of one project over an optional month
    /// window.
    pub async fn analysis(&self, project_name: &str, months: &MonthRangeParams) -> Result<Value> {
        let request = RequestDescriptor::get(endpoint(PREFIX, &[project_name, "analysis"]))
            .query_params(months)?;
        self.client.send_value(request).await
    }

    /// Delete a project and every record under it.
    pub async fn delete_project(&self, project_name: &str) -> Result<Value> {
        self.client
            .send_value(RequestDescriptor::delete(endpoint(PREFIX, &["projects", project_name])))
            .await
    }
}

impl Resource for ProjectHoldings {
    fn client(&self) -> &Client {
        &self.client
    }
}
