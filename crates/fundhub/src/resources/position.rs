//! Client position endpoints

use serde_json::Value;

use super::{Resource, endpoint};
use crate::{
    client::Client,
    error::Result,
    http::{RequestDescriptor, UploadOptions, UploadPayload},
    types::{ClientDetailParams, ClientListParams, PositionListParams},
};

const PREFIX: &str = "/api/position";

/// Position resource.
#[derive(Debug, Clone)]
pub struct Positions {
    client: Client,
}

impl Positions {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List positions, paginated.
    pub async fn list(&self, params: &PositionListParams) -> Result<Value> {
        let request = RequestDescriptor::get(endpoint(PREFIX, &["list"])).query_params(params)?;
        self.client.send_value(request).await
    }

    /// Position analysis of one client group.
    pub async fn analyze_client(&self, group_id: &str) -> Result<Value> {
        self.client
            .send_value(RequestDescriptor::get(endpoint(PREFIX, &["client", group_id])))
            .await
    }

    /// Holder analysis of one fund.
    pub async fn analyze_fund(&self, fund_code: &str) -> Result<Value> {
        self.client
            .send_value(RequestDescriptor::get(endpoint(PREFIX, &["fund", fund_code])))
            .await
    }

    /// The `top_n` largest holders of one fund.
    pub async fn top_holders(&self, fund_code: &str, top_n: u32) -> Result<Value> {
        let request = RequestDescriptor::get(endpoint(PREFIX, &["fund", fund_code, "top-holders"]))
            .query("top_n", top_n);
        self.client.send_value(request).await
    }

    /// Holder concentration of one fund.
    pub async fn concentration(&self, fund_code: &str) -> Result<Value> {
        let request =
            RequestDescriptor::get(endpoint(PREFIX, &["fund", fund_code, "concentration"]));
        self.client.send_value(request).await
    }

    /// Positions summed per financial planner, optionally for one planner.
    pub async fn by_planner(&self, planner: Option<&str>) -> Result<Value> {
        let request = RequestDescriptor::get(endpoint(PREFIX, &["summary", "by-planner"]))
            .query_opt("domestic_planner", planner);
        self.client.send_value(request).await
    }

    /// Book-wide position statistics.
    pub async fn statistics(&self) -> Result<Value> {
        self.client
            .send_value(RequestDescriptor::get(endpoint(PREFIX, &["statistics", "overview"])))
            .await
    }

    /// Upload position spreadsheets.
    pub async fn upload(&self, files: UploadPayload, options: &UploadOptions) -> Result<Value> {
        self.client
            .upload(&endpoint(PREFIX, &["upload"]), files, options)
            .await
    }

    /// List clients, paginated.
    pub async fn clients(&self, params: &ClientListParams) -> Result<Value> {
        let request = RequestDescriptor::get(endpoint(PREFIX, &["clients"])).query_params(params)?;
        self.client.send_value(request).await
    }

    /// Holdings and stage returns of one client group.
    pub async fn client_detail(&self, group_id: &str, params: &ClientDetailParams) -> Result<Value> {
        let request = RequestDescriptor::get(endpoint(PREFIX, &["clients", group_id]))
            .query_params(params)?;
        self.client.send_value(request).await
    }

    /// Delete a client group and all of its positions.
    pub async fn delete_client(&self, group_id: &str) -> Result<Value> {
        self.client
            .send_value(RequestDescriptor::delete(endpoint(PREFIX, &["clients", group_id])))
            .await
    }

    /// Upload client dividend spreadsheets.
    pub async fn upload_client_dividends(
        &self,
        files: UploadPayload,
        options: &UploadOptions,
    ) -> Result<Value> {
        self.client
            .upload(&endpoint(PREFIX, &["client-dividends", "upload"]), files, options)
            .await
    }
}

impl Resource for Positions {
    fn client(&self) -> &Client {
        &self.client
    }
}
