//! Fund strategy endpoints

use serde::Serialize;
use serde_json::Value;

use super::{Resource, endpoint};
use crate::{
    client::Client,
    error::Result,
    http::{BlobResponse, RequestDescriptor, UploadOptions, UploadPayload},
    types::{FundCodes, QdStatus, StrategyInput, StrategyListParams},
};

const PREFIX: &str = "/api/strategy";

/// Strategy resource.
///
/// Maps each fund code to a main strategy, a sub-strategy and a QD flag.
#[derive(Debug, Clone)]
pub struct Strategies {
    client: Client,
}

impl Strategies {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a fund's strategy, or replace it if one exists.
    pub async fn create_or_update(&self, strategy: &StrategyInput) -> Result<Value> {
        let request = RequestDescriptor::post("/api/strategy/").json(strategy)?;
        self.client.send_value(request).await
    }

    /// List strategies, paginated.
    pub async fn list(&self, params: &StrategyListParams) -> Result<Value> {
        let request = RequestDescriptor::get("/api/strategy/").query_params(params)?;
        self.client.send_value(request).await
    }

    /// One fund's strategy.
    pub async fn by_fund(&self, fund_code: &str) -> Result<Value> {
        self.client
            .send_value(RequestDescriptor::get(endpoint(PREFIX, &[fund_code])))
            .await
    }

    /// Remove one fund's strategy.
    pub async fn delete(&self, fund_code: &str) -> Result<Value> {
        self.client
            .send_value(RequestDescriptor::delete(endpoint(PREFIX, &[fund_code])))
            .await
    }

    /// The main strategy values the backend accepts.
    pub async fn main_strategy_options(&self) -> Result<Value> {
        self.client
            .send_value(RequestDescriptor::get(endpoint(PREFIX, &["enums", "main-strategies"])))
            .await
    }

    /// Fund counts per strategy.
    pub async fn distribution(&self) -> Result<Value> {
        self.client
            .send_value(RequestDescriptor::get(endpoint(PREFIX, &["statistics", "distribution"])))
            .await
    }

    /// Strategy statistics.
    pub async fn statistics(&self) -> Result<Value> {
        self.client
            .send_value(RequestDescriptor::get(endpoint(PREFIX, &["statistics"])))
            .await
    }

    /// Set or clear a fund's QD flag.
    pub async fn update_qd_status(&self, fund_code: &str, is_qd: bool) -> Result<Value> {
        let request = RequestDescriptor::patch(endpoint(PREFIX, &[fund_code, "qd-status"]))
            .json(&QdStatus { is_qd })?;
        self.client.send_value(request).await
    }

    /// Remove several funds' strategies. The codes travel in a JSON body on
    /// the DELETE.
    pub async fn delete_many(&self, fund_codes: Vec<String>) -> Result<Value> {
        let request =
            RequestDescriptor::delete(endpoint(PREFIX, &["batch"])).json(&FundCodes { fund_codes })?;
        self.client.send_value(request).await
    }

    /// Update several strategies at once. The request shape is defined by
    /// the backend.
    pub async fn update_many<T: Serialize + ?Sized>(&self, changes: &T) -> Result<Value> {
        let request = RequestDescriptor::patch(endpoint(PREFIX, &["batch"])).json(changes)?;
        self.client.send_value(request).await
    }

    /// Export strategies as a spreadsheet. Returned for any status.
    pub async fn export(&self, params: &StrategyListParams) -> Result<BlobResponse> {
        let request = RequestDescriptor::get(endpoint(PREFIX, &["export"])).query_params(params)?;
        self.client.send_blob(request).await
    }

    /// Upload strategy spreadsheets.
    pub async fn upload(&self, files: UploadPayload) -> Result<Value> {
        self.client
            .upload(&endpoint(PREFIX, &["upload"]), files, &UploadOptions::default())
            .await
    }
}

impl Resource for Strategies {
    fn client(&self) -> &Client {
        &self.client
    }
}
