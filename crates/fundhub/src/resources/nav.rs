//! Net asset value endpoints

use serde::Serialize;
use serde_json::Value;

use super::{Resource, endpoint};
use crate::{
    client::Client,
    error::Result,
    http::{BlobResponse, RequestDescriptor, UploadOptions, UploadPayload},
    types::{NavExportParams, NavIds, NavListParams, NavRecordInput},
};

const PREFIX: &str = "/api/nav";

/// NAV resource.
///
/// Covers listing, manual entry, spreadsheet upload, deletion, statistics
/// and export of fund NAV records.
#[derive(Debug, Clone)]
pub struct Nav {
    client: Client,
}

impl Nav {
    /// Create a new NAV resource.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List NAV records, paginated.
    pub async fn list(&self, params: &NavListParams) -> Result<Value> {
        let request = RequestDescriptor::get(endpoint(PREFIX, &["list"])).query_params(params)?;
        self.client.send_value(request).await
    }

    /// Add one record by hand; the fund is created if `fund_name` is set and
    /// the code is unknown.
    pub async fn create_manual(&self, record: &NavRecordInput) -> Result<Value> {
        let request = RequestDescriptor::post(endpoint(PREFIX, &["manual"])).json(record)?;
        self.client.send_value(request).await
    }

    /// Create a record.
    pub async fn create(&self, record: &NavRecordInput) -> Result<Value> {
        let request = RequestDescriptor::post("/api/nav/").json(record)?;
        self.client.send_value(request).await
    }

    /// Upload NAV spreadsheets.
    pub async fn upload(&self, files: UploadPayload) -> Result<Value> {
        self.client
            .upload(&endpoint(PREFIX, &["upload"]), files, &UploadOptions::default())
            .await
    }

    /// Delete one record.
    pub async fn delete(&self, nav_id: i64) -> Result<Value> {
        let request = RequestDescriptor::delete(endpoint(PREFIX, &[&nav_id.to_string()]));
        self.client.send_value(request).await
    }

    /// Delete several records at once. The ids travel in a JSON body on the
    /// DELETE.
    pub async fn delete_many(&self, nav_ids: Vec<i64>) -> Result<Value> {
        let request = RequestDescriptor::delete("/api/nav/").json(&NavIds { nav_ids })?;
        self.client.send_value(request).await
    }

    /// The latest `limit` records of one fund.
    pub async fn by_fund(&self, fund_code: &str, limit: u32) -> Result<Value> {
        let request =
            RequestDescriptor::get(endpoint(PREFIX, &["fund", fund_code])).query("limit", limit);
        self.client.send_value(request).await
    }

    /// Summary statistics of one fund over the last `days` days.
    pub async fn statistics(&self, fund_code: &str, days: u32) -> Result<Value> {
        let request = RequestDescriptor::get(endpoint(PREFIX, &["statistics", fund_code]))
            .query("days", days);
        self.client.send_value(request).await
    }

    /// Funds that have at least one NAV record.
    pub async fn funds_with_nav(&self) -> Result<Value> {
        self.client
            .send_value(RequestDescriptor::get(endpoint(PREFIX, &["funds"])))
            .await
    }

    /// The most recent record of one fund.
    pub async fn latest(&self, fund_code: &str) -> Result<Value> {
        self.client
            .send_value(RequestDescriptor::get(endpoint(PREFIX, &["latest", fund_code])))
            .await
    }

    /// Run a NAV prediction. The request shape is defined by the backend.
    pub async fn predict<T: Serialize + ?Sized>(&self, input: &T) -> Result<Value> {
        let request = RequestDescriptor::post(endpoint(PREFIX, &["predict"])).json(input)?;
        self.client.send_value(request).await
    }

    /// Export NAV records as a spreadsheet.
    ///
    /// The response is returned for any status; check
    /// [`BlobResponse::is_success`] before saving it.
    pub async fn export(&self, params: &NavExportParams) -> Result<BlobResponse> {
        let request = RequestDescriptor::get(endpoint(PREFIX, &["export"])).query_params(params)?;
        self.client.send_blob(request).await
    }
}

impl Resource for Nav {
    fn client(&self) -> &Client {
        &self.client
    }
}
