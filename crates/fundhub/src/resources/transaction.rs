//! Client transaction endpoints

use serde_json::Value;

use super::{Resource, endpoint};
use crate::{
    client::Client,
    error::Result,
    http::{RequestDescriptor, UploadOptions, UploadPayload},
    types::{ClientTransactionParams, DateRangeParams, PeriodParams, TransactionClientParams},
};

const PREFIX: &str = "/api/transaction";

/// Transaction resource.
#[derive(Debug, Clone)]
pub struct Transactions {
    client: Client,
}

impl Transactions {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Upload transaction spreadsheets.
    pub async fn upload(&self, files: UploadPayload, options: &UploadOptions) -> Result<Value> {
        self.client
            .upload(&endpoint(PREFIX, &["upload"]), files, options)
            .await
    }

    /// Clients that have transactions, paginated.
    pub async fn clients(&self, params: &TransactionClientParams) -> Result<Value> {
        let request = RequestDescriptor::get(endpoint(PREFIX, &["clients"])).query_params(params)?;
        self.client.send_value(request).await
    }

    /// Transactions of one client group, paginated.
    pub async fn client_transactions(
        &self,
        group_id: &str,
        params: &ClientTransactionParams,
    ) -> Result<Value> {
        let request = RequestDescriptor::get(endpoint(PREFIX, &["clients", group_id, "transactions"]))
            .query_params(params)?;
        self.client.send_value(request).await
    }

    /// Delete every transaction of one client group.
    pub async fn delete_client(&self, group_id: &str) -> Result<Value> {
        self.client
            .send_value(RequestDescriptor::delete(endpoint(PREFIX, &["clients", group_id])))
            .await
    }

    /// Transaction totals over an optional window.
    pub async fn stats(&self, params: &DateRangeParams) -> Result<Value> {
        let request = RequestDescriptor::get(endpoint(PREFIX, &["stats"])).query_params(params)?;
        self.client.send_value(request).await
    }

    /// Detailed trading analysis of one client group.
    pub async fn client_analysis(&self, group_id: &str) -> Result<Value> {
        let request = RequestDescriptor::get(endpoint(PREFIX, &["clients", group_id, "analysis"]));
        self.client.send_value(request).await
    }

    /// Month-by-month absolute profit of one client group since its first
    /// trade.
    pub async fn monthly_profit_trend(&self, group_id: &str) -> Result<Value> {
        let request = RequestDescriptor::get(endpoint(
            PREFIX,
            &["clients", group_id, "monthly-profit-trend"],
        ));
        self.client.send_value(request).await
    }

    /// Per-product profit of one client group over a window.
    pub async fn period_profit_analysis(&self, group_id: &str, period: PeriodParams) -> Result<Value> {
        let request = RequestDescriptor::get(endpoint(
            PREFIX,
            &["clients", group_id, "period-profit-analysis"],
        ))
        .query_params(&period)?;
        self.client.send_value(request).await
    }
}

impl Resource for Transactions {
    fn client(&self) -> &Client {
        &self.client
    }
}
