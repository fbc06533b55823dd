use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    domain::Cnpj,
    error::ErrorBody,
    protocol::{ExpenseEntry, ListOperatorsQuery, Operator, OperatorPage, Statistics},
};
use tracing::debug;

pub mod error;
mod operators;
pub mod state;
mod statistics;

pub use error::{display_message, FetchError};
pub use operators::{ListOperatorsParams, OperatorAccessor};
pub use state::{RequestState, RequestStateCell};
pub use statistics::StatisticsAccessor;

pub const STATISTICS_PATH: &str = "/api/estatisticas";
pub const OPERATORS_PATH: &str = "/api/operadoras";

/// One request per call, no shared state. Accessors layer the observable
/// loading/error state on top of this.
#[async_trait]
pub trait PanelApi: Send + Sync {
    async fn statistics(&self) -> Result<Statistics, FetchError>;
    async fn list_operators(&self, query: &ListOperatorsQuery) -> Result<OperatorPage, FetchError>;
    async fn operator(&self, cnpj: &Cnpj) -> Result<Operator, FetchError>;
    async fn expenses(&self, cnpj: &Cnpj) -> Result<Vec<ExpenseEntry>, FetchError>;
}

pub fn operator_path(cnpj: &Cnpj) -> String {
    format!("{OPERATORS_PATH}/{cnpj}")
}

pub fn expenses_path(cnpj: &Cnpj) -> String {
    format!("{OPERATORS_PATH}/{cnpj}/despesas")
}

#[derive(Debug, Clone)]
pub struct HttpPanelApi {
    http: Client,
    base_url: String,
}

impl HttpPanelApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Uses a preconfigured client, e.g. one carrying a transport timeout.
    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn into_shared(self) -> Arc<dyn PanelApi> {
        Arc::new(self)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(format!("{}{path}", self.base_url))
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T, FetchError> {
        debug!(endpoint, "dispatching panel request");
        let res = request.send().await.map_err(|source| FetchError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;
        let status = res.status();
        let bytes = res.bytes().await.map_err(|source| FetchError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint: endpoint.to_string(),
                status,
                body: serde_json::from_slice::<ErrorBody>(&bytes).ok(),
            });
        }

        serde_json::from_slice(&bytes).map_err(|source| FetchError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

#[async_trait]
impl PanelApi for HttpPanelApi {
    async fn statistics(&self) -> Result<Statistics, FetchError> {
        self.fetch_json(STATISTICS_PATH, self.get(STATISTICS_PATH))
            .await
    }

    async fn list_operators(&self, query: &ListOperatorsQuery) -> Result<OperatorPage, FetchError> {
        self.fetch_json(OPERATORS_PATH, self.get(OPERATORS_PATH).query(query))
            .await
    }

    async fn operator(&self, cnpj: &Cnpj) -> Result<Operator, FetchError> {
        let path = operator_path(cnpj);
        self.fetch_json(&path, self.get(&path)).await
    }

    async fn expenses(&self, cnpj: &Cnpj) -> Result<Vec<ExpenseEntry>, FetchError> {
        let path = expenses_path(cnpj);
        self.fetch_json(&path, self.get(&path)).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
