use std::sync::Arc;

use shared::{
    domain::Cnpj,
    protocol::{ExpenseEntry, ListOperatorsQuery, Operator, OperatorPage},
};
use tokio::sync::watch;

use crate::{
    state::{RequestState, RequestStateCell},
    PanelApi,
};

pub const LIST_FALLBACK: &str = "Erro ao carregar operadoras.";
pub const DETAIL_FALLBACK: &str = "Erro ao carregar detalhes da operadora.";
pub const EXPENSES_FALLBACK: &str = "Erro ao carregar histórico de despesas.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOperatorsParams {
    pub page: u32,
    pub limit: u32,
    pub search: String,
}

impl Default for ListOperatorsParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: String::new(),
        }
    }
}

impl ListOperatorsParams {
    /// A search that is blank after trimming is left out of the query instead
    /// of being sent as an empty filter.
    pub fn to_query(&self) -> ListOperatorsQuery {
        let search = self.search.trim();
        ListOperatorsQuery {
            page: self.page,
            limit: self.limit,
            search: (!search.is_empty()).then(|| search.to_string()),
        }
    }
}

/// Listing, detail and expense history of operators. All three operations
/// report through the same [`RequestState`].
pub struct OperatorAccessor {
    api: Arc<dyn PanelApi>,
    state: RequestStateCell,
}

impl OperatorAccessor {
    pub fn new(api: Arc<dyn PanelApi>) -> Self {
        Self {
            api,
            state: RequestStateCell::new(),
        }
    }

    pub fn state(&self) -> RequestState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state.subscribe()
    }

    pub async fn list_operators(&self, params: &ListOperatorsParams) -> Option<OperatorPage> {
        let query = params.to_query();
        self.state
            .track("list_operators", LIST_FALLBACK, self.api.list_operators(&query))
            .await
    }

    pub async fn operator_detail(&self, cnpj: &Cnpj) -> Option<Operator> {
        self.state
            .track("operator_detail", DETAIL_FALLBACK, self.api.operator(cnpj))
            .await
    }

    pub async fn expense_history(&self, cnpj: &Cnpj) -> Option<Vec<ExpenseEntry>> {
        self.state
            .track("expense_history", EXPENSES_FALLBACK, self.api.expenses(cnpj))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_is_omitted() {
        for search in ["", "   ", "\t\n"] {
            let params = ListOperatorsParams {
                search: search.to_string(),
                ..Default::default()
            };
            assert_eq!(params.to_query().search, None, "search {search:?}");
        }
        assert_eq!(ListOperatorsParams::default().to_query().search, None);
    }

    #[test]
    fn search_is_trimmed() {
        let params = ListOperatorsParams {
            page: 2,
            limit: 5,
            search: " acme ".to_string(),
        };
        assert_eq!(
            params.to_query(),
            ListOperatorsQuery {
                page: 2,
                limit: 5,
                search: Some("acme".to_string()),
            }
        );
    }
}
