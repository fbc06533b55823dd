//! Page loaders: what each routed page fetches before it can render.

use std::sync::Arc;

use client_core::{ListOperatorsParams, OperatorAccessor, PanelApi, StatisticsAccessor};
use page_router::Page;
use serde::Serialize;
use shared::{
    domain::Cnpj,
    protocol::{ExpenseEntry, Operator, OperatorPage, Statistics},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageModel {
    OperatorList {
        operators: Option<OperatorPage>,
        statistics: Option<Statistics>,
        errors: Vec<String>,
    },
    OperatorDetail {
        cnpj: Cnpj,
        operator: Option<Operator>,
        expenses: Option<Vec<ExpenseEntry>>,
        errors: Vec<String>,
    },
    NotFound {
        path: String,
    },
}

impl PageModel {
    pub fn errors(&self) -> &[String] {
        match self {
            Self::OperatorList { errors, .. } | Self::OperatorDetail { errors, .. } => errors,
            Self::NotFound { .. } => &[],
        }
    }
}

pub struct Pages {
    statistics: StatisticsAccessor,
    operators: OperatorAccessor,
}

impl Pages {
    pub fn new(api: Arc<dyn PanelApi>) -> Self {
        Self {
            statistics: StatisticsAccessor::new(Arc::clone(&api)),
            operators: OperatorAccessor::new(api),
        }
    }

    pub fn statistics(&self) -> &StatisticsAccessor {
        &self.statistics
    }

    pub fn operators(&self) -> &OperatorAccessor {
        &self.operators
    }

    /// Loads run one after another so each error read below belongs to the
    /// call that just finished.
    pub async fn load(&self, page: &Page) -> PageModel {
        let mut errors = Vec::new();
        match page {
            Page::OperatorList => {
                let operators = self
                    .operators
                    .list_operators(&ListOperatorsParams::default())
                    .await;
                errors.extend(self.operators.state().error);
                let statistics = self.statistics.load_statistics().await;
                errors.extend(self.statistics.state().error);
                PageModel::OperatorList {
                    operators,
                    statistics,
                    errors,
                }
            }
            Page::OperatorDetail(props) => {
                let operator = self.operators.operator_detail(&props.cnpj).await;
                errors.extend(self.operators.state().error);
                let expenses = self.operators.expense_history(&props.cnpj).await;
                errors.extend(self.operators.state().error);
                PageModel::OperatorDetail {
                    cnpj: props.cnpj.clone(),
                    operator,
                    expenses,
                    errors,
                }
            }
            Page::NotFound { path } => PageModel::NotFound { path: path.clone() },
        }
    }
}
