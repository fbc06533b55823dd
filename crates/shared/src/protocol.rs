//! Wire shapes served by the panel backend.
//!
//! Every record keeps what it received: fields the panel does not model land
//! in a flattened `extra` map, nullable fields are [`Field`]s and amounts stay
//! as JSON numbers, so a decoded body re-serialises unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::{
    domain::{Cnpj, Quarter},
    field::Field,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operator {
    pub cnpj: Cnpj,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub razao_social: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub uf: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub modalidade: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub registro_ans: Field<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorPage {
    pub data: Vec<Operator>,
    pub meta: PageMeta,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    #[serde(rename = "ano")]
    pub year: i32,
    #[serde(rename = "trimestre")]
    pub quarter: Quarter,
    #[serde(rename = "valor_despesas")]
    pub expense_value: Number,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopOperator {
    pub cnpj: Cnpj,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub razao_social: Field<String>,
    pub total_despesas: Number,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateExpense {
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub uf: Field<String>,
    pub total_despesas: Number,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Aggregates over all operators. Treated as opaque: every modelled field may
/// be absent or `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub total_despesas: Field<Number>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub media_despesas: Field<Number>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub top5_operadoras: Field<Vec<TopOperator>>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub despesas_por_uf: Field<Vec<StateExpense>>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub cache_ttl_seconds: Field<Number>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Query string of `GET /api/operadoras`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOperatorsQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}
