use crate::utils::error::FinError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One row of the exchange rate table. `rate` is the price of one unit in
/// rubles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub name: String,
    pub rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Income,
    Expense,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Income => write!(f, "income"),
            OperationKind::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for OperationKind {
    type Err = FinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(OperationKind::Income),
            "expense" => Ok(OperationKind::Expense),
            _ => Err(FinError::ValidationError {
                field: "kind".to_string(),
                value: s.to_string(),
                reason: "expected 'income' or 'expense'".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub chat_id: i64,
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub chat_id: i64,
    pub name: String,
}

/// A single ledger entry. Amounts are stored in rubles; conversion happens
/// only when a report is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub chat_id: i64,
    pub date: NaiveDate,
    pub amount: f64,
    pub kind: OperationKind,
    pub category: String,
}

/// Everything the ledger persists, serialized as one JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerData {
    pub users: Vec<UserProfile>,
    pub categories: Vec<Category>,
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLine {
    pub date: NaiveDate,
    pub amount: f64,
    pub kind: OperationKind,
}

/// Ledger report in a display currency, amounts already converted and
/// rounded to two decimal places.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerReport {
    pub currency: String,
    pub lines: Vec<ReportLine>,
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}
