//! # Expense Records

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::coerce::{self, ValidationResult};
use crate::store::Record;

/// A single purchase booked against a budget item, as persisted.
///
/// `amount` is stored as a decimal string so tables round-trip exactly;
/// [`ExpenseView`] is the HTTP rendering with a numeric amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    /// Budget this expense counts against. Not checked for existence.
    pub budget_item_id: String,
    pub expense_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    #[serde(default)]
    pub recipient: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Wire name of the budget reference, used for filtered listing
    pub const BUDGET_ITEM_FIELD: &'static str = "budgetItemId";
}

/// JSON response shape of an expense: `amount` is a number
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseView {
    pub id: String,
    pub budget_item_id: String,
    pub expense_date: NaiveDate,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub recipient: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl From<Expense> for ExpenseView {
    fn from(e: Expense) -> Self {
        Self {
            id: e.id,
            budget_item_id: e.budget_item_id,
            expense_date: e.expense_date,
            description: e.description,
            amount: e.amount,
            recipient: e.recipient,
            category: e.category,
            created_at: e.created_at,
        }
    }
}

/// Validated input for a new expense
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub budget_item_id: String,
    pub expense_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub recipient: String,
    pub category: Option<String>,
}

impl ExpenseDraft {
    /// Validate a JSON request body
    pub fn from_json(body: &Value) -> ValidationResult<Self> {
        let obj = coerce::object(body)?;
        Ok(Self {
            budget_item_id: coerce::string(obj, "budgetItemId")?,
            expense_date: coerce::date(obj, "expenseDate")?,
            description: coerce::string(obj, "description")?,
            amount: coerce::amount(obj, "amount")?,
            recipient: coerce::optional_string(obj, "recipient")?.unwrap_or_default(),
            category: coerce::optional_string(obj, "category")?,
        })
    }
}

impl Record for Expense {
    type Draft = ExpenseDraft;

    const KIND: &'static str = "Expense";

    fn from_draft(id: String, created_at: DateTime<Utc>, draft: ExpenseDraft) -> Self {
        Self {
            id,
            budget_item_id: draft.budget_item_id,
            expense_date: draft.expense_date,
            description: draft.description,
            amount: draft.amount,
            recipient: draft.recipient,
            category: draft.category,
            created_at,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }
}
