//! # Budget Records

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::coerce::{self, ValidationError, ValidationResult};
use crate::store::{Record, Updatable};

/// Planned spending for one line item in one year, as persisted.
///
/// `budget_amount` is stored as a decimal string; [`BudgetView`] renders it as a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub year: i32,
    pub name: String,
    pub expense_type: String,
    pub budget_amount: Decimal,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl Budget {
    /// Wire name of the year index
    pub const YEAR_FIELD: &'static str = "year";
}

/// JSON response shape of a budget: `budgetAmount` is a number
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetView {
    pub id: String,
    pub year: i32,
    pub name: String,
    pub expense_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub budget_amount: Decimal,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl From<Budget> for BudgetView {
    fn from(b: Budget) -> Self {
        Self {
            id: b.id,
            year: b.year,
            name: b.name,
            expense_type: b.expense_type,
            budget_amount: b.budget_amount,
            created_at: b.created_at,
        }
    }
}

/// Validated budget fields, used both for creation and full replacement
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetDraft {
    pub year: i32,
    pub name: String,
    pub expense_type: String,
    pub budget_amount: Decimal,
}

impl BudgetDraft {
    /// Validate a JSON request body
    pub fn from_json(body: &Value) -> ValidationResult<Self> {
        let obj = coerce::object(body)?;
        Ok(Self {
            year: coerce::integer(obj, "year")?,
            name: coerce::string(obj, "name")?,
            expense_type: coerce::string(obj, "expenseType")?,
            budget_amount: coerce::amount(obj, "budgetAmount")?,
        })
    }
}

/// Parse the `{year}` path segment of the year listing
pub fn parse_year(segment: &str) -> ValidationResult<i32> {
    segment
        .parse::<i32>()
        .map_err(|_| ValidationError::InvalidField {
            field: "year",
            reason: format!("'{}' is not an integer", segment),
        })
}

impl Record for Budget {
    type Draft = BudgetDraft;

    const KIND: &'static str = "Budget";

    fn from_draft(id: String, created_at: DateTime<Utc>, draft: BudgetDraft) -> Self {
        Self {
            id,
            year: draft.year,
            name: draft.name,
            expense_type: draft.expense_type,
            budget_amount: draft.budget_amount,
            created_at,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }
}

impl Updatable for Budget {
    type Patch = BudgetDraft;

    fn apply(&mut self, patch: BudgetDraft) {
        self.year = patch.year;
        self.name = patch.name;
        self.expense_type = patch.expense_type;
        self.budget_amount = patch.budget_amount;
    }
}
