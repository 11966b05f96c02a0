//! # Records
//!
//! Typed expense and budget records plus the validating constructors that turn
//! an untyped request body into a draft the store can insert.

mod budget;
mod coerce;
mod expense;

pub use budget::{parse_year, Budget, BudgetDraft, BudgetView};
pub use coerce::{ValidationError, ValidationResult, DATE_FORMAT};
pub use expense::{Expense, ExpenseDraft, ExpenseView};
