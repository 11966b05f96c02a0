//! # Budget Summary
//!
//! Spending against each budget: total spent, remaining amount, percent used
//! and the number of expenses booked to it.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::records::{Budget, BudgetView, Expense};

/// One budget with its spending figures
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLine {
    #[serde(flatten)]
    pub budget: BudgetView,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_spent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub percent_used: Decimal,
    pub expense_count: usize,
}

/// Spending figures for a set of budgets
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub lines: Vec<BudgetLine>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_budget: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_spent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_remaining: Decimal,
}

impl BudgetSummary {
    /// Summarize `budgets`, counting only expenses whose `budgetItemId` names one of them
    pub fn build(budgets: Vec<Budget>, expenses: &[Expense]) -> Self {
        let mut spent: HashMap<&str, (Decimal, usize)> = HashMap::new();
        for expense in expenses {
            let entry = spent
                .entry(expense.budget_item_id.as_str())
                .or_insert((Decimal::ZERO, 0));
            entry.0 += expense.amount;
            entry.1 += 1;
        }

        let lines: Vec<BudgetLine> = budgets
            .into_iter()
            .map(|budget| {
                let (total_spent, expense_count) = spent
                    .get(budget.id.as_str())
                    .copied()
                    .unwrap_or((Decimal::ZERO, 0));
                BudgetLine {
                    remaining: budget.budget_amount - total_spent,
                    percent_used: percent(total_spent, budget.budget_amount),
                    total_spent,
                    expense_count,
                    budget: BudgetView::from(budget),
                }
            })
            .collect();

        let total_budget: Decimal = lines.iter().map(|l| l.budget.budget_amount).sum();
        let total_spent: Decimal = lines.iter().map(|l| l.total_spent).sum();

        Self {
            lines,
            total_budget,
            total_spent,
            total_remaining: total_budget - total_spent,
        }
    }
}

fn percent(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    (part * Decimal::ONE_HUNDRED / whole)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
