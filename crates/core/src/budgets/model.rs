//! Budget domain model.

use serde::{Deserialize, Serialize};

use crate::sync::{SyncableRecord, SyncMeta};

/// A spending limit for one category in one calendar month.
///
/// Budgets have no independent primary id: identity *is* the business key,
/// derived as `category_month_year`. Setting a budget for the same category
/// and month twice overwrites the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub category: String,
    pub month: u32,
    pub year: i32,
    pub amount: f64,
    pub spent: f64,
    #[serde(flatten)]
    pub sync: SyncMeta,
}

/// Derived composite key shared by the local row and the remote document.
pub fn budget_key(category: &str, month: u32, year: i32) -> String {
    format!("{category}_{month}_{year}")
}

impl Budget {
    pub fn new(
        owner_id: impl Into<String>,
        category: impl Into<String>,
        month: u32,
        year: i32,
        amount: f64,
    ) -> Self {
        Self {
            category: category.into(),
            month,
            year,
            amount,
            spent: 0.0,
            sync: SyncMeta::new(owner_id),
        }
    }
}

impl SyncableRecord for Budget {
    fn key(&self) -> String {
        budget_key(&self.category, self.month, self.year)
    }

    fn meta(&self) -> &SyncMeta {
        &self.sync
    }

    fn meta_mut(&mut self) -> &mut SyncMeta {
        &mut self.sync
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_key_joins_category_month_year() {
        assert_eq!(budget_key("Groceries", 3, 2024), "Groceries_3_2024");
        let budget = Budget::new("acct-1", "Groceries", 3, 2024, 250.0);
        assert_eq!(budget.key(), "Groceries_3_2024");
    }

    #[test]
    fn same_business_key_means_same_identity() {
        let a = Budget::new("acct-1", "Rent", 1, 2025, 900.0);
        let b = Budget::new("acct-1", "Rent", 1, 2025, 950.0);
        assert_eq!(a.key(), b.key());
    }
}
