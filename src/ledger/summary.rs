use std::collections::BTreeMap;

use crate::domain::{Amounted, Categorized, Category, ExpenseRecord};

/// Running totals for one category.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategoryTotals {
    pub sum: f64,
    pub count: usize,
    /// Share of the grand total in percent; 0 when the grand total is 0 or not finite.
    pub percentage: f64,
}

/// Derived statistics over the whole collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregates {
    pub total: f64,
    pub average: f64,
    pub count: usize,
    /// Always holds an entry for each of the five categories.
    pub per_category: BTreeMap<Category, CategoryTotals>,
}

impl Aggregates {
    pub fn category(&self, category: Category) -> CategoryTotals {
        self.per_category
            .get(&category)
            .copied()
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl Default for Aggregates {
    fn default() -> Self {
        summarize::<ExpenseRecord>(&[])
    }
}

/// One accumulation pass over `records`, then one pass turning sums into percentages.
pub fn summarize<T>(records: &[T]) -> Aggregates
where
    T: Amounted + Categorized,
{
    let mut per_category: BTreeMap<Category, CategoryTotals> = Category::ALL
        .into_iter()
        .map(|category| (category, CategoryTotals::default()))
        .collect();

    let mut total = 0.0;
    for record in records {
        let amount = record.amount();
        total += amount;
        let entry = per_category.entry(record.category()).or_default();
        entry.sum += amount;
        entry.count += 1;
    }

    // Loaded data is not re-validated, so the total can overflow.
    if total > 0.0 && total.is_finite() {
        for totals in per_category.values_mut() {
            totals.percentage = totals.sum / total * 100.0;
        }
    }

    let count = records.len();
    let average = if count == 0 { 0.0 } else { total / count as f64 };

    Aggregates {
        total,
        average,
        count,
        per_category,
    }
}
