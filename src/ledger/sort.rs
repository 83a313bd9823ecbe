use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::{Amounted, Dated, Identifiable};

/// Display orders offered by the expense list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Most recent date first.
    #[default]
    Newest,
    /// Oldest date first.
    Oldest,
    /// Largest amount first.
    Highest,
    /// Smallest amount first.
    Lowest,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Newest,
        SortKey::Oldest,
        SortKey::Highest,
        SortKey::Lowest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::Highest => "highest",
            SortKey::Lowest => "lowest",
        }
    }

    /// The key producing the exact reverse order.
    pub fn reversed(self) -> Self {
        match self {
            SortKey::Newest => SortKey::Oldest,
            SortKey::Oldest => SortKey::Newest,
            SortKey::Highest => SortKey::Lowest,
            SortKey::Lowest => SortKey::Highest,
        }
    }

    /// Total order over records. Ties fall back to creation order (id).
    pub fn compare<T>(self, a: &T, b: &T) -> Ordering
    where
        T: Identifiable + Amounted + Dated,
    {
        match self {
            SortKey::Newest => b.date().cmp(&a.date()).then_with(|| b.id().cmp(&a.id())),
            SortKey::Oldest => a.date().cmp(&b.date()).then_with(|| a.id().cmp(&b.id())),
            SortKey::Highest => b
                .amount()
                .total_cmp(&a.amount())
                .then_with(|| b.id().cmp(&a.id())),
            SortKey::Lowest => a
                .amount()
                .total_cmp(&b.amount())
                .then_with(|| a.id().cmp(&b.id())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "newest" | "new" | "latest" => Ok(SortKey::Newest),
            "oldest" | "old" => Ok(SortKey::Oldest),
            "highest" | "high" | "max" => Ok(SortKey::Highest),
            "lowest" | "low" | "min" => Ok(SortKey::Lowest),
            other => Err(format!(
                "unknown sort order `{}` (expected newest, oldest, highest or lowest)",
                other
            )),
        }
    }
}

/// Sorts `records` in place according to `key`.
pub fn sort_records<T>(records: &mut [T], key: SortKey)
where
    T: Identifiable + Amounted + Dated,
{
    records.sort_by(|a, b| key.compare(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, ExpenseId, ExpenseRecord};
    use chrono::NaiveDate;

    fn record(id: u64, amount: f64, (y, m, d): (i32, u32, u32)) -> ExpenseRecord {
        ExpenseRecord {
            id: ExpenseId::new(id),
            description: format!("item {id}"),
            amount,
            category: Category::Other,
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        }
    }

    fn ids(records: &[ExpenseRecord]) -> Vec<u64> {
        records.iter().map(|r| r.id.get()).collect()
    }

    #[test]
    fn dates_compare_across_year_boundaries() {
        let mut records = vec![
            record(1, 5.0, (2023, 12, 31)),
            record(2, 5.0, (2024, 1, 2)),
            record(3, 5.0, (2024, 1, 10)),
        ];
        sort_records(&mut records, SortKey::Newest);
        assert_eq!(ids(&records), vec![3, 2, 1]);
        sort_records(&mut records, SortKey::Oldest);
        assert_eq!(ids(&records), vec![1, 2, 3]);
    }

    #[test]
    fn amounts_compare_numerically() {
        let mut records = vec![
            record(1, 9.5, (2024, 1, 1)),
            record(2, 100.0, (2024, 1, 1)),
            record(3, 10.25, (2024, 1, 1)),
        ];
        sort_records(&mut records, SortKey::Highest);
        assert_eq!(ids(&records), vec![2, 3, 1]);
    }

    #[test]
    fn ties_break_by_creation_order_in_both_directions() {
        let base = vec![
            record(1, 10.0, (2024, 1, 1)),
            record(2, 10.0, (2024, 1, 1)),
            record(3, 10.0, (2024, 1, 1)),
        ];
        for key in SortKey::ALL {
            let mut forward = base.clone();
            sort_records(&mut forward, key);
            let mut backward = base.clone();
            sort_records(&mut backward, key.reversed());
            backward.reverse();
            assert_eq!(ids(&forward), ids(&backward), "key {key}");
        }
    }

    #[test]
    fn parses_keys_and_aliases() {
        assert_eq!("Highest".parse::<SortKey>(), Ok(SortKey::Highest));
        assert_eq!("min".parse::<SortKey>(), Ok(SortKey::Lowest));
        assert!("sideways".parse::<SortKey>().is_err());
    }
}
