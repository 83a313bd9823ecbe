use chrono::{DateTime, Utc};

use crate::domain::{ExpenseId, ExpenseRecord};

/// Hands out strictly increasing ids derived from wall-clock milliseconds.
///
/// When the clock stalls or runs backwards the previous id is bumped by one instead.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    /// Generator that never reissues an id already present in `records`.
    pub fn seeded(records: &[ExpenseRecord]) -> Self {
        let mut generator = Self::default();
        for record in records {
            generator.observe(record.id);
        }
        generator
    }

    pub fn observe(&mut self, id: ExpenseId) {
        self.last = self.last.max(id.get());
    }

    pub fn next(&mut self, now: DateTime<Utc>) -> ExpenseId {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let next = millis.max(self.last.saturating_add(1));
        self.last = next;
        ExpenseId::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn stalled_clock_still_yields_distinct_ids() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let mut ids = IdGenerator::default();
        let first = ids.next(now);
        let second = ids.next(now);
        assert_eq!(first.get(), now.timestamp_millis() as u64);
        assert_eq!(second.get(), first.get() + 1);
    }

    #[test]
    fn seeding_skips_past_stored_ids() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let mut ids = IdGenerator::default();
        ids.observe(ExpenseId::new(now.timestamp_millis() as u64 + 500));
        let next = ids.next(now);
        assert_eq!(next.get(), now.timestamp_millis() as u64 + 501);
    }
}
