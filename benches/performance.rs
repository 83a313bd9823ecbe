use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use expense_ledger::{
    core::FixedClock,
    domain::{Category, ExpenseId, ExpenseRecord},
    ledger::{sort_records, summarize, SortKey},
    storage::{load_records_from_path, save_records_to_path, MemoryStore},
    ExpenseDraft, Ledger,
};
use tempfile::tempdir;

fn sample_records(count: usize) -> Vec<ExpenseRecord> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..count)
        .map(|idx| ExpenseRecord {
            id: ExpenseId::new(1_700_000_000_000 + idx as u64),
            description: format!("Expense {idx}"),
            amount: 5.0 + (idx % 250) as f64 * 1.25,
            category: Category::ALL[idx % Category::ALL.len()],
            date: start + Duration::days((idx % 365) as i64),
        })
        .collect()
}

fn bench_storage_io(c: &mut Criterion) {
    let records = sample_records(black_box(10_000));
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("expenseTrackerData.json");

    c.bench_function("expenses_save_10k", |b| {
        b.iter(|| save_records_to_path(&records, &path).expect("save expenses"))
    });

    save_records_to_path(&records, &path).expect("seed");

    c.bench_function("expenses_load_10k", |b| {
        b.iter(|| black_box(load_records_from_path(&path).expect("load expenses")))
    });
}

fn bench_views(c: &mut Criterion) {
    let records = sample_records(10_000);

    for key in SortKey::ALL {
        c.bench_function(&format!("sort_{key}_10k"), |b| {
            b.iter_batched(
                || records.clone(),
                |mut batch| sort_records(&mut batch, key),
                BatchSize::LargeInput,
            )
        });
    }

    c.bench_function("summarize_10k", |b| {
        b.iter(|| black_box(summarize(&records)))
    });
}

fn bench_add(c: &mut Criterion) {
    let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    c.bench_function("ledger_add_1k_in_memory", |b| {
        b.iter_batched(
            || {
                Ledger::new(
                    Box::new(Arc::new(MemoryStore::new())),
                    Arc::new(FixedClock::on(today)),
                )
            },
            |mut ledger| {
                for idx in 0..1_000 {
                    let draft = ExpenseDraft::new(format!("Item {idx}"))
                        .amount(10.0 + idx as f64)
                        .category("Diğer")
                        .on(today);
                    let _ = ledger.add(draft).expect("valid draft");
                }
                ledger
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_storage_io, bench_views, bench_add);
criterion_main!(benches);
