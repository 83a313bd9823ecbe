use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{Table, TableColumn};
use crate::domain::Category;
use crate::ledger::Aggregates;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "stats",
        "Show totals, average and the per-category breakdown",
        "stats",
        cmd_stats,
    )]
}

fn cmd_stats(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let aggregates = context.ledger.aggregates();
    let formatters = context.formatters();

    output::section("Summary");
    output::info(format!("  Total   : {}", formatters.amount(aggregates.total)));
    output::info(format!("  Average : {}", formatters.amount(aggregates.average)));
    output::info(format!("  Count   : {}", aggregates.count));

    output::section("By category");
    output::raw(category_table(context, &aggregates).render());
    if aggregates.is_empty() {
        output::info("No expenses recorded yet.");
    }
    Ok(())
}

fn category_table(context: &ShellContext, aggregates: &Aggregates) -> Table {
    let formatters = context.formatters();
    let mut table = Table::new(vec![
        TableColumn::left("Category"),
        TableColumn::right("Amount"),
        TableColumn::right("Share"),
        TableColumn::right("Count"),
    ]);
    for category in Category::ALL {
        let totals = aggregates.category(category);
        table.push_row(vec![
            category.to_string(),
            formatters.amount(totals.sum),
            formatters.percentage(totals.percentage),
            totals.count.to_string(),
        ]);
    }
    table
}
