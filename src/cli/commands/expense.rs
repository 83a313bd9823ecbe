use crate::cli::confirmation::PendingAction;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{Table, TableColumn};
use crate::domain::{Displayable, ExpenseDraft, ExpenseId, ExpenseRecord};
use crate::ledger::{parse_amount, SortKey};

const ADD_USAGE: &str = "add <description> <amount> <category> [YYYY-MM-DD]";
const DESCRIPTION_COLUMN_WIDTH: usize = 40;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record a new expense", ADD_USAGE, cmd_add),
        CommandEntry::new(
            "list",
            "List expenses (newest, oldest, highest, lowest)",
            "list [sort]",
            cmd_list,
        ),
        CommandEntry::new(
            "sort",
            "Change the list order for this session",
            "sort <newest|oldest|highest|lowest>",
            cmd_sort,
        ),
        CommandEntry::new(
            "delete",
            "Delete one expense after confirmation",
            "delete <id>",
            cmd_delete,
        ),
        CommandEntry::new(
            "clear",
            "Delete every expense after confirmation",
            "clear",
            cmd_clear,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !(3..=4).contains(&args.len()) {
        return Err(CommandError::InvalidArguments(format!("usage: {ADD_USAGE}")));
    }

    let mut draft = ExpenseDraft::new(args[0]).category(args[2]);
    draft.amount = parse_amount(args[1]);
    let draft = match args.get(3) {
        Some(date) => draft.date(*date),
        None => draft.on(context.ledger.today()),
    };

    let outcome = context.ledger.add(draft)?;
    output::success(format!("Added {}", outcome.value.display_label()));
    context.report_persisted(&outcome);
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let key = match args.first() {
        Some(raw) => parse_sort_key(raw)?,
        None => context.sort,
    };
    print_expenses(context, key);
    Ok(())
}

fn cmd_sort(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: sort <newest|oldest|highest|lowest>".into(),
        ));
    };
    context.sort = parse_sort_key(raw)?;
    output::success(format!("Sorting by {}.", context.sort));
    print_expenses(context, context.sort);
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(CommandError::InvalidArguments("usage: delete <id>".into()));
    };
    let id: ExpenseId = raw
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not an expense id")))?;
    let Some(record) = context.ledger.get(id) else {
        return Err(CommandError::Message(format!("No expense with id #{id}.")));
    };
    output::info(record.display_label());
    context.request_confirmation(PendingAction::DeleteOne(id))
}

fn cmd_clear(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.ledger.is_empty() {
        output::info("Nothing to clear.");
        return Ok(());
    }
    output::info(format!("{} expense(s) will be removed.", context.ledger.len()));
    context.request_confirmation(PendingAction::ClearAll)
}

fn parse_sort_key(raw: &str) -> Result<SortKey, CommandError> {
    raw.parse().map_err(CommandError::InvalidArguments)
}

fn print_expenses(context: &ShellContext, key: SortKey) {
    let records = context.ledger.list(key);
    if records.is_empty() {
        output::info("No expenses recorded yet. Use `add` to record one.");
        return;
    }

    output::section(format!("Expenses ({key})"));
    output::raw(expense_table(context, &records).render());

    let aggregates = context.ledger.aggregates();
    let formatters = context.formatters();
    output::info(format!(
        "{} expense(s), total {}",
        aggregates.count,
        formatters.amount(aggregates.total)
    ));
}

fn expense_table(context: &ShellContext, records: &[ExpenseRecord]) -> Table {
    let formatters = context.formatters();
    let mut table = Table::new(vec![
        TableColumn::right("ID"),
        TableColumn::left("Date"),
        TableColumn::left("Category"),
        TableColumn::left("Description").max_width(DESCRIPTION_COLUMN_WIDTH),
        TableColumn::right("Amount"),
    ]);
    for record in records {
        table.push_row(vec![
            record.id.to_string(),
            formatters.date(record.date),
            record.category.to_string(),
            record.description.clone(),
            formatters.amount(record.amount),
        ]);
    }
    table
}
