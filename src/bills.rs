use comfy_table::{Cell, CellAlignment, Table};
use tracing::warn;

use crate::fmt::{euros, format_date, format_status};
use crate::models::Bill;

/// Bills in list order: undated bills dropped, most recent first.
///
/// Bills sharing a date keep their input order.
pub fn sorted_for_display(bills: Option<&[Bill]>) -> Vec<&Bill> {
    let Some(bills) = bills else {
        return Vec::new();
    };
    let mut rows: Vec<&Bill> = bills.iter().filter(|b| b.date.is_some()).collect();
    rows.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
    rows
}

/// Attach the sort key and display label derived from the stored date.
///
/// A date that does not parse is left as-is and shown raw.
pub fn prepare_for_display(mut bill: Bill) -> Bill {
    let Some(raw) = bill.date.clone() else {
        return bill;
    };
    match format_date(&raw) {
        Ok(label) => {
            bill.iso_date = Some(raw);
            bill.formatted_date = Some(label);
        }
        Err(e) => warn!(id = %bill.id, "keeping unformatted date: {e}"),
    }
    bill
}

pub fn render_table(bills: Option<&[Bill]>) -> String {
    let rows = sorted_for_display(bills);

    let mut table = Table::new();
    table.set_header(vec!["Type", "Name", "Date", "Amount", "Status", "Receipt"]);
    for bill in &rows {
        table.add_row(vec![
            Cell::new(&bill.bill_type),
            Cell::new(&bill.name),
            Cell::new(bill.display_date()),
            Cell::new(euros(bill.amount)).set_alignment(CellAlignment::Right),
            Cell::new(format_status(bill.status)),
            Cell::new(bill.file_url.as_deref().unwrap_or("\u{2014}")),
        ]);
    }

    if rows.is_empty() {
        format!("My expense reports\n{table}\nNo bills yet.")
    } else {
        format!("My expense reports\n{table}")
    }
}
