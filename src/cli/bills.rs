use std::path::PathBuf;

use comfy_table::{Cell, Table};

use super::require_session;
use crate::bills::{prepare_for_display, render_table, sorted_for_display};
use crate::error::{BillError, Result};
use crate::fmt::{euros, format_status};
use crate::routes::{Navigator, Route};
use crate::settings::get_data_dir;
use crate::store::{BillStore, SqliteStore};

/// Print the list view; returns how many rows it showed.
fn print_bills(store: &dyn BillStore, email: &str) -> Result<usize> {
    let bills: Vec<_> = store
        .list(Some(email))?
        .into_iter()
        .map(prepare_for_display)
        .collect();
    println!("{}", render_table(Some(bills.as_slice())));
    Ok(sorted_for_display(Some(bills.as_slice())).len())
}

pub fn list() -> Result<()> {
    let session = require_session()?;
    let data_dir = get_data_dir();
    let store = SqliteStore::open(&data_dir)?;
    if print_bills(&store, &session.email)? == 0 {
        let mut navigator = CliNavigator {
            data_dir,
            email: session.email,
        };
        navigator.navigate(Route::NewBill);
    }
    Ok(())
}

pub fn show(id: &str) -> Result<()> {
    let session = require_session()?;
    let store = SqliteStore::open(&get_data_dir())?;
    let bill = store
        .get(id)?
        .filter(|b| b.email == session.email)
        .ok_or_else(|| BillError::Other(format!("No bill with id {id}")))?;
    let bill = prepare_for_display(bill);

    let mut table = Table::new();
    let rows: Vec<(&str, String)> = vec![
        ("ID", bill.id.clone()),
        ("Type", bill.bill_type.clone()),
        ("Name", bill.name.clone()),
        ("Date", bill.display_date().to_string()),
        ("Amount", euros(bill.amount)),
        ("VAT", bill.vat.clone().unwrap_or_default()),
        ("VAT %", bill.pct.to_string()),
        ("Status", format_status(bill.status).to_string()),
        ("Commentary", bill.commentary.clone().unwrap_or_default()),
        ("Reviewer", bill.comment_admin.clone().unwrap_or_default()),
        ("Receipt", bill.file_name.clone().unwrap_or_default()),
        ("Receipt URL", bill.file_url.clone().unwrap_or_default()),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    println!("{table}");
    Ok(())
}

/// Renders the destination view on the terminal.
pub struct CliNavigator {
    pub data_dir: PathBuf,
    pub email: String,
}

impl Navigator for CliNavigator {
    fn navigate(&mut self, route: Route) {
        match route {
            Route::Bills => {
                let shown = SqliteStore::open(&self.data_dir)
                    .and_then(|store| print_bills(&store, &self.email).map(|_| ()));
                if let Err(e) = shown {
                    eprintln!("Could not load bills: {e}");
                }
            }
            Route::NewBill => println!("Run `billed new` to submit an expense report."),
            Route::Login => println!("Run `billed login --email <email>` to log in."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mock::{sample_bill, MockStore};

    #[test]
    fn test_print_bills_counts_shown_rows_only() {
        let store = MockStore::with_bills(vec![sample_bill("draft", None)]);
        assert_eq!(print_bills(&store, "a@a").unwrap(), 0);

        let store = MockStore::with_bills(vec![
            sample_bill("draft", None),
            sample_bill("done", Some("2004-04-04")),
        ]);
        assert_eq!(print_bills(&store, "a@a").unwrap(), 1);
    }
}
