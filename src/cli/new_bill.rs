use std::path::Path;

use colored::Colorize;
use tracing::debug;

use super::bills::CliNavigator;
use super::{require_session, NewBillArgs};
use crate::error::{BillError, Result};
use crate::new_bill::{NewBill, NewBillForm, SubmitOutcome, ALLOWED_EXTENSIONS};
use crate::settings::load_settings;
use crate::store::{BillStore, SqliteStore};

pub fn run(args: NewBillArgs) -> Result<()> {
    let session = require_session()?;
    let settings = load_settings();
    let data_dir = std::path::PathBuf::from(&settings.data_dir);

    let sqlite = if args.dry_run {
        None
    } else {
        Some(SqliteStore::open(&data_dir)?)
    };
    let store = sqlite.as_ref().map(|s| s as &dyn BillStore);

    let navigator = CliNavigator {
        data_dir,
        email: session.email.clone(),
    };
    let mut flow = NewBill::new(session, store, navigator, settings.navigation_policy());

    flow.handle_change_file(Path::new(&args.file));
    if flow.file_error() {
        let message = format!(
            "Receipt must be a {} file: {}",
            ALLOWED_EXTENSIONS.join(", "),
            args.file
        );
        eprintln!("{}", message.red());
        return Err(BillError::InvalidFile(args.file));
    }

    let form = NewBillForm {
        expense_type: args.expense_type,
        name: args.name,
        date: args.date,
        amount: args.amount,
        vat: args.vat,
        pct: args.pct,
        commentary: args.commentary,
    };

    let outcome = flow.handle_submit(&form);
    debug!(state = ?flow.state(), "submission finished");
    match outcome {
        SubmitOutcome::Persisted(_) => {
            println!("{} {}", "Saved bill".green(), flow.bill_id().unwrap_or_default());
            if let Some(url) = flow.file_url() {
                println!("Receipt stored at {url}");
            }
            Ok(())
        }
        SubmitOutcome::NotPersisted => {
            println!(
                "Form and receipt {} are valid; nothing was saved (dry run).",
                flow.file_name().unwrap_or_default()
            );
            Ok(())
        }
        SubmitOutcome::Rejected(reason) => Err(BillError::Other(reason)),
        SubmitOutcome::Failed { stage, reason } => {
            eprintln!("{}", format!("Bill was not saved ({stage:?} failed): {reason}").red());
            Err(BillError::Store(reason))
        }
    }
}
