pub mod bills;
pub mod init;
pub mod login;
pub mod new_bill;
pub mod status;

use clap::{Parser, Subcommand};

use crate::error::{BillError, Result};
use crate::session::{load_session, Session};

/// The logged-in user, or an error telling them to log in.
pub(crate) fn require_session() -> Result<Session> {
    match load_session() {
        Some(session) if !session.email.is_empty() => Ok(session),
        _ => Err(BillError::NotLoggedIn),
    }
}

#[derive(Parser)]
#[command(name = "billed", about = "Expense report CLI for employees.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and initialize the database.
    Init {
        /// Path for billed data (default: ~/Documents/billed)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Log in as an employee.
    Login {
        /// Email address identifying your bills
        #[arg(long)]
        email: String,
        /// Account type
        #[arg(long = "user-type", default_value = "Employee")]
        user_type: String,
    },
    /// Forget the logged-in user.
    Logout,
    /// List your expense reports, most recent first.
    Bills,
    /// Submit a new expense report with its receipt.
    New(NewBillArgs),
    /// Show a single expense report.
    Show {
        /// Bill ID (shown after `billed new`)
        id: String,
    },
    /// Show the current user, database, and bill counts.
    Status,
}

#[derive(clap::Args)]
pub struct NewBillArgs {
    /// Receipt image (jpg, jpeg or png)
    #[arg(long)]
    pub file: String,
    /// Expense category, e.g. 'Transports'
    #[arg(long = "expense-type")]
    pub expense_type: String,
    /// Short description of the expense
    #[arg(long, default_value = "")]
    pub name: String,
    /// Date of the expense: YYYY-MM-DD
    #[arg(long)]
    pub date: String,
    /// Amount including taxes, in euros
    #[arg(long, allow_negative_numbers = true)]
    pub amount: f64,
    /// VAT amount
    #[arg(long)]
    pub vat: Option<String>,
    /// VAT percentage (default 20)
    #[arg(long)]
    pub pct: Option<i64>,
    /// Free-form comment for the reviewer
    #[arg(long)]
    pub commentary: Option<String>,
    /// Validate the form without saving it
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}
