use chrono::{Datelike, NaiveDate};

use crate::error::{BillError, Result};
use crate::models::BillStatus;

const MONTHS: &[&str] = &[
    "Jan.", "Feb.", "Mar.", "Apr.", "May", "Jun.", "Jul.", "Aug.", "Sep.", "Oct.", "Nov.", "Dec.",
];

/// Format an amount in euros with thousands separators: 1,234.56 €
pub fn euros(val: f64) -> String {
    let negative = val < 0.0;
    let cents = format!("{:.2}", val.abs());
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-{with_commas}.{dec_part} €")
    } else {
        format!("{with_commas}.{dec_part} €")
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| BillError::InvalidForm(format!("date '{raw}': {e}")))
}

/// Short display label for an ISO date: 2004-04-04 -> 4 Apr. 04
pub fn format_date(raw: &str) -> Result<String> {
    let date = parse_date(raw)?;
    let month = MONTHS[date.month0() as usize];
    Ok(format!("{} {month} {}", date.format("%-d"), date.format("%y")))
}

pub fn format_status(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "Pending",
        BillStatus::Accepted => "Accepted",
        BillStatus::Refused => "Refused",
    }
}

pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
