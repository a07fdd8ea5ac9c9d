use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BillError;

/// Expense categories offered by the new-bill form.
pub const EXPENSE_TYPES: &[&str] = &[
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

pub const DEFAULT_PCT: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Accepted => "accepted",
            BillStatus::Refused => "refused",
        }
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillStatus {
    type Err = BillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BillStatus::Pending),
            "accepted" => Ok(BillStatus::Accepted),
            "refused" => Ok(BillStatus::Refused),
            other => Err(BillError::Other(format!("Unknown bill status: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    pub email: String,
    #[serde(rename = "type")]
    pub bill_type: String,
    pub name: String,
    pub date: Option<String>,
    #[serde(rename = "ISODate", default, skip_serializing_if = "Option::is_none")]
    pub iso_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_date: Option<String>,
    pub amount: f64,
    pub vat: Option<String>,
    pub pct: i64,
    pub commentary: Option<String>,
    pub status: BillStatus,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub comment_admin: Option<String>,
}

impl Bill {
    /// Key the list view orders by: the normalized date when known, else the raw one.
    pub fn sort_key(&self) -> Option<&str> {
        self.iso_date.as_deref().or(self.date.as_deref())
    }

    /// The date as shown in a list row.
    pub fn display_date(&self) -> &str {
        self.formatted_date
            .as_deref()
            .or(self.date.as_deref())
            .unwrap_or_default()
    }
}

/// Minimal record sent to the store before the bill is completed.
#[derive(Debug, Clone)]
pub struct BillDraft {
    pub file_name: String,
    pub email: String,
    pub attachment: Option<PathBuf>,
}

/// What the store hands back from `create`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedBill {
    pub key: String,
    pub file_url: Option<String>,
    pub file_name: String,
}
