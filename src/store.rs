#[cfg(test)]
pub mod mock;

use std::path::{Path, PathBuf};

use rand::distributions::Alphanumeric;
use rand::Rng;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::db::{get_connection, init_db, DB_FILE};
use crate::error::{BillError, Result};
use crate::models::{Bill, BillDraft, BillStatus, CreatedBill};

const KEY_LEN: usize = 20;

/// Persistence service for bills.
///
/// A new bill is written in two steps: `create` registers a draft holding only
/// the attachment name and owner and hands back a generated key, then `update`
/// stores the complete record under that key.
pub trait BillStore {
    fn list(&self, email: Option<&str>) -> Result<Vec<Bill>>;
    fn get(&self, id: &str) -> Result<Option<Bill>>;
    fn create(&self, draft: &BillDraft) -> Result<CreatedBill>;
    fn update(&self, bill: &Bill) -> Result<Bill>;
}

pub struct SqliteStore {
    conn: Connection,
    attachments_dir: PathBuf,
}

impl SqliteStore {
    pub fn new(conn: Connection, attachments_dir: PathBuf) -> Self {
        Self { conn, attachments_dir }
    }

    /// Open the store living in a data directory.
    pub fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        let conn = get_connection(&data_dir.join(DB_FILE))?;
        init_db(&conn)?;
        Ok(Self::new(conn, data_dir.join("attachments")))
    }

    /// Per-status counts of the bills the list view shows; undated drafts are skipped.
    pub fn count_by_status(&self, email: Option<&str>) -> Result<Vec<(BillStatus, i64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT status, count(*) FROM bills \
             WHERE (?1 IS NULL OR email = ?1) AND date IS NOT NULL \
             GROUP BY status ORDER BY status",
        )?;
        let rows = stmt
            .query_map([email], |row| Ok((parse_status(row, 0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn store_attachment(&self, source: &Path, file_name: &str) -> Result<PathBuf> {
        let bytes = std::fs::read(source)?;
        let digest = hex::encode(Sha256::digest(&bytes));
        std::fs::create_dir_all(&self.attachments_dir)?;
        let dest = self.attachments_dir.join(format!("{}-{file_name}", &digest[..12]));
        std::fs::write(&dest, &bytes)?;
        Ok(dest)
    }
}

const BILL_COLUMNS: &str = "id, email, bill_type, name, date, amount, vat, pct, commentary, \
                            status, file_url, file_name, comment_admin";

fn parse_status(row: &Row, idx: usize) -> rusqlite::Result<BillStatus> {
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_bill(row: &Row) -> rusqlite::Result<Bill> {
    Ok(Bill {
        id: row.get(0)?,
        email: row.get(1)?,
        bill_type: row.get(2)?,
        name: row.get(3)?,
        date: row.get(4)?,
        iso_date: None,
        formatted_date: None,
        amount: row.get(5)?,
        vat: row.get(6)?,
        pct: row.get(7)?,
        commentary: row.get(8)?,
        status: parse_status(row, 9)?,
        file_url: row.get(10)?,
        file_name: row.get(11)?,
        comment_admin: row.get(12)?,
    })
}

fn generate_key() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(KEY_LEN)
        .map(char::from)
        .collect()
}

impl BillStore for SqliteStore {
    fn list(&self, email: Option<&str>) -> Result<Vec<Bill>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {BILL_COLUMNS} FROM bills WHERE (?1 IS NULL OR email = ?1) ORDER BY created_at, id"
        ))?;
        let rows = stmt
            .query_map([email], row_to_bill)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn get(&self, id: &str) -> Result<Option<Bill>> {
        let bill = self
            .conn
            .query_row(
                &format!("SELECT {BILL_COLUMNS} FROM bills WHERE id = ?1"),
                [id],
                row_to_bill,
            )
            .optional()?;
        Ok(bill)
    }

    fn create(&self, draft: &BillDraft) -> Result<CreatedBill> {
        let key = generate_key();
        let stored = match &draft.attachment {
            Some(path) => Some(self.store_attachment(path, &draft.file_name)?),
            None => None,
        };
        let file_url = stored.as_ref().map(|dest| format!("file://{}", dest.display()));
        let inserted = self.conn.execute(
            "INSERT INTO bills (id, email, file_name, file_url) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![key, draft.email, draft.file_name, file_url],
        );
        if let Err(e) = inserted {
            // no row will point at the copy
            if let Some(dest) = &stored {
                if let Err(rm) = std::fs::remove_file(dest) {
                    warn!("could not remove orphaned attachment {}: {rm}", dest.display());
                }
            }
            return Err(e.into());
        }
        debug!(key = %key, file_name = %draft.file_name, "bill draft created");
        Ok(CreatedBill {
            key,
            file_url,
            file_name: draft.file_name.clone(),
        })
    }

    fn update(&self, bill: &Bill) -> Result<Bill> {
        let changed = self.conn.execute(
            "UPDATE bills SET email = ?2, bill_type = ?3, name = ?4, date = ?5, amount = ?6, \
             vat = ?7, pct = ?8, commentary = ?9, status = ?10, file_url = ?11, file_name = ?12, \
             comment_admin = ?13 WHERE id = ?1",
            rusqlite::params![
                bill.id,
                bill.email,
                bill.bill_type,
                bill.name,
                bill.date,
                bill.amount,
                bill.vat,
                bill.pct,
                bill.commentary,
                bill.status.as_str(),
                bill.file_url,
                bill.file_name,
                bill.comment_admin,
            ],
        )?;
        if changed == 0 {
            return Err(BillError::Store("Erreur 404".to_string()));
        }
        info!(id = %bill.id, "bill updated");
        self.get(&bill.id)?
            .ok_or_else(|| BillError::Store("Erreur 404".to_string()))
    }
}
