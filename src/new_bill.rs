use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::error::{BillError, Result};
use crate::fmt::parse_date;
use crate::models::{Bill, BillDraft, BillStatus, DEFAULT_PCT, EXPENSE_TYPES};
use crate::routes::{Navigator, Route};
use crate::session::Session;
use crate::store::BillStore;

/// Receipt formats accepted by the form. Matched case-sensitively.
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    FileSelected,
    Submitting,
    Succeeded,
    Failed,
}

/// Whether a failed save still returns the user to the bill list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPolicy {
    Always,
    OnSuccess,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Create,
    Update,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Both store calls went through.
    Persisted(Bill),
    /// No store is configured, so nothing was saved.
    NotPersisted,
    /// The form or the attachment did not validate; the store was not called.
    Rejected(String),
    Failed { stage: Stage, reason: String },
}

#[derive(Debug, Clone, Default)]
pub struct NewBillForm {
    pub expense_type: String,
    pub name: String,
    pub date: String,
    pub amount: f64,
    pub vat: Option<String>,
    pub pct: Option<i64>,
    pub commentary: Option<String>,
}

impl NewBillForm {
    pub fn validate(&self) -> Result<()> {
        if !EXPENSE_TYPES.contains(&self.expense_type.as_str()) {
            return Err(BillError::InvalidForm(format!(
                "unknown expense type '{}' (expected one of: {})",
                self.expense_type,
                EXPENSE_TYPES.join(", ")
            )));
        }
        parse_date(&self.date)?;
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(BillError::InvalidForm(format!(
                "amount must be a positive number, got {}",
                self.amount
            )));
        }
        if let Some(vat) = &self.vat {
            if vat.parse::<f64>().map_or(true, |v| !v.is_finite() || v < 0.0) {
                return Err(BillError::InvalidForm(format!("vat '{vat}' is not a valid amount")));
            }
        }
        if let Some(pct) = self.pct {
            if !(0..=100).contains(&pct) {
                return Err(BillError::InvalidForm(format!("pct must be within 0..=100, got {pct}")));
            }
        }
        Ok(())
    }
}

pub fn is_allowed_file(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext))
}

/// The new-bill form: receipt selection followed by a create-then-update save.
pub struct NewBill<'a, N: Navigator> {
    session: Session,
    store: Option<&'a dyn BillStore>,
    navigator: N,
    policy: NavigationPolicy,
    state: FlowState,
    file_error: bool,
    file_name: Option<String>,
    file_path: Option<PathBuf>,
    bill_id: Option<String>,
    file_url: Option<String>,
}

impl<'a, N: Navigator> NewBill<'a, N> {
    pub fn new(
        session: Session,
        store: Option<&'a dyn BillStore>,
        navigator: N,
        policy: NavigationPolicy,
    ) -> Self {
        Self {
            session,
            store,
            navigator,
            policy,
            state: FlowState::Idle,
            file_error: false,
            file_name: None,
            file_path: None,
            bill_id: None,
            file_url: None,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// True while the last selected file has a disallowed extension.
    pub fn file_error(&self) -> bool {
        self.file_error
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn bill_id(&self) -> Option<&str> {
        self.bill_id.as_deref()
    }

    pub fn file_url(&self) -> Option<&str> {
        self.file_url.as_deref()
    }

    #[cfg(test)]
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Select the receipt. Returns whether it was accepted.
    pub fn handle_change_file(&mut self, path: &Path) -> bool {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if is_allowed_file(&file_name) {
            self.file_error = false;
            self.file_name = Some(file_name);
            self.file_path = Some(path.to_path_buf());
            self.state = FlowState::FileSelected;
            true
        } else {
            warn!(file_name = %file_name, "rejected receipt with disallowed extension");
            self.file_error = true;
            self.file_name = None;
            self.file_path = None;
            self.state = FlowState::Idle;
            false
        }
    }

    pub fn handle_submit(&mut self, form: &NewBillForm) -> SubmitOutcome {
        self.bill_id = None;
        self.file_url = None;

        let Some(file_name) = self.file_name.clone() else {
            self.state = FlowState::Idle;
            return SubmitOutcome::Rejected(format!(
                "select a receipt ({}) before submitting",
                ALLOWED_EXTENSIONS.join(", ")
            ));
        };
        if let Err(e) = form.validate() {
            self.state = FlowState::FileSelected;
            return SubmitOutcome::Rejected(e.to_string());
        }

        let Some(store) = self.store else {
            self.state = FlowState::Succeeded;
            self.navigator.navigate(Route::Bills);
            return SubmitOutcome::NotPersisted;
        };

        self.state = FlowState::Submitting;
        match self.persist(store, form, file_name) {
            Ok(bill) => {
                info!(id = %bill.id, "bill saved");
                self.bill_id = Some(bill.id.clone());
                self.file_url = bill.file_url.clone();
                self.state = FlowState::Succeeded;
                self.navigator.navigate(Route::Bills);
                SubmitOutcome::Persisted(bill)
            }
            Err((stage, e)) => {
                error!(?stage, "bill was not saved: {e}");
                self.state = FlowState::Failed;
                if self.policy == NavigationPolicy::Always {
                    self.navigator.navigate(Route::Bills);
                }
                SubmitOutcome::Failed {
                    stage,
                    reason: e.to_string(),
                }
            }
        }
    }

    fn persist(
        &self,
        store: &dyn BillStore,
        form: &NewBillForm,
        file_name: String,
    ) -> std::result::Result<Bill, (Stage, BillError)> {
        let draft = BillDraft {
            file_name,
            email: self.session.email.clone(),
            attachment: self.file_path.clone(),
        };
        let created = store.create(&draft).map_err(|e| (Stage::Create, e))?;

        let bill = Bill {
            id: created.key,
            email: self.session.email.clone(),
            bill_type: form.expense_type.clone(),
            name: form.name.clone(),
            date: Some(form.date.clone()),
            iso_date: None,
            formatted_date: None,
            amount: form.amount,
            vat: form.vat.clone(),
            pct: form.pct.unwrap_or(DEFAULT_PCT),
            commentary: form.commentary.clone(),
            status: BillStatus::Pending,
            file_url: created.file_url,
            file_name: Some(created.file_name),
            comment_admin: None,
        };
        store.update(&bill).map_err(|e| (Stage::Update, e))
    }
}
