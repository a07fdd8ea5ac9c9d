use std::cell::{Cell, RefCell};

use crate::error::{BillError, Result};
use crate::models::{Bill, BillDraft, BillStatus, CreatedBill};

use super::BillStore;

pub const MOCK_KEY: &str = "47qAXb6fIm2zOKkLzMro";

/// In-memory store with canned answers, for exercising the submission flow.
#[derive(Default)]
pub struct MockStore {
    pub bills: Vec<Bill>,
    pub failure: Option<String>,
    pub fail_update_only: bool,
    pub create_calls: Cell<usize>,
    pub update_calls: Cell<usize>,
    pub updated: RefCell<Vec<Bill>>,
}

impl MockStore {
    pub fn with_bills(bills: Vec<Bill>) -> Self {
        Self {
            bills,
            ..Self::default()
        }
    }

    /// Every call rejects with `message`.
    pub fn fail_with(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// `create` succeeds, `update` rejects with `message`.
    pub fn fail_update_with(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            fail_update_only: true,
            ..Self::default()
        }
    }

    fn check(&self, is_update: bool) -> Result<()> {
        match &self.failure {
            Some(msg) if is_update || !self.fail_update_only => Err(BillError::Store(msg.clone())),
            _ => Ok(()),
        }
    }
}

pub fn sample_bill(id: &str, date: Option<&str>) -> Bill {
    Bill {
        id: id.to_string(),
        email: "a@a".to_string(),
        bill_type: "Hôtel et logement".to_string(),
        name: "encore".to_string(),
        date: date.map(str::to_string),
        iso_date: None,
        formatted_date: None,
        amount: 400.0,
        vat: Some("80".to_string()),
        pct: 20,
        commentary: Some("séminaire billed".to_string()),
        status: BillStatus::Pending,
        file_url: None,
        file_name: Some("preview-facture-free-201801-pdf-1.jpg".to_string()),
        comment_admin: None,
    }
}

impl BillStore for MockStore {
    fn list(&self, email: Option<&str>) -> Result<Vec<Bill>> {
        self.check(false)?;
        Ok(self
            .bills
            .iter()
            .filter(|b| email.map_or(true, |e| b.email == e))
            .cloned()
            .collect())
    }

    fn get(&self, id: &str) -> Result<Option<Bill>> {
        self.check(false)?;
        Ok(self.bills.iter().find(|b| b.id == id).cloned())
    }

    fn create(&self, draft: &BillDraft) -> Result<CreatedBill> {
        self.create_calls.set(self.create_calls.get() + 1);
        self.check(false)?;
        Ok(CreatedBill {
            key: MOCK_KEY.to_string(),
            file_url: None,
            file_name: draft.file_name.clone(),
        })
    }

    fn update(&self, bill: &Bill) -> Result<Bill> {
        self.update_calls.set(self.update_calls.get() + 1);
        self.check(true)?;
        self.updated.borrow_mut().push(bill.clone());
        Ok(bill.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE_URL: &str = "https://firebasestorage.googleapis.com/v0/b/billable-677b6.a…f-1.jpg?alt=media&token=c1640e12-a24b-4b11-ae52-529112e9602a";

    #[test]
    fn test_create_then_update_round_trip() {
        let store = MockStore::default();
        let created = store
            .create(&BillDraft {
                file_name: "preview-facture-free-201801-pdf-1.jpg".to_string(),
                email: "a@a".to_string(),
                attachment: None,
            })
            .unwrap();
        assert_eq!(created.key, MOCK_KEY);
        assert!(created.file_url.is_none());
        assert_eq!(created.file_name, "preview-facture-free-201801-pdf-1.jpg");

        let mut complete = sample_bill(MOCK_KEY, Some("2004-04-04"));
        complete.file_url = Some(FILE_URL.to_string());
        complete.comment_admin = Some("ok".to_string());
        let updated = store.update(&complete).unwrap();
        assert_eq!(updated.id, MOCK_KEY);
        assert_eq!(updated.file_url.as_deref(), Some(FILE_URL));
        assert_eq!(updated.file_name.as_deref(), Some("preview-facture-free-201801-pdf-1.jpg"));
    }

    #[test]
    fn test_list_and_get_by_owner() {
        let mut other = sample_bill("b2", Some("2003-03-03"));
        other.email = "b@b".to_string();
        let store = MockStore::with_bills(vec![sample_bill("b1", Some("2004-04-04")), other]);
        assert_eq!(store.list(Some("a@a")).unwrap().len(), 1);
        assert_eq!(store.list(None).unwrap().len(), 2);
        assert_eq!(store.get("b2").unwrap().unwrap().email, "b@b");
        assert!(store.get("nope").unwrap().is_none());
    }

    #[test]
    fn test_fail_with_rejects_create() {
        let store = MockStore::fail_with("Erreur 500");
        let err = store
            .create(&BillDraft {
                file_name: "x.jpg".to_string(),
                email: "a@a".to_string(),
                attachment: None,
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "Erreur 500");
        assert_eq!(store.create_calls.get(), 1);
    }
}
