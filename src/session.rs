use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::settings::config_dir;

/// The logged-in user, as stored under the `user` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "type")]
    pub user_type: String,
    #[serde(default)]
    pub email: String,
}

impl Session {
    #[cfg(test)]
    pub fn employee(email: &str) -> Self {
        Self {
            user_type: "Employee".to_string(),
            email: email.to_string(),
        }
    }
}

pub fn session_path() -> PathBuf {
    config_dir().join("session.json")
}

/// Read the session; a missing or unreadable file means nobody is logged in.
pub fn load_session_from(path: &Path) -> Option<Session> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(session) => Some(session),
        Err(e) => {
            debug!("ignoring malformed session at {}: {e}", path.display());
            None
        }
    }
}

pub fn save_session_to(path: &Path, session: &Session) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(session)?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

/// Returns whether a session was removed.
pub fn clear_session_at(path: &Path) -> Result<bool> {
    if path.exists() {
        std::fs::remove_file(path)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

pub fn load_session() -> Option<Session> {
    load_session_from(&session_path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");
        save_session_to(&path, &Session::employee("a@a")).unwrap();
        let loaded = load_session_from(&path).unwrap();
        assert_eq!(loaded.email, "a@a");
        assert_eq!(loaded.user_type, "Employee");
    }

    #[test]
    fn test_stored_shape_uses_type_key() {
        let json = serde_json::to_string(&Session::employee("a@a")).unwrap();
        assert_eq!(json, r#"{"type":"Employee","email":"a@a"}"#);
    }

    #[test]
    fn test_missing_email_is_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"type": "Employee"}"#).unwrap();
        let loaded = load_session_from(&path).unwrap();
        assert!(loaded.email.is_empty());
    }

    #[test]
    fn test_malformed_or_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        assert!(load_session_from(&path).is_none());
        std::fs::write(&path, "not json").unwrap();
        assert!(load_session_from(&path).is_none());
    }

    #[test]
    fn test_clear_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        save_session_to(&path, &Session::employee("a@a")).unwrap();
        assert!(clear_session_at(&path).unwrap());
        assert!(!clear_session_at(&path).unwrap());
    }
}
