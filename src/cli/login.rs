use super::bills::CliNavigator;
use crate::db::DB_FILE;
use crate::error::{BillError, Result};
use crate::routes::{Navigator, Route};
use crate::session::{clear_session_at, save_session_to, session_path, Session};
use crate::settings::get_data_dir;

pub fn login(email: &str, user_type: &str) -> Result<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(BillError::Other("Email must not be empty".to_string()));
    }
    let session = Session {
        user_type: user_type.to_string(),
        email: email.to_string(),
    };
    save_session_to(&session_path(), &session)?;
    println!("Logged in as {email} ({user_type})");

    let data_dir = get_data_dir();
    if data_dir.join(DB_FILE).exists() {
        let mut navigator = CliNavigator {
            data_dir,
            email: session.email,
        };
        navigator.navigate(Route::Bills);
    }
    Ok(())
}

pub fn logout() -> Result<()> {
    if clear_session_at(&session_path())? {
        println!("Logged out");
    } else {
        println!("Nobody is logged in");
    }
    let mut navigator = CliNavigator {
        data_dir: get_data_dir(),
        email: String::new(),
    };
    navigator.navigate(Route::Login);
    Ok(())
}
