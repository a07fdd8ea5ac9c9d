use crate::db::DB_FILE;
use crate::error::Result;
use crate::fmt::{format_bytes, format_status};
use crate::session::load_session;
use crate::settings::load_settings;
use crate::store::SqliteStore;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = std::path::PathBuf::from(&settings.data_dir);
    let db_path = data_dir.join(DB_FILE);
    let session = load_session();

    match &session {
        Some(s) if !s.email.is_empty() => println!("User:       {} ({})", s.email, s.user_type),
        _ => println!("User:       (not logged in)"),
    }
    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());

    if db_path.exists() {
        let size = std::fs::metadata(&db_path)?.len();
        println!("DB size:    {}", format_bytes(size));

        let store = SqliteStore::open(&data_dir)?;
        let email = session.as_ref().map(|s| s.email.as_str());
        let counts = store.count_by_status(email)?;

        println!();
        if counts.is_empty() {
            println!("No bills yet.");
        }
        for (status, count) in counts {
            println!("{:<11}{count}", format!("{}:", format_status(status)));
        }
    } else {
        println!();
        println!("Database not found. Run `billed init` to set up.");
    }

    Ok(())
}
