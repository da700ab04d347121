/// Database module: the key-value table every store persists into.
mod kv;
mod migrations;

use std::path::{Path, PathBuf};

use anyhow::Result;
use rusqlite::Connection;

pub use kv::{delete_value, read_json, write_json};
#[cfg(test)]
pub use kv::{read_value, write_value};

/// Opens (or creates) the SQLite database and runs migrations.
pub fn init(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    migrations::run_migrations(&conn)?;
    log::info!("opened database at {}", db_path.display());
    Ok(conn)
}

/// Opens a throwaway database, used by tests.
#[cfg(test)]
pub fn init_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

/// Directory holding the database and the log file.
/// Falls back to the working directory when no data dir is found.
pub fn data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let notime_dir = data_dir.join("notime");
        std::fs::create_dir_all(&notime_dir).ok();
        notime_dir
    } else {
        PathBuf::from(".")
    }
}

/// Returns the default database path inside the user's data directory.
pub fn default_db_path() -> PathBuf {
    data_dir().join("notime.db")
}
