/// Key-value queries. Values are stored as JSON text.
use anyhow::{Context, Result};
use chrono::Local;
use rusqlite::Connection;
use serde::{Serialize, de::DeserializeOwned};

pub fn read_value(key: &str, conn: &Connection) -> Result<Option<String>> {
    let mut stmt = conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
    let mut rows = stmt.query([key])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row.get(0)?))
    } else {
        Ok(None)
    }
}

pub fn write_value(key: &str, value: &str, conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        (key, value, Local::now().to_rfc3339()),
    )?;
    Ok(())
}

pub fn delete_value(key: &str, conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
    Ok(())
}

/// Reads and decodes a JSON value. A missing key is `Ok(None)`, a value that
/// does not decode is an error.
pub fn read_json<T: DeserializeOwned>(key: &str, conn: &Connection) -> Result<Option<T>> {
    match read_value(key, conn)? {
        Some(raw) => {
            let value = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to decode stored value for '{key}'"))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

pub fn write_json<T: Serialize + ?Sized>(key: &str, value: &T, conn: &Connection) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    write_value(key, &raw, conn)
}
