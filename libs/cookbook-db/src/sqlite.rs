//! SQLite DSN handling: directory preparation and typed connect options.

use std::{io, path::PathBuf, str::FromStr, time::Duration};

use sqlx::sqlite::SqliteConnectOptions;

/// Ensure the parent directory of a file-backed SQLite DSN exists.
///
/// In-memory DSNs are returned untouched.
pub(crate) fn prepare_sqlite_path(dsn: &str, create_dirs: bool) -> io::Result<String> {
    if !create_dirs {
        return Ok(dsn.to_string());
    }
    if let Some(parent) = file_path_from_dsn(dsn).as_deref().and_then(|p| p.parent()) {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(dsn.to_string())
}

pub(crate) fn connect_options(
    dsn: &str,
    busy_timeout: Duration,
) -> Result<SqliteConnectOptions, sqlx::Error> {
    Ok(SqliteConnectOptions::from_str(dsn)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(busy_timeout))
}

fn is_memory(dsn: &str) -> bool {
    dsn.contains(":memory:") || dsn.contains("mode=memory")
}

/// Extract the database file path from a SQLite DSN.
///
/// Accepts `sqlite:///abs/path.db`, `sqlite://rel/path.db` and `sqlite:rel/path.db`.
fn file_path_from_dsn(dsn: &str) -> Option<PathBuf> {
    if is_memory(dsn) {
        return None;
    }
    let rest = dsn.strip_prefix("sqlite:")?;
    let rest = rest.strip_prefix("//").unwrap_or(rest);
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}
