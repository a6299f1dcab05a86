//! `GetLastSync` / `SetLastSync` -- the sync metadata record.

use chrono::{DateTime, Utc};
use rusqlite::params;

use crate::error::Result;
use crate::sqlite::datetime::{format_datetime, parse_datetime};
use crate::sqlite::store::SqliteStore;

const LAST_SYNC_KEY: &str = "last_sync";

impl SqliteStore {
    /// Returns the zero instant if `last_sync` has never been set.
    pub(crate) fn get_last_sync_impl(&self) -> Result<DateTime<Utc>> {
        let conn = self.lock_conn()?;
        let value: std::result::Result<String, _> = conn.query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            params![LAST_SYNC_KEY],
            |row| row.get(0),
        );
        Ok(match value {
            Ok(s) => parse_datetime(&s),
            Err(rusqlite::Error::QueryReturnedNoRows) => DateTime::<Utc>::UNIX_EPOCH,
            Err(e) => return Err(e.into()),
        })
    }

    pub(crate) fn set_last_sync_impl(&self, t: DateTime<Utc>) -> Result<()> {
        let conn = self.lock_conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
            params![LAST_SYNC_KEY, format_datetime(&t)],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_last_sync_is_zero_instant() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.get_last_sync_impl().unwrap(), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn set_then_get_round_trips() {
        let store = SqliteStore::open_in_memory().unwrap();
        let t = Utc::now();
        store.set_last_sync_impl(t).unwrap();
        let got = store.get_last_sync_impl().unwrap();
        assert_eq!(got.timestamp_millis(), t.timestamp_millis());
    }
}
