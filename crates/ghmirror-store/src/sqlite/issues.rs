//! Issue row scanning and the `UpsertIssue` / `LoadIssueList` /
//! `CurrentIssueNumbers` / `DeleteIssues` operations.

use ghmirror_core::{Issue, IssueState};
use rusqlite::{params, Connection, Row};

use crate::error::{Result, StoreError};
use crate::sqlite::datetime::{format_datetime, parse_datetime};
use crate::sqlite::store::SqliteStore;

const ISSUE_COLUMNS: &str =
    "number, title, body, author_login, state, created_at, updated_at, comment_count, html_url";

pub(crate) fn scan_issue(row: &Row) -> rusqlite::Result<Issue> {
    let state: String = row.get(4)?;
    Ok(Issue {
        number: row.get(0)?,
        title: row.get(1)?,
        body: row.get(2)?,
        author_login: row.get(3)?,
        state: if state == "closed" {
            IssueState::Closed
        } else {
            IssueState::Open
        },
        created_at: parse_datetime(&row.get::<_, String>(5)?),
        updated_at: parse_datetime(&row.get::<_, String>(6)?),
        comment_count: row.get::<_, i64>(7)? as u64,
        labels: Vec::new(),
        assignees: Vec::new(),
        html_url: row.get(8)?,
    })
}

pub(crate) fn upsert_issue_on_conn(conn: &Connection, issue: &Issue) -> Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO issues ({ISSUE_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(number) DO UPDATE SET
                title = excluded.title,
                body = excluded.body,
                author_login = excluded.author_login,
                state = excluded.state,
                created_at = excluded.created_at,
                updated_at = excluded.updated_at,
                comment_count = excluded.comment_count,
                html_url = excluded.html_url"
        ),
        params![
            issue.number as i64,
            issue.title,
            issue.body,
            issue.author_login,
            issue.state.as_str(),
            format_datetime(&issue.created_at),
            format_datetime(&issue.updated_at),
            issue.comment_count as i64,
            issue.html_url,
        ],
    )?;

    conn.execute(
        "DELETE FROM labels WHERE issue_number = ?1",
        params![issue.number as i64],
    )?;
    for label in &issue.labels {
        conn.execute(
            "INSERT INTO labels (issue_number, label) VALUES (?1, ?2)",
            params![issue.number as i64, label],
        )?;
    }

    conn.execute(
        "DELETE FROM assignees WHERE issue_number = ?1",
        params![issue.number as i64],
    )?;
    for assignee in &issue.assignees {
        conn.execute(
            "INSERT INTO assignees (issue_number, login) VALUES (?1, ?2)",
            params![issue.number as i64, assignee],
        )?;
    }

    Ok(())
}

fn load_labels_on_conn(conn: &Connection, number: u64) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT label FROM labels WHERE issue_number = ?1 ORDER BY label")?;
    let rows = stmt.query_map(params![number as i64], |row| row.get(0))?;
    Ok(rows.collect::<rusqlite::Result<Vec<String>>>()?)
}

fn load_assignees_on_conn(conn: &Connection, number: u64) -> Result<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT login FROM assignees WHERE issue_number = ?1 ORDER BY login")?;
    let rows = stmt.query_map(params![number as i64], |row| row.get(0))?;
    Ok(rows.collect::<rusqlite::Result<Vec<String>>>()?)
}

impl SqliteStore {
    pub(crate) fn upsert_issue_impl(&self, issue: &Issue) -> Result<()> {
        let mut conn = self.lock_conn()?;
        let tx = conn.unchecked_transaction().map_err(|e| StoreError::Transaction(e.to_string()))?;
        upsert_issue_on_conn(&tx, issue)?;
        tx.commit().map_err(|e| StoreError::Transaction(e.to_string()))?;
        Ok(())
    }

    pub(crate) fn load_issue_list_impl(&self) -> Result<Vec<Issue>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {ISSUE_COLUMNS} FROM issues ORDER BY updated_at DESC"
        ))?;
        let mut issues = stmt
            .query_map([], scan_issue)?
            .collect::<rusqlite::Result<Vec<Issue>>>()?;
        for issue in &mut issues {
            issue.labels = load_labels_on_conn(&conn, issue.number)?;
            issue.assignees = load_assignees_on_conn(&conn, issue.number)?;
        }
        Ok(issues)
    }

    pub(crate) fn current_issue_numbers_impl(&self) -> Result<Vec<u64>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare("SELECT number FROM issues")?;
        let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;
        Ok(rows
            .collect::<rusqlite::Result<Vec<i64>>>()?
            .into_iter()
            .map(|n| n as u64)
            .collect())
    }

    pub(crate) fn delete_issues_impl(&self, numbers: &[u64]) -> Result<()> {
        if numbers.is_empty() {
            return Ok(());
        }
        let mut conn = self.lock_conn()?;
        let tx = conn.unchecked_transaction().map_err(|e| StoreError::Transaction(e.to_string()))?;
        for number in numbers {
            tx.execute("DELETE FROM issues WHERE number = ?1", params![*number as i64])?;
        }
        tx.commit().map_err(|e| StoreError::Transaction(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample(number: u64) -> Issue {
        Issue {
            number,
            title: "Title".into(),
            body: "Body".into(),
            author_login: "octocat".into(),
            state: IssueState::Open,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            comment_count: 0,
            labels: vec!["bug".into(), "p1".into()],
            assignees: vec!["alice".into()],
            html_url: "https://github.com/o/r/issues/1".into(),
        }
    }

    #[test]
    fn upsert_then_load_round_trips_labels_and_assignees() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.upsert_issue_impl(&sample(1)).unwrap();
        let issues = store.load_issue_list_impl().unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].labels, vec!["bug", "p1"]);
        assert_eq!(issues[0].assignees, vec!["alice"]);
    }

    #[test]
    fn upsert_replaces_labels_wholesale() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.upsert_issue_impl(&sample(1)).unwrap();
        let mut updated = sample(1);
        updated.labels = vec!["wontfix".into()];
        store.upsert_issue_impl(&updated).unwrap();
        let issues = store.load_issue_list_impl().unwrap();
        assert_eq!(issues[0].labels, vec!["wontfix"]);
    }

    #[test]
    fn delete_issues_cascades_to_children() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.upsert_issue_impl(&sample(1)).unwrap();
        store.delete_issues_impl(&[1]).unwrap();
        let conn = store.lock_conn().unwrap();
        let label_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM labels", [], |r| r.get(0))
            .unwrap();
        assert_eq!(label_count, 0);
    }

    #[test]
    fn current_issue_numbers_reflects_store_contents() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.upsert_issue_impl(&sample(1)).unwrap();
        store.upsert_issue_impl(&sample(2)).unwrap();
        let mut numbers = store.current_issue_numbers_impl().unwrap();
        numbers.sort();
        assert_eq!(numbers, vec![1, 2]);
    }
}
