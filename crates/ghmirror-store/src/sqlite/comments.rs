//! `UpsertComment` / `ReplaceCommentsForIssue` / `LoadComments`.

use ghmirror_core::Comment;
use rusqlite::{params, Connection, Row};

use crate::error::{Result, StoreError};
use crate::sqlite::datetime::{format_datetime, parse_datetime};
use crate::sqlite::store::SqliteStore;

const COMMENT_COLUMNS: &str = "id, issue_number, body, author_login, created_at, updated_at";

fn scan_comment(row: &Row) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get::<_, i64>(0)? as u64,
        issue_number: row.get::<_, i64>(1)? as u64,
        body: row.get(2)?,
        author_login: row.get(3)?,
        created_at: parse_datetime(&row.get::<_, String>(4)?),
        updated_at: parse_datetime(&row.get::<_, String>(5)?),
    })
}

fn upsert_comment_on_conn(conn: &Connection, comment: &Comment) -> Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO comments ({COMMENT_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(id) DO UPDATE SET
                body = excluded.body,
                author_login = excluded.author_login,
                created_at = excluded.created_at,
                updated_at = excluded.updated_at"
        ),
        params![
            comment.id as i64,
            comment.issue_number as i64,
            comment.body,
            comment.author_login,
            format_datetime(&comment.created_at),
            format_datetime(&comment.updated_at),
        ],
    )?;
    Ok(())
}

impl SqliteStore {
    pub(crate) fn upsert_comment_impl(&self, comment: &Comment) -> Result<()> {
        let conn = self.lock_conn()?;
        upsert_comment_on_conn(&conn, comment)
    }

    /// Replaces every comment belonging to `issue_number` with `comments`,
    /// in one transaction -- the canonical drill-down refresh operation.
    pub(crate) fn replace_comments_for_issue_impl(
        &self,
        issue_number: u64,
        comments: &[Comment],
    ) -> Result<()> {
        let mut conn = self.lock_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| StoreError::Transaction(e.to_string()))?;
        tx.execute(
            "DELETE FROM comments WHERE issue_number = ?1",
            params![issue_number as i64],
        )?;
        for comment in comments {
            upsert_comment_on_conn(&tx, comment)?;
        }
        tx.commit().map_err(|e| StoreError::Transaction(e.to_string()))?;
        Ok(())
    }

    pub(crate) fn load_comments_impl(&self, issue_number: u64) -> Result<Vec<Comment>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE issue_number = ?1 ORDER BY created_at ASC"
        ))?;
        Ok(stmt
            .query_map(params![issue_number as i64], scan_comment)?
            .collect::<rusqlite::Result<Vec<Comment>>>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghmirror_core::{Issue, IssueState};
    use chrono::Utc;

    fn parent_issue(number: u64) -> Issue {
        Issue {
            number,
            title: "t".into(),
            body: "b".into(),
            author_login: "o".into(),
            state: IssueState::Open,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            comment_count: 0,
            labels: vec![],
            assignees: vec![],
            html_url: String::new(),
        }
    }

    fn comment(id: u64, issue_number: u64, body: &str) -> Comment {
        Comment {
            id,
            issue_number,
            body: body.into(),
            author_login: "alice".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn replace_comments_for_issue_is_wholesale() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.upsert_issue_impl(&parent_issue(1)).unwrap();
        store
            .replace_comments_for_issue_impl(1, &[comment(1, 1, "first"), comment(2, 1, "second")])
            .unwrap();
        store
            .replace_comments_for_issue_impl(1, &[comment(3, 1, "only one now")])
            .unwrap();
        let comments = store.load_comments_impl(1).unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].body, "only one now");
    }

    #[test]
    fn load_comments_is_chronological() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.upsert_issue_impl(&parent_issue(1)).unwrap();
        let mut c1 = comment(1, 1, "older");
        c1.created_at = Utc::now() - chrono::Duration::hours(1);
        let c2 = comment(2, 1, "newer");
        store
            .replace_comments_for_issue_impl(1, &[c2.clone(), c1.clone()])
            .unwrap();
        let comments = store.load_comments_impl(1).unwrap();
        assert_eq!(comments[0].body, "older");
        assert_eq!(comments[1].body, "newer");
    }

    #[test]
    fn comments_cascade_on_issue_delete() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.upsert_issue_impl(&parent_issue(1)).unwrap();
        store.replace_comments_for_issue_impl(1, &[comment(1, 1, "x")]).unwrap();
        store.delete_issues_impl(&[1]).unwrap();
        assert!(store.load_comments_impl(1).unwrap().is_empty());
    }
}
