//! DDL statements and migrations for the mirror store's SQLite schema.
//!
//! Timestamps are stored as TEXT in RFC3339 format (SQLite has no native
//! datetime type).

/// Current schema version. Bumped whenever DDL or migrations change.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Core DDL statements executed during `init_schema`.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    // -- Issues table --------------------------------------------------------
    r#"
    CREATE TABLE IF NOT EXISTS issues (
        number         INTEGER PRIMARY KEY,
        title          TEXT NOT NULL,
        body           TEXT NOT NULL DEFAULT '',
        author_login   TEXT NOT NULL DEFAULT '',
        state          TEXT NOT NULL DEFAULT 'open',
        created_at     TEXT NOT NULL,
        updated_at     TEXT NOT NULL,
        comment_count  INTEGER NOT NULL DEFAULT 0,
        html_url       TEXT NOT NULL DEFAULT ''
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_issues_updated_at ON issues(updated_at)",
    "CREATE INDEX IF NOT EXISTS idx_issues_state ON issues(state)",
    // -- Labels table (replaced wholesale on upsert) -------------------------
    r#"
    CREATE TABLE IF NOT EXISTS labels (
        issue_number INTEGER NOT NULL,
        label        TEXT NOT NULL,
        PRIMARY KEY (issue_number, label),
        FOREIGN KEY (issue_number) REFERENCES issues(number) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_labels_label ON labels(label)",
    // -- Assignees table (replaced wholesale on upsert) ----------------------
    r#"
    CREATE TABLE IF NOT EXISTS assignees (
        issue_number INTEGER NOT NULL,
        login        TEXT NOT NULL,
        PRIMARY KEY (issue_number, login),
        FOREIGN KEY (issue_number) REFERENCES issues(number) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_assignees_login ON assignees(login)",
    // -- Comments table -------------------------------------------------------
    r#"
    CREATE TABLE IF NOT EXISTS comments (
        id           INTEGER PRIMARY KEY,
        issue_number INTEGER NOT NULL,
        body         TEXT NOT NULL DEFAULT '',
        author_login TEXT NOT NULL DEFAULT '',
        created_at   TEXT NOT NULL,
        updated_at   TEXT NOT NULL,
        FOREIGN KEY (issue_number) REFERENCES issues(number) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_comments_issue ON comments(issue_number)",
    "CREATE INDEX IF NOT EXISTS idx_comments_created_at ON comments(created_at)",
    // -- Config table (schema bookkeeping) ------------------------------------
    r#"
    CREATE TABLE IF NOT EXISTS config (
        key   TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )
    "#,
    // -- Metadata table (sync metadata, e.g. last_sync) -----------------------
    r#"
    CREATE TABLE IF NOT EXISTS metadata (
        key   TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )
    "#,
];

/// Default configuration values inserted on first init.
pub const DEFAULT_CONFIG: &[(&str, &str)] = &[];

/// Schema migrations applied after initial DDL.
///
/// Each migration is a `(name, sql)` pair, tracked in `metadata` under
/// `migration:<name>` so it runs at most once.
pub const MIGRATIONS: &[(&str, &str)] = &[
    // Future migrations go here, e.g.:
    // ("001_add_foo_column", "ALTER TABLE issues ADD COLUMN foo TEXT DEFAULT ''"),
];
