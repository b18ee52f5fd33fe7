use contracts::domain::a001_ticket::aggregate::Ticket;
use contracts::domain::a002_comment::aggregate::Comment;
use contracts::domain::common::AggregateRoot;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
};
use std::path::Path;

/// Build a `sqlite://` URL for a database file, creating its directory.
pub fn sqlite_url(db_file: &Path) -> anyhow::Result<String> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    Ok(format!("sqlite://{}{}?mode=rwc", prefix, normalized))
}

/// Open the connection pool and make sure the schema exists.
///
/// The returned handle is shared by every request; each operation opens its
/// own transaction on it.
pub async fn initialize_database(
    db_url: &str,
    sql_logging: bool,
) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(db_url.to_owned());
    options.sqlx_logging(sql_logging);
    // sqlx turns on `PRAGMA foreign_keys` for every pooled SQLite connection
    let conn = Database::connect(options).await?;

    ensure_schema(&conn).await?;
    Ok(conn)
}

async fn ensure_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    let ticket_table = Ticket::full_name();
    let comment_table = Comment::full_name();

    let create_ticket_table_sql = format!(
        r#"
        CREATE TABLE {ticket_table} (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            description TEXT,
            assignee TEXT,
            priority TEXT NOT NULL DEFAULT 'MEDIUM',
            status TEXT NOT NULL DEFAULT 'TODO',
            due_date TEXT,
            created_at TEXT NOT NULL,
            closed_at TEXT
        );
        "#
    );
    ensure_table(conn, &ticket_table, &create_ticket_table_sql).await?;

    let create_comment_table_sql = format!(
        r#"
        CREATE TABLE {comment_table} (
            id TEXT PRIMARY KEY NOT NULL,
            ticket_id TEXT NOT NULL REFERENCES {ticket_table}(id) ON DELETE CASCADE,
            author TEXT NOT NULL,
            content TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#
    );
    ensure_table(conn, &comment_table, &create_comment_table_sql).await?;

    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        format!(
            "CREATE INDEX IF NOT EXISTS idx_{comment_table}_ticket_id \
             ON {comment_table}(ticket_id);"
        ),
    ))
    .await?;

    Ok(())
}

async fn ensure_table(
    conn: &DatabaseConnection,
    name: &str,
    create_sql: &str,
) -> anyhow::Result<()> {
    let existing = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type='table' AND name = ?;",
            [name.into()],
        ))
        .await?;

    if existing.is_empty() {
        tracing::info!("Creating {} table", name);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_sql.to_string(),
        ))
        .await?;
    } else {
        tracing::debug!("Table {} already exists", name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_url_for_absolute_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested").join("app.db");
        let url = sqlite_url(&file).unwrap();
        assert!(url.starts_with("sqlite://"));
        assert!(url.ends_with("app.db?mode=rwc"));
        assert!(dir.path().join("nested").is_dir());
    }

    #[tokio::test]
    async fn test_schema_bootstrap_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let url = sqlite_url(&dir.path().join("app.db")).unwrap();
        let conn = initialize_database(&url, false).await.unwrap();
        ensure_schema(&conn).await.unwrap();

        let tables = conn
            .query_all(Statement::from_string(
                DatabaseBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type='table' ORDER BY name;".to_string(),
            ))
            .await
            .unwrap();
        let names: Vec<String> = tables
            .iter()
            .map(|row| row.try_get("", "name").unwrap())
            .collect();
        assert_eq!(names, vec!["a001_ticket", "a002_comment"]);
    }
}
