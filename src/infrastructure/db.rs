use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbErr, RuntimeErr, SqlxSqliteConnector, Statement,
};
use sqlx::ConnectOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::cmp::Ordering;
use std::str::FromStr;

/// Collation used by the genre name uniqueness index
pub const UNICODE_NOCASE: &str = "unicode_nocase";

/// Compare two strings after lowercasing every character, in any script.
/// SQLite's own `lower()` and `NOCASE` only fold ASCII.
pub fn unicode_nocase(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| DbErr::Conn(RuntimeErr::SqlxError(e)))?
        // Restrict-on-delete relies on SQLite enforcing foreign keys
        .foreign_keys(true)
        .collation(UNICODE_NOCASE, unicode_nocase)
        .disable_statement_logging();

    let mut pool = SqlitePoolOptions::new();
    // Every connection to ":memory:" is a separate database
    if database_url.contains(":memory:") {
        pool = pool
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }
    let pool = pool
        .connect_with(options)
        .await
        .map_err(|e| DbErr::Conn(RuntimeErr::SqlxError(e)))?;

    let db = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    tracing::debug!("Database ready at {}", database_url);

    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Create authors table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS authors (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL CHECK (length(first_name) <= 100),
            last_name TEXT NOT NULL CHECK (length(last_name) <= 100),
            date_of_birth TEXT,
            date_of_death TEXT
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS idx_authors_name ON authors(last_name, first_name)"
            .to_owned(),
    ))
    .await?;

    // Create genres table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS genres (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE CHECK (length(name) <= 200)
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Older databases built this index on lower(name), which misses "Драма"/"драма"
    let legacy_index = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            "SELECT sql FROM sqlite_master WHERE type = 'index' AND name = 'genre_name_case_insensitive_unique' AND sql LIKE '%lower(name)%'"
                .to_owned(),
        ))
        .await?;
    if legacy_index.is_some() {
        tracing::info!("Rebuilding genre name index with {}", UNICODE_NOCASE);
        db.execute(Statement::from_string(
            db.get_database_backend(),
            "DROP INDEX genre_name_case_insensitive_unique".to_owned(),
        ))
        .await?;
    }

    // "Drama" and "drama" must collide, as must "Épopée" and "épopée"
    db.execute(Statement::from_string(
        db.get_database_backend(),
        format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS genre_name_case_insensitive_unique ON genres(name COLLATE {})",
            UNICODE_NOCASE
        ),
    ))
    .await?;

    // Create books table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL CHECK (length(title) <= 200),
            author_id INTEGER,
            summary TEXT NOT NULL DEFAULT '' CHECK (length(summary) <= 1000),
            isbn TEXT NOT NULL UNIQUE CHECK (length(isbn) <= 13),
            FOREIGN KEY (author_id) REFERENCES authors(id)
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS idx_books_author_id ON books(author_id)".to_owned(),
    ))
    .await?;

    // Create book_genres junction table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS book_genres (
            book_id INTEGER NOT NULL,
            genre_id INTEGER NOT NULL,
            PRIMARY KEY (book_id, genre_id),
            FOREIGN KEY (book_id) REFERENCES books(id) ON DELETE CASCADE,
            FOREIGN KEY (genre_id) REFERENCES genres(id) ON DELETE CASCADE
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Create book_instances table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS book_instances (
            id BLOB PRIMARY KEY NOT NULL,
            book_id INTEGER,
            imprint TEXT NOT NULL CHECK (length(imprint) <= 200),
            due_back TEXT,
            status TEXT NOT NULL DEFAULT 'm' CHECK (status IN ('m', 'o', 'a', 'r')),
            FOREIGN KEY (book_id) REFERENCES books(id)
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS idx_book_instances_book_id ON book_instances(book_id)"
            .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS idx_book_instances_status ON book_instances(status)"
            .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS idx_book_instances_due_back ON book_instances(due_back)"
            .to_owned(),
    ))
    .await?;

    Ok(())
}
