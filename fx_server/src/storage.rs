//! Quote persistence.
//!
//! `QuoteStore` exposes two bounded operations, `insert` and `get_latest`, each
//! governed by a `Deadline` supplied by the caller. Backends only implement the
//! unbounded primitives (`append`, `last`); deadline enforcement and the timeout
//! diagnostics live in the provided methods so every backend behaves the same.
//!
//! `SqliteQuoteStore` is the production backend. Rows carry soft-delete metadata
//! (`updated_at`, `deleted_at`); rows with `deleted_at` set are never returned.
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fx_common::{Deadline, NewQuote, Quote, QuoteError, Result};
use log::{debug, error, info, warn};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS quotes (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    code       TEXT    NOT NULL,
    bid        REAL    NOT NULL,
    created_at TEXT    NOT NULL,
    updated_at TEXT    NOT NULL,
    deleted_at TEXT
)
"#;

/// Storage of persisted quotes.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// Appends `quote` and returns the identifier assigned to it.
    async fn append(&self, quote: &NewQuote) -> Result<i64>;

    /// Returns the most recently appended quote, if any.
    async fn last(&self) -> Result<Option<Quote>>;

    /// Durably appends `quote` within `deadline`.
    async fn insert(&self, deadline: &Deadline, quote: &NewQuote) -> Result<()> {
        match deadline.run(self.append(quote)).await {
            Ok(id) => {
                debug!("Quote {} persisted ({} {})", id, quote.code, quote.bid);
                Ok(())
            }
            Err(e) if e.is_timeout() => {
                warn!(
                    "The insertion into the database exceeded {}ms",
                    deadline.budget().as_millis()
                );
                Err(e)
            }
            Err(e) => {
                error!("Failed to persist quote: {}", e);
                Err(e)
            }
        }
    }

    /// Returns the latest persisted quote within `deadline`.
    ///
    /// An empty store is an error, not a default value.
    async fn get_latest(&self, deadline: &Deadline) -> Result<Quote> {
        match deadline.run(self.last()).await {
            Ok(Some(quote)) => Ok(quote),
            Ok(None) => Err(QuoteError::Storage(
                "no quote has been persisted yet".to_string(),
            )),
            Err(e) if e.is_timeout() => {
                warn!(
                    "The database query exceeded {}ms",
                    deadline.budget().as_millis()
                );
                Err(e)
            }
            Err(e) => {
                error!("Failed to read the latest quote: {}", e);
                Err(e)
            }
        }
    }
}

#[derive(sqlx::FromRow)]
struct QuoteRow {
    id: i64,
    code: String,
    bid: f64,
    created_at: DateTime<Utc>,
}

impl From<QuoteRow> for Quote {
    fn from(row: QuoteRow) -> Self {
        Quote {
            id: row.id,
            code: row.code,
            bid: row.bid,
            created_at: row.created_at,
        }
    }
}

/// SQLite-backed quote store.
#[derive(Debug, Clone)]
pub struct SqliteQuoteStore {
    pool: SqlitePool,
}

impl SqliteQuoteStore {
    /// Opens the database at `url` (creating the file if missing) and applies the schema.
    ///
    /// In-memory databases are pinned to a single long-lived connection so every
    /// query sees the same data.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(storage_error)?
            .create_if_missing(true);

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(storage_error)?;
        let store = Self::new(pool);
        store.migrate().await?;
        info!("Quote database ready at {}", url);
        Ok(store)
    }

    /// Wraps an existing pool. The schema is not applied.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates the `quotes` table if it does not exist yet.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(())
    }
}

#[async_trait]
impl QuoteStore for SqliteQuoteStore {
    async fn append(&self, quote: &NewQuote) -> Result<i64> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO quotes (code, bid, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&quote.code)
        .bind(quote.bid)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(result.last_insert_rowid())
    }

    async fn last(&self) -> Result<Option<Quote>> {
        let row: Option<QuoteRow> = sqlx::query_as(
            r#"
            SELECT id, code, bid, created_at
            FROM quotes
            WHERE deleted_at IS NULL
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.map(Quote::from))
    }
}

fn storage_error(error: sqlx::Error) -> QuoteError {
    QuoteError::Storage(error.to_string())
}
