//! Database schema migrations.
//!
//! Applies the initial schema: customers, bills, and the schema_migrations
//! tracking table.

use rusqlite::Connection;
use tracing::info;

use tally_core::TallyError;

/// Run all pending database migrations.
///
/// Currently implements the initial schema (version 1). Future migrations
/// can be added by checking the current version and applying incremental changes.
pub fn run_migrations(conn: &Connection) -> Result<(), TallyError> {
    // Create the migrations tracking table first.
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version     INTEGER PRIMARY KEY NOT NULL,
            name        TEXT NOT NULL,
            applied_at  INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );",
    )
    .map_err(|e| TallyError::Storage(format!("Failed to create migrations table: {}", e)))?;

    let current_version: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .map_err(|e| TallyError::Storage(format!("Failed to query migration version: {}", e)))?;

    if current_version < 1 {
        apply_v1(conn)?;
        info!("Applied migration v1: initial_schema");
    }

    Ok(())
}

/// Version 1: Initial schema.
fn apply_v1(conn: &Connection) -> Result<(), TallyError> {
    conn.execute_batch(
        "
        -- Customer directory. Names are not unique; lookups resolve the
        -- lowest customer_id case-insensitively.
        CREATE TABLE IF NOT EXISTS customers (
            customer_id     INTEGER PRIMARY KEY AUTOINCREMENT,
            name            TEXT NOT NULL,
            phone           TEXT,
            created_at      INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_customers_name
            ON customers (name COLLATE NOCASE);

        -- Bills, always attached to a customer.
        CREATE TABLE IF NOT EXISTS bills (
            bill_id         INTEGER PRIMARY KEY AUTOINCREMENT,
            bill_date       INTEGER NOT NULL,
            customer_id     INTEGER NOT NULL,
            total_amount    REAL NOT NULL CHECK (total_amount >= 0),
            payment_status  TEXT NOT NULL,
            created_at      INTEGER NOT NULL DEFAULT (strftime('%s', 'now')),
            FOREIGN KEY (customer_id) REFERENCES customers(customer_id)
        );

        CREATE INDEX IF NOT EXISTS idx_bills_customer
            ON bills (customer_id);

        CREATE INDEX IF NOT EXISTS idx_bills_date
            ON bills (bill_date DESC);

        -- Record migration.
        INSERT OR IGNORE INTO schema_migrations (version, name) VALUES (1, 'initial_schema');
        ",
    )
    .map_err(|e| TallyError::Storage(format!("Failed to apply migration v1: {}", e)))?;

    Ok(())
}
