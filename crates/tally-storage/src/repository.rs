//! Repository implementations for SQLite-backed persistence.
//!
//! Provides CustomerRepository and BillRepository that operate on the
//! Database struct using raw SQL. Customer names are not unique; lookups
//! are case-insensitive and resolve to the lowest customer_id, so repeated
//! conversational references to "John Doe" always land on the same row.

use std::sync::Arc;

use rusqlite::OptionalExtension;

use tally_core::{BillListing, Customer, TallyError};

use crate::db::Database;

/// Repository for customer rows.
pub struct CustomerRepository {
    db: Arc<Database>,
}

impl CustomerRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Find a customer by name, case-insensitively.
    ///
    /// When several rows share a name, the earliest (lowest customer_id)
    /// wins.
    pub fn find_by_name(&self, name: &str) -> Result<Option<Customer>, TallyError> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT customer_id, name, phone FROM customers
                 WHERE name = ?1 COLLATE NOCASE
                 ORDER BY customer_id ASC
                 LIMIT 1",
                rusqlite::params![name],
                |row| {
                    Ok(Customer {
                        customer_id: row.get(0)?,
                        name: row.get(1)?,
                        phone: row.get(2)?,
                    })
                },
            )
            .optional()
            .map_err(|e| TallyError::Storage(format!("Failed to look up customer: {}", e)))
        })
    }

    /// Insert a new customer and return its id.
    pub fn insert(&self, name: &str, phone: Option<&str>) -> Result<i64, TallyError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO customers (name, phone) VALUES (?1, ?2)",
                rusqlite::params![name, phone],
            )
            .map_err(|e| TallyError::Storage(format!("Failed to insert customer: {}", e)))?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Return the id for a named customer, creating the row if absent.
    ///
    /// The match is case-sensitive and exact. Lookup and insert run inside
    /// one transaction so two bills for the same new name cannot create two
    /// customer rows.
    pub fn find_or_create(&self, name: &str) -> Result<i64, TallyError> {
        self.db.with_conn(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| TallyError::Storage(format!("Failed to start transaction: {}", e)))?;

            let existing: Option<i64> = tx
                .query_row(
                    "SELECT customer_id FROM customers
                     WHERE name = ?1
                     ORDER BY customer_id ASC
                     LIMIT 1",
                    rusqlite::params![name],
                    |row| row.get(0),
                )
                .optional()
                .map_err(|e| TallyError::Storage(format!("Failed to look up customer: {}", e)))?;

            let id = match existing {
                Some(id) => id,
                None => {
                    tx.execute(
                        "INSERT INTO customers (name) VALUES (?1)",
                        rusqlite::params![name],
                    )
                    .map_err(|e| {
                        TallyError::Storage(format!("Failed to insert customer: {}", e))
                    })?;
                    tx.last_insert_rowid()
                }
            };

            tx.commit()
                .map_err(|e| TallyError::Storage(format!("Failed to commit: {}", e)))?;
            Ok(id)
        })
    }

    /// Insert a customer unless one with the exact same name already exists.
    ///
    /// Returns the id plus whether a new row was created.
    pub fn exists_or_insert(
        &self,
        name: &str,
        phone: &str,
    ) -> Result<(i64, bool), TallyError> {
        self.db.with_conn(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| TallyError::Storage(format!("Failed to start transaction: {}", e)))?;

            let existing: Option<i64> = tx
                .query_row(
                    "SELECT customer_id FROM customers
                     WHERE name = ?1
                     ORDER BY customer_id ASC
                     LIMIT 1",
                    rusqlite::params![name],
                    |row| row.get(0),
                )
                .optional()
                .map_err(|e| TallyError::Storage(format!("Failed to look up customer: {}", e)))?;

            let result = match existing {
                Some(id) => (id, false),
                None => {
                    tx.execute(
                        "INSERT INTO customers (name, phone) VALUES (?1, ?2)",
                        rusqlite::params![name, phone],
                    )
                    .map_err(|e| {
                        TallyError::Storage(format!("Failed to insert customer: {}", e))
                    })?;
                    (tx.last_insert_rowid(), true)
                }
            };

            tx.commit()
                .map_err(|e| TallyError::Storage(format!("Failed to commit: {}", e)))?;
            Ok(result)
        })
    }

    /// Update a customer's phone number. Returns the number of rows changed.
    pub fn update_phone(&self, customer_id: i64, phone: &str) -> Result<usize, TallyError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "UPDATE customers SET phone = ?1 WHERE customer_id = ?2",
                rusqlite::params![phone, customer_id],
            )
            .map_err(|e| TallyError::Storage(format!("Failed to update phone: {}", e)))
        })
    }
}

/// Repository for bill rows.
pub struct BillRepository {
    db: Arc<Database>,
}

impl BillRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert a bill and return its id.
    pub fn insert(
        &self,
        customer_id: i64,
        total_amount: f64,
        payment_status: &str,
        bill_date: i64,
    ) -> Result<i64, TallyError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO bills (bill_date, customer_id, total_amount, payment_status)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![bill_date, customer_id, total_amount, payment_status],
            )
            .map_err(|e| TallyError::Storage(format!("Failed to insert bill: {}", e)))?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// The most recently created bills, newest first, joined with their
    /// customer names.
    pub fn list_recent(&self, limit: u32) -> Result<Vec<BillListing>, TallyError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT b.bill_id, c.name, b.total_amount, b.bill_date
                     FROM bills b
                     JOIN customers c ON c.customer_id = b.customer_id
                     ORDER BY b.bill_id DESC
                     LIMIT ?1",
                )
                .map_err(|e| TallyError::Storage(e.to_string()))?;

            let rows = stmt
                .query_map(rusqlite::params![limit], |row| {
                    Ok(BillListing {
                        bill_id: row.get(0)?,
                        customer_name: row.get(1)?,
                        total_amount: row.get(2)?,
                        bill_date: row.get(3)?,
                    })
                })
                .map_err(|e| TallyError::Storage(e.to_string()))?;

            let mut listings = Vec::new();
            for row in rows {
                listings.push(row.map_err(|e| TallyError::Storage(e.to_string()))?);
            }
            Ok(listings)
        })
    }
}
