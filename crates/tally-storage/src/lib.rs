//! Tally storage crate - SQLite persistence for the billing ledger.
//!
//! A single rusqlite connection behind a Mutex, versioned migrations, and
//! repositories for customers and bills. All access goes through
//! [`Database::with_conn`]; repositories share the database via `Arc`.

pub mod db;
pub mod migrations;
pub mod repository;

pub use db::Database;
pub use repository::{BillRepository, CustomerRepository};
