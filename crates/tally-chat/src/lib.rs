//! Tally chat crate - message dispatch and ledger operations.
//!
//! The [`ChatDispatcher`] drives one message through the pipeline:
//! classify, extract slots, run the matching ledger operation, format the
//! reply. Dispatch is stateless per message; all persistent state lives in
//! the storage repositories held by [`LedgerOps`].

pub mod dispatcher;
pub mod error;
pub mod operations;
pub mod response;

pub use dispatcher::ChatDispatcher;
pub use error::ChatError;
pub use operations::LedgerOps;
pub use response::{render_table, Table};
