//! Ledger operations behind the chat intents.
//!
//! Each operation takes already-validated slot values, performs its storage
//! round-trip, and produces the final reply text. Storage errors propagate
//! to the dispatcher, which owns the user-facing apology.

use chrono::Utc;

use tally_core::TallyError;
use tally_storage::{BillRepository, CustomerRepository};

use crate::response::{self, render_table, Table};

/// Domain operations over the customer and bill repositories.
pub struct LedgerOps {
    customers: CustomerRepository,
    bills: BillRepository,
    bill_list_limit: u32,
}

impl LedgerOps {
    pub fn new(
        customers: CustomerRepository,
        bills: BillRepository,
        bill_list_limit: u32,
    ) -> Self {
        Self {
            customers,
            bills,
            bill_list_limit,
        }
    }

    /// The most recent bills as an HTML table, newest first.
    pub fn list_bills(&self) -> Result<String, TallyError> {
        let listings = self.bills.list_recent(self.bill_list_limit)?;
        if listings.is_empty() {
            return Ok("No bills found.".to_string());
        }

        let mut table = Table::new(vec!["Bill ID", "Customer Name", "Amount", "Date"]);
        for bill in &listings {
            table.push_row(vec![
                bill.bill_id.to_string(),
                bill.customer_name.clone(),
                response::format_amount(bill.total_amount),
                response::format_timestamp(bill.bill_date),
            ]);
        }
        Ok(render_table("Here are your latest bills:", &table))
    }

    /// Look up a customer case-insensitively and render their details.
    pub fn get_customer(&self, name: &str) -> Result<String, TallyError> {
        let Some(customer) = self.customers.find_by_name(name)? else {
            return Ok("Customer not found.".to_string());
        };

        let phone = customer
            .phone
            .unwrap_or_else(|| "not provided".to_string());

        let mut table = Table::new(vec!["Customer ID", "Name", "Phone"]);
        table.push_row(vec![
            customer.customer_id.to_string(),
            customer.name,
            phone,
        ]);
        Ok(render_table("Here are the customer details:", &table))
    }

    /// Record a bill, creating the customer row first if the exact name is
    /// unknown. The bill date is the operation time.
    pub fn add_bill(
        &self,
        customer_name: &str,
        total_amount: f64,
        payment_status: &str,
    ) -> Result<String, TallyError> {
        let customer_id = self.customers.find_or_create(customer_name)?;
        let bill_id = self.bills.insert(
            customer_id,
            total_amount,
            payment_status,
            Utc::now().timestamp(),
        )?;

        tracing::info!(bill_id, customer_id, total_amount, "Bill recorded");
        Ok(format!("New bill added successfully! Bill ID: {}", bill_id))
    }

    /// Register a customer unless the exact name already exists.
    pub fn add_customer(&self, name: &str, phone: &str) -> Result<String, TallyError> {
        let (customer_id, created) = self.customers.exists_or_insert(name, phone)?;
        if created {
            tracing::info!(customer_id, "Customer registered");
            Ok(format!(
                "New customer added successfully! Customer Name: {}",
                name
            ))
        } else {
            Ok(format!(
                "Customer already exists with Customer ID: {}",
                customer_id
            ))
        }
    }

    /// Update a customer's phone, looked up case-insensitively by name.
    pub fn update_phone(&self, name: &str, phone: &str) -> Result<String, TallyError> {
        let Some(customer) = self.customers.find_by_name(name)? else {
            return Ok(format!("Customer with name \"{}\" not found.", name));
        };

        self.customers.update_phone(customer.customer_id, phone)?;
        tracing::info!(customer_id = customer.customer_id, "Phone updated");
        Ok(format!("Phone number updated successfully for {}!", name))
    }
}
