//! Reply formatting.
//!
//! Read operations produce a structured [`Table`]; rendering it to the
//! inline HTML the chat client displays is a separate step, so the data
//! shape stays testable without string matching.

use chrono::{Local, TimeZone};

/// A tabular reply body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<&'static str>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Render a lead-in line plus an inline HTML table.
pub fn render_table(lead: &str, table: &Table) -> String {
    let mut html = String::new();
    html.push_str(lead);
    html.push_str("<br>");
    html.push_str("<table style=\"width: 100%; border-collapse: collapse;\"><thead><tr>");
    for column in &table.columns {
        html.push_str("<th>");
        html.push_str(column);
        html.push_str("</th>");
    }
    html.push_str("</tr></thead><tbody>");
    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str("<td>");
            html.push_str(cell);
            html.push_str("</td>");
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

/// Epoch seconds to a local human-readable timestamp.
///
/// An out-of-range timestamp renders as a dash rather than failing the
/// whole reply.
pub fn format_timestamp(epoch_secs: i64) -> String {
    match Local.timestamp_opt(epoch_secs, 0).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

/// Bill amounts keep their natural decimal form ("150.5", "200").
pub fn format_amount(amount: f64) -> String {
    format!("{}", amount)
}
