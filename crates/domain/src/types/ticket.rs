//! Closed helpdesk tickets

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One closed ticket with the hours logged against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketDetail {
    pub ticket_id: i64,
    pub company_account_number: String,
    pub subject: Option<String>,
    pub last_updated_at: DateTime<Utc>,
    pub total_hours_spent: Option<f64>,
}

impl TicketDetail {
    pub fn hours(&self) -> f64 {
        self.total_hours_spent.unwrap_or(0.0)
    }
}
