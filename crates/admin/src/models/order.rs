//! Order domain type.

use chrono::NaiveDate;

use affiliate_crm_core::{AgentId, CustomerId, OrderId, OrderStatus, Platform};

/// An affiliate order placed on behalf of a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    /// Customer name at the time the order was created.
    pub customer_name: String,
    pub agent_id: AgentId,
    pub platform: Platform,
    pub product_name: String,
    pub product_url: String,
    pub affiliate_link: Option<String>,
    pub status: OrderStatus,
    pub created_at: NaiveDate,
}
