//! Order repository.

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use affiliate_crm_core::{AgentId, CustomerId, OrderId, OrderStatus, Platform};

use super::customers::{NewCustomer, insert_customer};
use super::{CrmData, RepositoryError};
use crate::models::Order;

/// The customer an order is placed for.
#[derive(Debug, Clone)]
pub enum OrderCustomer {
    /// A customer already assigned to the ordering agent.
    Existing(CustomerId),
    /// A customer created together with the order.
    New(NewCustomer),
}

/// A validated order ready to be saved.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub customer: OrderCustomer,
    pub platform: Platform,
    pub product_name: String,
    pub product_url: String,
    pub affiliate_link: Option<String>,
    pub status: OrderStatus,
}

/// Order totals shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderStats {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub completed: usize,
}

impl OrderStats {
    /// Completed orders as a whole percentage of all orders (0 when empty).
    #[must_use]
    pub fn completion_rate(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let rate = self.completed * 100 / self.total;
        u32::try_from(rate).unwrap_or(100)
    }
}

/// Repository for order operations.
pub struct OrderRepository<'a> {
    data: &'a RwLock<CrmData>,
}

impl<'a> OrderRepository<'a> {
    /// Create a new repository over the shared data set.
    #[must_use]
    pub const fn new(data: &'a RwLock<CrmData>) -> Self {
        Self { data }
    }

    /// Up to `limit` newest orders, optionally only those of one agent.
    pub async fn recent(&self, agent: Option<&AgentId>, limit: usize) -> Vec<Order> {
        let data = self.data.read().await;
        data.orders
            .iter()
            .filter(|o| agent.is_none_or(|a| &o.agent_id == a))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Status totals, optionally only for one agent.
    pub async fn stats(&self, agent: Option<&AgentId>) -> OrderStats {
        let data = self.data.read().await;
        data.orders
            .iter()
            .filter(|o| agent.is_none_or(|a| &o.agent_id == a))
            .fold(OrderStats::default(), |mut stats, order| {
                stats.total += 1;
                match order.status {
                    OrderStatus::Pending => stats.pending += 1,
                    OrderStatus::Confirmed => stats.confirmed += 1,
                    OrderStatus::Completed => stats.completed += 1,
                }
                stats
            })
    }

    /// Save an order placed by `agent`.
    ///
    /// A new customer is created first (pending, assigned to `agent`). Both
    /// records are written under one lock.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown existing customer
    /// and `RepositoryError::NotAssigned` if it belongs to another agent.
    pub async fn create(&self, agent: &AgentId, draft: OrderDraft) -> Result<Order, RepositoryError> {
        let mut data = self.data.write().await;

        let customer = match draft.customer {
            OrderCustomer::Existing(id) => {
                let customer = data
                    .customers
                    .iter()
                    .find(|c| c.id == id)
                    .ok_or_else(|| RepositoryError::customer_not_found(&id))?;
                if !customer.is_assigned_to(agent) {
                    return Err(RepositoryError::NotAssigned {
                        customer: id,
                        agent: agent.clone(),
                    });
                }
                customer.clone()
            }
            OrderCustomer::New(new) => insert_customer(&mut data, new, agent),
        };

        let order = Order {
            id: OrderId::new(format!("order-{}", Uuid::new_v4().simple())),
            customer_id: customer.id,
            customer_name: customer.name,
            agent_id: agent.clone(),
            platform: draft.platform,
            product_name: draft.product_name,
            product_url: draft.product_url,
            affiliate_link: draft.affiliate_link,
            status: draft.status,
            created_at: Utc::now().date_naive(),
        };
        data.orders.insert(0, order.clone());

        tracing::info!(
            order_id = %order.id,
            customer_id = %order.customer_id,
            platform = %order.platform,
            "Order created"
        );
        Ok(order)
    }
}
