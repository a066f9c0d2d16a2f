//! Demo data the dashboard starts with.
//!
//! `agent-1` belongs to the demo agent login (`agent@crm.com`).

use chrono::NaiveDate;

use affiliate_crm_core::{
    AgentId, AgentStatus, CustomerId, CustomerStatus, Email, OrderId, OrderStatus, Platform,
};

use super::CrmData;
use crate::models::{Agent, Customer, Order};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn email(raw: &str) -> Option<Email> {
    Email::parse(raw).ok()
}

fn agent(id: &str, name: &str, raw_email: &str, phone: &str, status: AgentStatus, created: NaiveDate) -> Option<Agent> {
    Some(Agent {
        id: AgentId::new(id),
        name: name.to_string(),
        email: email(raw_email)?,
        phone: phone.to_string(),
        status,
        assigned_customers: 0,
        created_at: created,
    })
}

fn customer(
    id: &str,
    name: &str,
    phone: &str,
    raw_email: Option<&str>,
    agent: Option<&str>,
    status: CustomerStatus,
    created: NaiveDate,
) -> Customer {
    Customer {
        id: CustomerId::new(id),
        name: name.to_string(),
        phone: phone.to_string(),
        email: raw_email.and_then(email),
        assigned_agent: agent.map(AgentId::new),
        status,
        created_at: created,
    }
}

#[allow(clippy::too_many_arguments)]
fn order(
    id: &str,
    customer: &Customer,
    agent: &str,
    platform: Platform,
    product: &str,
    url: &str,
    status: OrderStatus,
    created: NaiveDate,
) -> Order {
    Order {
        id: OrderId::new(id),
        customer_id: customer.id.clone(),
        customer_name: customer.name.clone(),
        agent_id: AgentId::new(agent),
        platform,
        product_name: product.to_string(),
        product_url: url.to_string(),
        affiliate_link: Some(format!("https://aff.link/{}/{}", platform.code(), id.replace('-', ""))),
        status,
        created_at: created,
    }
}

/// Build the demo data set.
///
/// Each agent's `assigned_customers` is derived from the customer list.
#[must_use]
pub fn seed() -> CrmData {
    let mut agents: Vec<Agent> = [
        agent("agent-1", "Sarah Agent", "agent@crm.com", "+1 555-0101", AgentStatus::Active, date(2024, 1, 15)),
        agent("agent-2", "Mike Johnson", "mike@crm.com", "+1 555-0102", AgentStatus::Active, date(2024, 2, 3)),
        agent("agent-3", "Emily Davis", "emily@crm.com", "+1 555-0103", AgentStatus::Inactive, date(2024, 2, 20)),
        agent("agent-4", "David Wilson", "david@crm.com", "+1 555-0104", AgentStatus::Active, date(2024, 3, 8)),
    ]
    .into_iter()
    .flatten()
    .collect();

    let customers = vec![
        customer("cust-1", "Alice Brown", "+1 555-1001", Some("alice@example.com"), Some("agent-1"), CustomerStatus::Active, date(2024, 3, 1)),
        customer("cust-2", "Bob Martinez", "+1 555-1002", None, Some("agent-1"), CustomerStatus::Active, date(2024, 3, 4)),
        customer("cust-3", "Carol White", "+1 555-1003", Some("carol@example.com"), Some("agent-1"), CustomerStatus::Pending, date(2024, 3, 9)),
        customer("cust-4", "Daniel Lee", "+1 555-1004", Some("daniel@example.com"), Some("agent-2"), CustomerStatus::Active, date(2024, 3, 12)),
        customer("cust-5", "Eva Green", "+1 555-1005", None, Some("agent-2"), CustomerStatus::Inactive, date(2024, 3, 18)),
        customer("cust-6", "Frank Harris", "+1 555-1006", Some("frank@example.com"), Some("agent-4"), CustomerStatus::Active, date(2024, 3, 22)),
        customer("cust-7", "Grace Kim", "+1 555-1007", None, None, CustomerStatus::Pending, date(2024, 3, 27)),
        customer("cust-8", "Henry Clark", "+1 555-1008", Some("henry@example.com"), None, CustomerStatus::Pending, date(2024, 4, 2)),
    ];

    for agent in &mut agents {
        let assigned = customers.iter().filter(|c| c.is_assigned_to(&agent.id)).count();
        agent.assigned_customers = u32::try_from(assigned).unwrap_or(u32::MAX);
    }

    let by_id = |id: &str| customers.iter().find(|c| c.id.as_str() == id);
    let orders = [
        ("order-6", "cust-4", "agent-2", Platform::Zara, "Linen Blend Shirt", "https://zara.com/us/en/linen-blend-shirt", OrderStatus::Pending, date(2024, 4, 10)),
        ("order-5", "cust-1", "agent-1", Platform::Target, "Stanley Quencher Tumbler", "https://target.com/p/stanley-quencher", OrderStatus::Confirmed, date(2024, 4, 8)),
        ("order-4", "cust-2", "agent-1", Platform::Amazon, "Kindle Paperwhite", "https://amazon.com/dp/B08KTZ8249", OrderStatus::Completed, date(2024, 4, 5)),
        ("order-3", "cust-6", "agent-4", Platform::Etsy, "Handmade Leather Wallet", "https://etsy.com/listing/leather-wallet", OrderStatus::Completed, date(2024, 4, 1)),
        ("order-2", "cust-3", "agent-1", Platform::Ikea, "KALLAX Shelf", "https://ikea.com/p/kallax-shelf", OrderStatus::Pending, date(2024, 3, 28)),
        ("order-1", "cust-1", "agent-1", Platform::Walmart, "Instant Pot Duo", "https://walmart.com/ip/instant-pot-duo", OrderStatus::Completed, date(2024, 3, 20)),
    ]
    .into_iter()
    .filter_map(|(id, cust, agent, platform, product, url, status, created)| {
        by_id(cust).map(|c| order(id, c, agent, platform, product, url, status, created))
    })
    .collect();

    CrmData {
        agents,
        customers,
        orders,
    }
}
