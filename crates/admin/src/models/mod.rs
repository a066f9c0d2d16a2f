//! Domain models for the dashboard.
//!
//! - [`agent`] - Affiliate agents managed by admins
//! - [`customer`] - Customers, optionally assigned to an agent
//! - [`order`] - Affiliate orders created by agents
//! - [`forms`] - Submitted forms and their validation
//! - [`session`] - Session storage keys

pub mod agent;
pub mod customer;
pub mod forms;
pub mod order;
pub mod session;

pub use agent::Agent;
pub use customer::Customer;
pub use forms::{AgentForm, AssignForm, CustomerMode, LoginForm, OrderForm, ValidationError};
pub use order::Order;
pub use session::keys as session_keys;
