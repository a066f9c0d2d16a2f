//! Submitted HTML forms and their validation.
//!
//! Every form is checked for required fields before any operation runs.
//! A failure becomes a blocking notice on the page that submitted it.

use serde::Deserialize;
use thiserror::Error;

use affiliate_crm_core::{CustomerId, Email, OrderStatus, Platform};

use crate::db::{AgentUpdate, NewAgent, NewCustomer, OrderCustomer, OrderDraft};

/// A form was submitted with missing or unusable fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter both email and password.")]
    MissingCredentials,

    #[error("Name and email are required.")]
    MissingAgentFields,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Please select or add a customer.")]
    MissingCustomer,

    #[error("Please fill in all order details.")]
    MissingOrderDetails,

    #[error("Please select a platform and enter a product URL.")]
    MissingLinkDetails,

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("Unknown order status: {0}")]
    UnknownStatus(String),
}

impl ValidationError {
    /// Notice title for this error.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::MissingLinkDetails => "Missing Information",
            _ => "Validation Error",
        }
    }
}

/// Trimmed, non-empty field value.
fn required(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|v| !v.is_empty())
}

fn optional(value: Option<&str>) -> Option<String> {
    value.and_then(required).map(str::to_string)
}

fn parse_platform(raw: &str) -> Result<Platform, ValidationError> {
    Platform::from_name(raw.trim()).ok_or_else(|| ValidationError::UnknownPlatform(raw.to_string()))
}

// =============================================================================
// Login
// =============================================================================

/// `POST /login`
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Location to return to after signing in.
    pub from: Option<String>,
}

impl LoginForm {
    /// Both fields must be present. The email is passed on untouched; the
    /// authenticator normalizes it.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingCredentials` if either is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if required(&self.email).is_none() || self.password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        Ok(())
    }
}

// =============================================================================
// Agents
// =============================================================================

/// `POST /agents` and `POST /agents/{id}/edit`
#[derive(Debug, Deserialize)]
pub struct AgentForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl AgentForm {
    fn fields(&self) -> Result<(String, Email, String), ValidationError> {
        let (Some(name), Some(email)) = (required(&self.name), required(&self.email)) else {
            return Err(ValidationError::MissingAgentFields);
        };
        let email = Email::parse(email).map_err(|_| ValidationError::InvalidEmail)?;
        Ok((name.to_string(), email, self.phone.trim().to_string()))
    }

    /// # Errors
    ///
    /// Returns `ValidationError` if the name or email is missing or invalid.
    pub fn to_new_agent(&self) -> Result<NewAgent, ValidationError> {
        let (name, email, phone) = self.fields()?;
        Ok(NewAgent { name, email, phone })
    }

    /// # Errors
    ///
    /// Returns `ValidationError` if the name or email is missing or invalid.
    pub fn to_update(&self) -> Result<AgentUpdate, ValidationError> {
        let (name, email, phone) = self.fields()?;
        Ok(AgentUpdate { name, email, phone })
    }
}

// =============================================================================
// Customers
// =============================================================================

/// `POST /customers/{id}/assign`
#[derive(Debug, Deserialize)]
pub struct AssignForm {
    /// Target agent; blank or `unassigned` removes the assignment.
    pub agent_id: Option<String>,
}

impl AssignForm {
    /// The selected agent ID, if any.
    #[must_use]
    pub fn agent_id(&self) -> Option<affiliate_crm_core::AgentId> {
        optional(self.agent_id.as_deref())
            .filter(|id| id != "unassigned")
            .map(affiliate_crm_core::AgentId::new)
    }
}

// =============================================================================
// Orders
// =============================================================================

/// Which customer tab the order form was submitted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerMode {
    #[default]
    Existing,
    New,
}

/// `POST /create-order` and `POST /create-order/link`
///
/// Link generation posts the whole form so the page can be re-rendered with
/// everything the agent has entered so far.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderForm {
    #[serde(default)]
    pub customer_mode: CustomerMode,
    pub customer_id: Option<String>,
    pub new_customer_name: Option<String>,
    pub new_customer_phone: Option<String>,
    pub platform: Option<String>,
    pub product_name: Option<String>,
    pub product_url: Option<String>,
    pub affiliate_link: Option<String>,
    pub status: Option<String>,
}

impl OrderForm {
    /// Platform and product URL needed to generate an affiliate link.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingLinkDetails` if either is blank.
    pub fn link_request(&self) -> Result<(Platform, String), ValidationError> {
        let (Some(platform), Some(url)) = (
            optional(self.platform.as_deref()),
            optional(self.product_url.as_deref()),
        ) else {
            return Err(ValidationError::MissingLinkDetails);
        };
        Ok((parse_platform(&platform)?, url))
    }

    /// Validate the form into an order ready to save.
    ///
    /// The customer is checked first, then the order details.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingCustomer` or
    /// `ValidationError::MissingOrderDetails` for blank required fields.
    pub fn to_draft(&self) -> Result<OrderDraft, ValidationError> {
        let customer = match self.customer_mode {
            CustomerMode::Existing => optional(self.customer_id.as_deref())
                .map(|id| OrderCustomer::Existing(CustomerId::new(id))),
            CustomerMode::New => match (
                optional(self.new_customer_name.as_deref()),
                optional(self.new_customer_phone.as_deref()),
            ) {
                (Some(name), Some(phone)) => Some(OrderCustomer::New(NewCustomer { name, phone })),
                _ => None,
            },
        }
        .ok_or(ValidationError::MissingCustomer)?;

        let (Some(platform), Some(product_name), Some(product_url)) = (
            optional(self.platform.as_deref()),
            optional(self.product_name.as_deref()),
            optional(self.product_url.as_deref()),
        ) else {
            return Err(ValidationError::MissingOrderDetails);
        };

        let status = match optional(self.status.as_deref()) {
            Some(raw) => raw
                .parse::<OrderStatus>()
                .map_err(|_| ValidationError::UnknownStatus(raw))?,
            None => OrderStatus::default(),
        };

        Ok(OrderDraft {
            customer,
            platform: parse_platform(&platform)?,
            product_name,
            product_url,
            affiliate_link: optional(self.affiliate_link.as_deref()),
            status,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn order_form() -> OrderForm {
        OrderForm {
            customer_mode: CustomerMode::Existing,
            customer_id: Some("cust-1".to_string()),
            platform: Some("eBay".to_string()),
            product_name: Some("Vintage Camera".to_string()),
            product_url: Some("https://ebay.com/itm/123".to_string()),
            ..OrderForm::default()
        }
    }

    #[test]
    fn test_login_form_requires_both_fields() {
        let form = LoginForm {
            email: "  ".to_string(),
            password: "admin123".to_string(),
            from: None,
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingCredentials));

        let form = LoginForm {
            email: "admin@crm.com".to_string(),
            password: String::new(),
            from: None,
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingCredentials));
    }

    #[test]
    fn test_agent_form() {
        let form = AgentForm {
            name: " Nina Novak ".to_string(),
            email: "Nina@CRM.com".to_string(),
            phone: String::new(),
        };
        let agent = form.to_new_agent().unwrap();
        assert_eq!(agent.name, "Nina Novak");
        assert_eq!(agent.email.as_str(), "nina@crm.com");

        let missing = AgentForm {
            name: "Nina".to_string(),
            email: String::new(),
            phone: "+1 555".to_string(),
        };
        assert_eq!(
            missing.to_new_agent().unwrap_err(),
            ValidationError::MissingAgentFields
        );

        let invalid = AgentForm {
            name: "Nina".to_string(),
            email: "nina".to_string(),
            phone: String::new(),
        };
        assert_eq!(invalid.to_update().unwrap_err(), ValidationError::InvalidEmail);
    }

    #[test]
    fn test_assign_form() {
        let form = AssignForm {
            agent_id: Some("agent-2".to_string()),
        };
        assert_eq!(form.agent_id().unwrap().as_str(), "agent-2");
        assert!(AssignForm { agent_id: None }.agent_id().is_none());
        assert!(
            AssignForm {
                agent_id: Some("unassigned".to_string())
            }
            .agent_id()
            .is_none()
        );
    }

    #[test]
    fn test_order_form_existing_customer() {
        let draft = order_form().to_draft().unwrap();
        assert!(matches!(draft.customer, OrderCustomer::Existing(ref id) if id.as_str() == "cust-1"));
        assert_eq!(draft.platform, Platform::Ebay);
        assert_eq!(draft.status, OrderStatus::Pending);
        assert!(draft.affiliate_link.is_none());
    }

    #[test]
    fn test_order_form_new_customer() {
        let form = OrderForm {
            customer_mode: CustomerMode::New,
            customer_id: None,
            new_customer_name: Some("Zoe Walker".to_string()),
            new_customer_phone: Some("+1 555-2020".to_string()),
            status: Some("confirmed".to_string()),
            ..order_form()
        };
        let draft = form.to_draft().unwrap();
        assert!(matches!(draft.customer, OrderCustomer::New(ref c) if c.name == "Zoe Walker"));
        assert_eq!(draft.status, OrderStatus::Confirmed);

        let no_phone = OrderForm {
            new_customer_phone: Some(" ".to_string()),
            ..form
        };
        assert_eq!(no_phone.to_draft().unwrap_err(), ValidationError::MissingCustomer);
    }

    #[test]
    fn test_order_form_customer_checked_before_details() {
        let form = OrderForm {
            customer_id: None,
            product_name: None,
            ..order_form()
        };
        assert_eq!(form.to_draft().unwrap_err(), ValidationError::MissingCustomer);
    }

    #[test]
    fn test_order_form_missing_details() {
        let form = OrderForm {
            product_url: Some(String::new()),
            ..order_form()
        };
        assert_eq!(form.to_draft().unwrap_err(), ValidationError::MissingOrderDetails);
    }

    #[test]
    fn test_order_form_rejects_unknown_values() {
        let platform = OrderForm {
            platform: Some("Nowhere".to_string()),
            ..order_form()
        };
        assert!(matches!(
            platform.to_draft(),
            Err(ValidationError::UnknownPlatform(_))
        ));

        let status = OrderForm {
            status: Some("shipped".to_string()),
            ..order_form()
        };
        assert!(matches!(status.to_draft(), Err(ValidationError::UnknownStatus(_))));
    }

    #[test]
    fn test_link_request() {
        let (platform, url) = order_form().link_request().unwrap();
        assert_eq!(platform, Platform::Ebay);
        assert_eq!(url, "https://ebay.com/itm/123");

        let missing = OrderForm {
            platform: None,
            ..order_form()
        };
        let err = missing.link_request().unwrap_err();
        assert_eq!(err, ValidationError::MissingLinkDetails);
        assert_eq!(err.title(), "Missing Information");
    }
}
