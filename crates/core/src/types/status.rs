//! Status enums for agents, customers and orders.

use serde::{Deserialize, Serialize};

/// Generates `as_str`, `label`, `ALL`, `Display` and `FromStr` for a
/// unit-only status enum.
macro_rules! status_enum {
    ($name:ident { $($variant:ident => ($value:literal, $label:literal)),+ $(,)? }) => {
        impl $name {
            /// Every variant, in display order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The stable string form used in forms and query strings.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            /// Human-readable label.
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok(Self::$variant),)+
                    _ => Err(format!(concat!("invalid ", stringify!($name), ": {}"), s)),
                }
            }
        }
    };
}

/// Whether an agent can be assigned work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    #[default]
    Active,
    Inactive,
}

status_enum!(AgentStatus {
    Active => ("active", "Active"),
    Inactive => ("inactive", "Inactive"),
});

impl AgentStatus {
    /// The opposite status (used by the enable/disable action).
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

/// Customer lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    Active,
    Inactive,
    #[default]
    Pending,
}

status_enum!(CustomerStatus {
    Active => ("active", "Active"),
    Inactive => ("inactive", "Inactive"),
    Pending => ("pending", "Pending"),
});

/// Affiliate order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
}

status_enum!(OrderStatus {
    Pending => ("pending", "Pending"),
    Confirmed => ("confirmed", "Confirmed"),
    Completed => ("completed", "Completed"),
});

/// Badge variant a status renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Success,
    Warning,
    Muted,
}

impl BadgeVariant {
    /// CSS class suffix for the badge.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Muted => "muted",
        }
    }
}

impl CustomerStatus {
    /// Badge variant for this status.
    #[must_use]
    pub const fn badge(self) -> BadgeVariant {
        match self {
            Self::Active => BadgeVariant::Success,
            Self::Pending => BadgeVariant::Warning,
            Self::Inactive => BadgeVariant::Muted,
        }
    }
}

impl OrderStatus {
    /// Badge variant for this status.
    #[must_use]
    pub const fn badge(self) -> BadgeVariant {
        match self {
            Self::Completed => BadgeVariant::Success,
            Self::Confirmed => BadgeVariant::Warning,
            Self::Pending => BadgeVariant::Muted,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_status_toggle() {
        assert_eq!(AgentStatus::Active.toggled(), AgentStatus::Inactive);
        assert_eq!(AgentStatus::Inactive.toggled(), AgentStatus::Active);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "pending".parse::<CustomerStatus>().unwrap(),
            CustomerStatus::Pending
        );
        assert_eq!(
            "completed".parse::<OrderStatus>().unwrap(),
            OrderStatus::Completed
        );
        let err = "all".parse::<AgentStatus>().unwrap_err();
        assert_eq!(err, "invalid AgentStatus: all");
    }

    #[test]
    fn test_badges() {
        assert_eq!(OrderStatus::Completed.badge(), BadgeVariant::Success);
        assert_eq!(OrderStatus::Pending.badge(), BadgeVariant::Muted);
        assert_eq!(CustomerStatus::Pending.badge(), BadgeVariant::Warning);
    }
}
