//! Status enums and roles.
//!
//! All values here are backend-owned: this layer displays them and issues
//! transition requests, but never computes a transition itself. In
//! particular [`OrderStatus`] and the `is_paid`/`is_delivered` flags on an
//! order are independent vocabularies; neither is derived from the other.

use serde::{Deserialize, Serialize};

/// Order lifecycle status as reported by the Hub backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// Account role with different permission levels.
///
/// Determines which view branch the client offers (admin console vs.
/// customer dashboard). This is a UX convenience only - every admin
/// endpoint re-verifies the bearer token server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular customer account.
    #[default]
    User,
    /// Back-office access to the admin console.
    Admin,
}

impl Role {
    /// Whether this role unlocks the admin console views.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_serde_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Shipped).unwrap();
        assert_eq!(json, "\"shipped\"");
        let parsed: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, OrderStatus::Cancelled);
    }

    #[test]
    fn test_role_parse_and_display() {
        let role: Role = "admin".parse().unwrap();
        assert!(role.is_admin());
        assert_eq!(role.to_string(), "admin");
        assert!("superuser".parse::<Role>().is_err());
    }
}
