//! Closed set of config categories.
//!
//! Stored as the snake_case string name. Adding a variant forces every `match`
//! over categories (tab filters, default-on-create, badges) to be revisited.

use crate::errors::{Error, Result};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Category of a system config
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum ConfigCategory {
    /// Customer-to-business payment gateway credentials
    #[sea_orm(string_value = "payment_c2b")]
    PaymentC2b,
    /// Business-to-customer payout credentials
    #[sea_orm(string_value = "payment_b2c")]
    PaymentB2c,
    /// Database connection strings
    #[sea_orm(string_value = "database")]
    Database,
    /// Third-party API secrets and endpoints
    #[sea_orm(string_value = "api_integration")]
    ApiIntegration,
}

impl ConfigCategory {
    /// Every recognized category, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::PaymentC2b,
        Self::PaymentB2c,
        Self::Database,
        Self::ApiIntegration,
    ];

    /// Stored string name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PaymentC2b => "payment_c2b",
            Self::PaymentB2c => "payment_b2c",
            Self::Database => "database",
            Self::ApiIntegration => "api_integration",
        }
    }

    /// True for the categories whose name starts with `payment`.
    #[must_use]
    pub fn is_payment(self) -> bool {
        self.as_str().starts_with("payment")
    }

    /// Short label shown next to payment keys in the console table.
    #[must_use]
    pub const fn badge(self) -> Option<&'static str> {
        match self {
            Self::PaymentC2b => Some("C2B"),
            Self::PaymentB2c => Some("B2C"),
            Self::Database | Self::ApiIntegration => None,
        }
    }
}

impl FromStr for ConfigCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| Error::validation(format!("Unrecognized category: '{wanted}'")))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_known_categories() {
        for category in ConfigCategory::ALL {
            assert_eq!(category.as_str().parse::<ConfigCategory>().unwrap(), category);
        }
        assert_eq!(
            " database ".parse::<ConfigCategory>().unwrap(),
            ConfigCategory::Database
        );
    }

    #[test]
    fn test_parse_unknown_category_is_validation_error() {
        let result = "payments".parse::<ConfigCategory>();
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_payment_prefix_and_badges() {
        assert!(ConfigCategory::PaymentC2b.is_payment());
        assert!(ConfigCategory::PaymentB2c.is_payment());
        assert!(!ConfigCategory::Database.is_payment());
        assert!(!ConfigCategory::ApiIntegration.is_payment());

        assert_eq!(ConfigCategory::PaymentB2c.badge(), Some("B2C"));
        assert_eq!(ConfigCategory::ApiIntegration.badge(), None);
    }

    #[test]
    fn test_serde_uses_stored_names() {
        #[derive(Deserialize)]
        struct Row {
            category: ConfigCategory,
        }
        let row: Row = toml::from_str(r#"category = "api_integration""#).unwrap();
        assert_eq!(row.category, ConfigCategory::ApiIntegration);
        assert!(toml::from_str::<Row>(r#"category = "crm""#).is_err());
    }
}
