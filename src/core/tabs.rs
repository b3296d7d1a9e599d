//! Console tabs - how the admin console groups categories.

use super::draft::ConfigDraft;
use crate::{
    entities::ConfigCategory,
    errors::{Error, Result},
};
use std::str::FromStr;

/// Tabs of the integrations screen that list configs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleTab {
    /// Both payment directions
    Payments,
    /// Connection strings
    Databases,
    /// Third-party APIs
    Apis,
}

impl ConsoleTab {
    /// Every tab, in display order.
    pub const ALL: [Self; 3] = [Self::Payments, Self::Databases, Self::Apis];

    /// Filter predicate for
    /// [`ConfigRegistry::list_by_category`](super::ConfigRegistry::list_by_category).
    #[must_use]
    pub fn includes(self, category: ConfigCategory) -> bool {
        match self {
            Self::Payments => category.is_payment(),
            Self::Databases => category == ConfigCategory::Database,
            Self::Apis => category == ConfigCategory::ApiIntegration,
        }
    }

    /// Tab that shows configs of `category`.
    #[must_use]
    pub const fn for_category(category: ConfigCategory) -> Self {
        match category {
            ConfigCategory::PaymentC2b | ConfigCategory::PaymentB2c => Self::Payments,
            ConfigCategory::Database => Self::Databases,
            ConfigCategory::ApiIntegration => Self::Apis,
        }
    }

    /// Category preselected when the operator adds a config from this tab.
    #[must_use]
    pub const fn default_category(self) -> ConfigCategory {
        match self {
            Self::Payments => ConfigCategory::PaymentC2b,
            Self::Databases => ConfigCategory::Database,
            Self::Apis => ConfigCategory::ApiIntegration,
        }
    }

    /// Heading of the tab.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Payments => "Payment Gateways",
            Self::Databases => "Database Connections",
            Self::Apis => "System API Integrations",
        }
    }

    /// Empty, active draft in this tab's default category.
    #[must_use]
    pub fn blank_draft(self) -> ConfigDraft {
        ConfigDraft::new(self.default_category(), "")
            .with_value("")
            .with_active(true)
    }
}

impl FromStr for ConsoleTab {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "payments" => Ok(Self::Payments),
            "databases" => Ok(Self::Databases),
            "apis" => Ok(Self::Apis),
            other => Err(Error::validation(format!("Unknown console tab: '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_each_category_lands_in_exactly_one_tab() {
        for category in ConfigCategory::ALL {
            let tabs: Vec<_> = ConsoleTab::ALL
                .into_iter()
                .filter(|tab| tab.includes(category))
                .collect();
            assert_eq!(tabs, vec![ConsoleTab::for_category(category)]);
        }
    }

    #[test]
    fn test_default_category_belongs_to_tab() {
        for tab in ConsoleTab::ALL {
            assert!(tab.includes(tab.default_category()));
            let draft = tab.blank_draft();
            assert_eq!(draft.category, Some(tab.default_category()));
            assert_eq!(draft.is_active, Some(true));
        }
    }

    #[test]
    fn test_parse_tab() {
        assert_eq!("Payments".parse::<ConsoleTab>().unwrap(), ConsoleTab::Payments);
        assert!(matches!(
            "setup".parse::<ConsoleTab>(),
            Err(Error::Validation { .. })
        ));
    }
}
