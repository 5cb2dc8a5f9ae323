//! Data models for the local settings store.

use serde::{Deserialize, Serialize};

/// Account used for the seed row.
pub const SEED_ACCOUNT: &str = "0.0.123456";

/// One row of the `user_settings` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct UserSettings {
    pub account: String,
    pub skip_farmer_verification: bool,
    pub skip_investor_verification: bool,
    pub demo_bypass: bool,
    /// Epoch milliseconds. `None` on insert lets the column default apply.
    pub updated_at: Option<i64>,
}

impl UserSettings {
    /// Settings for `account` with every flag cleared.
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            skip_farmer_verification: false,
            skip_investor_verification: false,
            demo_bypass: false,
            updated_at: None,
        }
    }

    /// The default record inserted by the bootstrapper.
    #[must_use]
    pub fn seed() -> Self {
        Self::new(SEED_ACCOUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_all_flags_cleared() {
        let seed = UserSettings::seed();
        assert_eq!(seed.account, "0.0.123456");
        assert!(!seed.skip_farmer_verification);
        assert!(!seed.skip_investor_verification);
        assert!(!seed.demo_bypass);
        assert_eq!(seed.updated_at, None);
    }

    #[test]
    fn serializes_flags_as_booleans() {
        let json = serde_json::to_string(&UserSettings::seed()).unwrap();
        assert!(json.contains("\"demo_bypass\":false"));
        assert!(json.contains("\"updated_at\":null"));
    }
}
