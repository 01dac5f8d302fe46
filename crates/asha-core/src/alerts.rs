//! Reminder alert categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The fixed set of reminder categories a worker can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertCategory {
    Anc,
    Vaccination,
    Pnc,
    Followup,
}

impl AlertCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertCategory::Anc => "anc",
            AlertCategory::Vaccination => "vaccination",
            AlertCategory::Pnc => "pnc",
            AlertCategory::Followup => "followup",
        }
    }
}

impl fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown alert category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for AlertCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "anc" => Ok(AlertCategory::Anc),
            "vaccination" => Ok(AlertCategory::Vaccination),
            "pnc" => Ok(AlertCategory::Pnc),
            "followup" => Ok(AlertCategory::Followup),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_string_round_trip() {
        for category in [
            AlertCategory::Anc,
            AlertCategory::Vaccination,
            AlertCategory::Pnc,
            AlertCategory::Followup,
        ] {
            assert_eq!(category.as_str().parse::<AlertCategory>().unwrap(), category);
        }
        assert!("payroll".parse::<AlertCategory>().is_err());
    }
}
