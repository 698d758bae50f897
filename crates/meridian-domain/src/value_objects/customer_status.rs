//! Customer status value object.

use meridian_core::MeridianError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Commercial status of a customer. Any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerStatus {
    /// Paying customer.
    Active,
    /// Former or suspended customer.
    Inactive,
    /// Not yet converted.
    #[default]
    Prospect,
}

impl CustomerStatus {
    /// Returns all statuses.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Active, Self::Inactive, Self::Prospect]
    }

    /// Returns the canonical (stored) name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Prospect => "PROSPECT",
        }
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomerStatus {
    type Err = MeridianError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            "PROSPECT" => Ok(Self::Prospect),
            _ => Err(MeridianError::validation(format!("Unknown customer status: {s}"))),
        }
    }
}
