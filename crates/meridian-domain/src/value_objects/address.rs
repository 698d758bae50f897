//! Postal address value object.

use serde::{Deserialize, Serialize};

/// A postal address embedded in a customer.
///
/// Every part is optional. Two addresses are equal when all five parts are
/// equal, with unset parts comparing equal to each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// Returns true if no part of the address is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.street.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.zip_code.is_none()
            && self.country.is_none()
    }

    /// Returns `None` for an empty address, matching how an address with no
    /// parts reads back from storage.
    #[must_use]
    pub fn into_option(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
