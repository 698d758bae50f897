//! Field-level patch values for partial updates.

use serde::{Deserialize, Serialize};

/// A single field of a partial update.
///
/// `Unchanged` leaves the target untouched; `Set` replaces it. An absent
/// value never clears a field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Patch<T> {
    /// Keep the current value.
    #[default]
    Unchanged,
    /// Replace the current value.
    Set(T),
}

impl<T> Patch<T> {
    /// Returns true if this patch carries a value.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    /// Returns the carried value, if any.
    #[must_use]
    pub const fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unchanged => None,
        }
    }

    /// Converts into an `Option`.
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unchanged => None,
        }
    }

    /// Writes the value into `target` if set. Returns whether it was applied.
    pub fn apply_to(self, target: &mut T) -> bool {
        match self {
            Self::Set(value) => {
                *target = value;
                true
            }
            Self::Unchanged => false,
        }
    }

    /// Writes the value into an optional `target` if set.
    pub fn apply_to_option(self, target: &mut Option<T>) -> bool {
        match self {
            Self::Set(value) => {
                *target = Some(value);
                true
            }
            Self::Unchanged => false,
        }
    }

    /// Maps the carried value.
    #[must_use]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Patch<U> {
        match self {
            Self::Set(value) => Patch::Set(f(value)),
            Self::Unchanged => Patch::Unchanged,
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unchanged, Self::Set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchanged_leaves_target() {
        let mut name = "Acme".to_string();
        assert!(!Patch::Unchanged.apply_to(&mut name));
        assert_eq!(name, "Acme");
    }

    #[test]
    fn test_set_replaces_target() {
        let mut name = "Acme".to_string();
        assert!(Patch::Set("Beta".to_string()).apply_to(&mut name));
        assert_eq!(name, "Beta");
    }

    #[test]
    fn test_apply_to_option() {
        let mut phone: Option<String> = None;
        Patch::Set("555-0100".to_string()).apply_to_option(&mut phone);
        assert_eq!(phone.as_deref(), Some("555-0100"));

        Patch::<String>::Unchanged.apply_to_option(&mut phone);
        assert_eq!(phone.as_deref(), Some("555-0100"));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Patch::from(Some(3)), Patch::Set(3));
        assert_eq!(Patch::<i32>::from(None), Patch::Unchanged);
        assert!(Patch::from(Some(1)).is_set());
        assert_eq!(Patch::Set(2).map(|v| v * 2).into_option(), Some(4));
    }
}
