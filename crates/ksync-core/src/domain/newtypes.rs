//! Domain newtypes with validation
//!
//! This module provides strongly-typed wrappers for the opaque identifiers
//! handed out by the remote route store. Each newtype ensures data validity
//! at construction time.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

// ============================================================================
// Opaque remote identifiers
// ============================================================================

/// Generates a validated, non-empty string identifier type.
macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Create a new ", $label)]
            ///
            /// # Errors
            /// Returns error if the ID is empty or contains whitespace or `/`
            pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(DomainError::InvalidId(format!(
                        "{} cannot be empty",
                        $label
                    )));
                }

                // The id is interpolated into URL paths
                if id.chars().any(|c| c.is_whitespace() || c == '/') {
                    return Err(DomainError::InvalidId(format!(
                        "{} contains invalid characters: {id}",
                        $label
                    )));
                }

                Ok(Self(id))
            }

            /// Get the inner string reference
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

opaque_id!(
    /// Identifier of a remote collection
    CollectionId,
    "collection ID"
);

opaque_id!(
    /// Identifier of a remote route
    RouteId,
    "route ID"
);

opaque_id!(
    /// Identifier of a remote user, taken from the `sub` claim of the access token
    UserId,
    "user ID"
);
