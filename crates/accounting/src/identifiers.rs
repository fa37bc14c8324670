//! Newtype domain identifiers.
//!
//! Projects and jobs are both identified by UUIDs. Wrapping each in its own
//! newtype prevents passing a [`JobId`] where a [`ProjectId`] is expected.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AccountingError;

// ---------------------------------------------------------------------------
// Macro for UUID-wrapped newtypes.
// Generates: struct (Copy), from_uuid(), as_uuid(), Display.
// ---------------------------------------------------------------------------
macro_rules! uuid_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates the identifier from an existing UUID.
            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Returns the underlying [`Uuid`].
            pub fn as_uuid(self) -> Uuid {
                self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }
    };
}

uuid_id! {
    /// Identifies the project whose budget is charged.
    ///
    /// Callers usually hold the project id as a string (from a request header or
    /// path); use [`ProjectId::parse`] or [`str::parse`] to validate it.
    ProjectId
}

uuid_id! {
    /// Identifies a reserved job.
    ///
    /// Assigned by the accounting service in the reservation response and echoed
    /// back when usage is reported.
    JobId
}

impl ProjectId {
    /// Parses a project id from its string form.
    ///
    /// Accepts any representation [`Uuid::parse_str`] accepts (hyphenated,
    /// simple, braced, or URN).
    pub fn parse(value: &str) -> Result<Self, AccountingError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| AccountingError::InvalidProjectId {
                value: value.to_string(),
            })
    }
}

impl FromStr for ProjectId {
    type Err = AccountingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
