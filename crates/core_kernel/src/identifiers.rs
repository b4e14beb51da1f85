//! Tenancy and finance identifiers
//!
//! Each id is a UUID newtype, so an organization id cannot be passed where a
//! currency id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Random identifier for tests and in-memory data
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Time-ordered identifier for newly created records
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        /// Renders as `PREFIX-uuid` so ids of different kinds read apart in logs
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }

        /// Accepts both the prefixed form and a bare UUID
        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let bare = raw.strip_prefix(concat!($prefix, "-")).unwrap_or(raw);
                Uuid::parse_str(bare).map(Self)
            }
        }
    };
}

// Tenancy identifiers
define_id!(OrganizationId, "ORG");
define_id!(ProjectId, "PRJ");

// Finance identifiers
define_id!(CurrencyId, "CUR");
define_id!(MovementId, "MOV");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organization_id_display() {
        let id = OrganizationId::new();
        let display = id.to_string();
        assert!(display.starts_with("ORG-"));
    }

    #[test]
    fn test_id_parsing() {
        let original = OrganizationId::new();
        let parsed: OrganizationId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_bare_uuid_parsing() {
        let uuid = Uuid::new_v4();
        let parsed: ProjectId = uuid.to_string().parse().unwrap();
        assert_eq!(parsed.as_uuid(), &uuid);
        assert!("PRJ-not-a-uuid".parse::<ProjectId>().is_err());
    }
}
