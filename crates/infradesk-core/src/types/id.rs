//! Newtype wrappers around the backend's numeric primary keys.
//!
//! Using distinct types prevents accidentally passing a `ClusterId` where a
//! `DatacenterId` is expected, which matters for the cascading selection
//! rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapper around `i64`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Return the inner numeric value.
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of a datacenter.
    DatacenterId
);

define_id!(
    /// Identifier of a physical server.
    ServerId
);

define_id!(
    /// Identifier of a disk array.
    DiskArrayId
);

define_id!(
    /// Identifier of a console user.
    UserId
);

define_id!(
    /// Identifier of a maintenance record.
    MaintenanceRecordId
);

define_id!(
    /// Identifier of a VM deployment job.
    DeploymentJobId
);

define_id!(
    /// Identifier of a compute cluster.
    ClusterId
);

define_id!(
    /// Identifier of a network.
    NetworkId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let id: DatacenterId = " 42".parse().expect("should parse");
        assert_eq!(id, DatacenterId(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_serde_is_transparent() {
        let json = serde_json::to_string(&ClusterId(7)).expect("serialize");
        assert_eq!(json, "7");
        let parsed: NetworkId = serde_json::from_str("9").expect("deserialize");
        assert_eq!(parsed.get(), 9);
    }
}
