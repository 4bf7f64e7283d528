//! Type-safe wrappers for identities, targets and actions
//!
//! These wrappers keep principal, unit and warehouse identifiers from being
//! mixed up, and give every action a closed set of names per target kind.

use crate::utils::error::{AuthzError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw identifier
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Get the raw identifier
            pub const fn get(&self) -> u64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

numeric_id!(
    /// An authenticated identity being checked for access
    PrincipalId
);
numeric_id!(
    /// An organizational unit ("department") through which most grants flow
    UnitId
);
numeric_id!(
    /// A storage location
    WarehouseId
);

/// Name of a role (a bundle of capabilities)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleName(String);

impl RoleName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoleName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for RoleName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A fine-grained named capability, e.g. `can_create_order`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(String);

impl Capability {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Conventional capability name for an action in a functional area.
    ///
    /// ```
    /// use inventory_authz::Capability;
    ///
    /// assert_eq!(Capability::for_area("inventory", "view").as_str(), "can_view_inventory");
    /// ```
    pub fn for_area(area: &str, action: &str) -> Self {
        Self(format!("can_{}_{}", action, area))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Capability {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Opaque reference to any domain object, e.g. `(product, 42)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    /// Object kind, e.g. `product` or `document`
    pub kind: String,
    /// Object identifier within its kind
    pub id: u64,
}

impl ObjectRef {
    pub fn new(kind: impl Into<String>, id: u64) -> Self {
        Self {
            kind: kind.into(),
            id,
        }
    }
}

impl Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Actions available on a warehouse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarehouseAction {
    View,
    Edit,
    ManageStock,
}

impl WarehouseAction {
    pub const ALL: [WarehouseAction; 3] = [Self::View, Self::Edit, Self::ManageStock];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::ManageStock => "manage_stock",
        }
    }
}

impl Display for WarehouseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WarehouseAction {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "view" => Ok(Self::View),
            "edit" => Ok(Self::Edit),
            "manage_stock" => Ok(Self::ManageStock),
            other => Err(AuthzError::invalid_action(other, "warehouse")),
        }
    }
}

/// Actions available on a domain object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectAction {
    View,
    Edit,
    Delete,
}

impl ObjectAction {
    pub const ALL: [ObjectAction; 3] = [Self::View, Self::Edit, Self::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }
}

impl Display for ObjectAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectAction {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "view" => Ok(Self::View),
            "edit" => Ok(Self::Edit),
            "delete" => Ok(Self::Delete),
            other => Err(AuthzError::invalid_action(other, "object")),
        }
    }
}
