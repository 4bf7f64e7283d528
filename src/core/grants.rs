//! Grant records
//!
//! A grant is a persisted record authorizing specific actions on a target for a
//! principal or an organizational unit. Warehouse grants always address a unit;
//! object grants address exactly one [`GrantSubject`].

use super::types::{ObjectAction, ObjectRef, PrincipalId, UnitId, WarehouseAction, WarehouseId};
use crate::utils::error::{AuthzError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Ties one unit to one warehouse with three independent capabilities.
///
/// Capabilities never imply each other: `can_manage_stock` alone does not
/// grant `view`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseGrant {
    pub warehouse: WarehouseId,
    pub unit: UnitId,
    #[serde(default)]
    pub can_view: bool,
    #[serde(default)]
    pub can_edit: bool,
    #[serde(default)]
    pub can_manage_stock: bool,
}

impl WarehouseGrant {
    /// A grant with every capability switched off
    pub fn new(warehouse: WarehouseId, unit: UnitId) -> Self {
        Self {
            warehouse,
            unit,
            can_view: false,
            can_edit: false,
            can_manage_stock: false,
        }
    }

    pub fn with_view(mut self, can_view: bool) -> Self {
        self.can_view = can_view;
        self
    }

    pub fn with_edit(mut self, can_edit: bool) -> Self {
        self.can_edit = can_edit;
        self
    }

    pub fn with_manage_stock(mut self, can_manage_stock: bool) -> Self {
        self.can_manage_stock = can_manage_stock;
        self
    }

    /// Whether this grant covers `action`
    pub fn allows(&self, action: WarehouseAction) -> bool {
        match action {
            WarehouseAction::View => self.can_view,
            WarehouseAction::Edit => self.can_edit,
            WarehouseAction::ManageStock => self.can_manage_stock,
        }
    }
}

/// The holder of an object grant: exactly one principal or exactly one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantSubject {
    Principal(PrincipalId),
    Unit(UnitId),
}

impl Display for GrantSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Principal(id) => write!(f, "principal:{}", id),
            Self::Unit(id) => write!(f, "unit:{}", id),
        }
    }
}

/// Optional validity bounds of a grant. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
}

impl TimeWindow {
    /// A window with no bounds, valid forever
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn new(valid_from: Option<DateTime<Utc>>, valid_until: Option<DateTime<Utc>>) -> Self {
        Self {
            valid_from,
            valid_until,
        }
    }

    /// Parse RFC 3339 bounds as stored by external grant stores
    pub fn parse(valid_from: Option<&str>, valid_until: Option<&str>) -> Result<Self> {
        let parse = |raw: &str| {
            DateTime::parse_from_rfc3339(raw)
                .map(|ts| ts.with_timezone(&Utc))
                .map_err(|e| AuthzError::time_window(format!("malformed timestamp '{}': {}", raw, e)))
        };

        Ok(Self {
            valid_from: valid_from.map(parse).transpose()?,
            valid_until: valid_until.map(parse).transpose()?,
        })
    }

    pub fn is_unbounded(&self) -> bool {
        self.valid_from.is_none() && self.valid_until.is_none()
    }

    /// Evaluate the window at `now`.
    ///
    /// An inverted window cannot be evaluated and is reported as an error;
    /// callers must treat that as "not valid".
    pub fn check(&self, now: DateTime<Utc>) -> Result<bool> {
        if let (Some(from), Some(until)) = (self.valid_from, self.valid_until) {
            if from > until {
                return Err(AuthzError::time_window(format!(
                    "valid_from {} is after valid_until {}",
                    from, until
                )));
            }
        }

        let started = self.valid_from.is_none_or(|from| now >= from);
        let not_ended = self.valid_until.is_none_or(|until| now <= until);
        Ok(started && not_ended)
    }

    /// Whether the window ended before `now`
    pub fn has_expired(&self, now: DateTime<Utc>) -> bool {
        self.valid_until.is_some_and(|until| until < now)
    }
}

/// Grants view/edit/delete on one object to one subject, optionally time-bounded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectGrant {
    pub subject: GrantSubject,
    pub target: ObjectRef,
    #[serde(default)]
    pub can_view: bool,
    #[serde(default)]
    pub can_edit: bool,
    #[serde(default)]
    pub can_delete: bool,
    #[serde(flatten)]
    pub window: TimeWindow,
}

impl ObjectGrant {
    /// A perpetual grant with every capability switched off
    pub fn new(subject: GrantSubject, target: ObjectRef) -> Self {
        Self {
            subject,
            target,
            can_view: false,
            can_edit: false,
            can_delete: false,
            window: TimeWindow::unbounded(),
        }
    }

    pub fn with_view(mut self, can_view: bool) -> Self {
        self.can_view = can_view;
        self
    }

    pub fn with_edit(mut self, can_edit: bool) -> Self {
        self.can_edit = can_edit;
        self
    }

    pub fn with_delete(mut self, can_delete: bool) -> Self {
        self.can_delete = can_delete;
        self
    }

    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    /// Whether this grant covers `action`, ignoring its validity window
    pub fn allows(&self, action: ObjectAction) -> bool {
        match action {
            ObjectAction::View => self.can_view,
            ObjectAction::Edit => self.can_edit,
            ObjectAction::Delete => self.can_delete,
        }
    }
}
