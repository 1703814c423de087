//! Business-unit departments and cache namespaces
//!
//! A department scopes patterns, validation rules, and cache partitions.
//! Each department owns a short namespace tag (`inv`, `acc`, ...) used as
//! the first segment of cache keys; keys with an unrecognized tag route to
//! the default namespace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShortqError;

/// A business department that scopes patterns, rules, and caches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Department {
    Inventory,
    Accounting,
    Sales,
    Service,
    Marketing,
}

impl Department {
    /// All known departments, in routing order
    pub const ALL: [Department; 5] = [
        Department::Inventory,
        Department::Accounting,
        Department::Sales,
        Department::Service,
        Department::Marketing,
    ];

    /// Parse a department name, returning `None` for unknown strings
    ///
    /// Unknown departments are not an error at the engine boundary:
    /// interpretation degrades to a general search instead.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INVENTORY" => Some(Department::Inventory),
            "ACCOUNTING" => Some(Department::Accounting),
            "SALES" => Some(Department::Sales),
            "SERVICE" => Some(Department::Service),
            "MARKETING" => Some(Department::Marketing),
            _ => None,
        }
    }

    /// Canonical uppercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Inventory => "INVENTORY",
            Department::Accounting => "ACCOUNTING",
            Department::Sales => "SALES",
            Department::Service => "SERVICE",
            Department::Marketing => "MARKETING",
        }
    }

    /// Short tag used as the leading cache-key segment
    pub fn tag(&self) -> &'static str {
        match self {
            Department::Inventory => "inv",
            Department::Accounting => "acc",
            Department::Sales => "sal",
            Department::Service => "ser",
            Department::Marketing => "mkt",
        }
    }

    /// The cache namespace backing this department
    pub fn namespace(&self) -> Namespace {
        match self {
            Department::Inventory => Namespace::Inventory,
            Department::Accounting => Namespace::Accounting,
            Department::Sales => Namespace::Sales,
            Department::Service => Namespace::Service,
            Department::Marketing => Namespace::Marketing,
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = ShortqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::parse(s).ok_or_else(|| ShortqError::UnknownDepartment(s.to_string()))
    }
}

/// Logical cache partition
///
/// Replaces prefix-string routing with an explicit enum so the set of
/// partitions is closed and checked at compile time against [`Department`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    Inventory,
    Accounting,
    Sales,
    Service,
    Marketing,
    Default,
}

impl Namespace {
    /// Route a namespace tag (the first cache-key segment) to a partition
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "inv" => Namespace::Inventory,
            "acc" => Namespace::Accounting,
            "sal" => Namespace::Sales,
            "ser" => Namespace::Service,
            "mkt" => Namespace::Marketing,
            _ => Namespace::Default,
        }
    }
}
