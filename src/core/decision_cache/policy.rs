//! TTL selection by decision outcome

use serde::{Deserialize, Serialize};

/// Why a verdict was reached, which determines how long it may be cached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Access granted
    Granted,
    /// A matching grant exists but does not cover the action or is outside its window
    FoundButDenied,
    /// No matching grant exists at all, or the check could not be resolved
    NotFound,
}

impl Outcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::FoundButDenied => "found_but_denied",
            Self::NotFound => "not_found",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "granted" => Ok(Self::Granted),
            "found_but_denied" => Ok(Self::FoundButDenied),
            "not_found" => Ok(Self::NotFound),
            other => Err(format!("unknown decision outcome '{}'", other)),
        }
    }
}

/// Cache retention per [`Outcome`], in seconds.
///
/// A "found but denied" principal is close to having access and an
/// administrator may fix it soon, so it is kept shortest. Positive verdicts
/// are kept longest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionTtl {
    pub granted: u64,
    pub found_but_denied: u64,
    pub not_found: u64,
}

impl DecisionTtl {
    pub const DEFAULT_GRANTED_SECS: u64 = 15 * 60;
    pub const DEFAULT_FOUND_BUT_DENIED_SECS: u64 = 5 * 60;
    pub const DEFAULT_NOT_FOUND_SECS: u64 = 10 * 60;

    pub fn for_outcome(&self, outcome: Outcome) -> u64 {
        match outcome {
            Outcome::Granted => self.granted,
            Outcome::FoundButDenied => self.found_but_denied,
            Outcome::NotFound => self.not_found,
        }
    }
}

impl Default for DecisionTtl {
    fn default() -> Self {
        Self {
            granted: Self::DEFAULT_GRANTED_SECS,
            found_but_denied: Self::DEFAULT_FOUND_BUT_DENIED_SECS,
            not_found: Self::DEFAULT_NOT_FOUND_SECS,
        }
    }
}
