//! Configuration for named constructor resolvers.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Canonical case that schema names, discriminator columns and
/// discriminator values are folded to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseFold {
    /// Fold to lower case
    #[default]
    Lower,
    /// Fold to upper case
    Upper,
}

impl CaseFold {
    /// Fold `value` to this case
    #[must_use]
    pub fn apply(self, value: &str) -> String {
        match self {
            Self::Lower => value.to_lowercase(),
            Self::Upper => value.to_uppercase(),
        }
    }
}

/// How resolution treats two equal-size schemas that both match a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityPolicy {
    /// The schema declared first wins
    #[default]
    DeclarationOrder,
    /// Fail with an ambiguity error
    Reject,
}

/// Configuration for the resolvers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Canonical case for names and discriminators
    pub case_fold: CaseFold,
    /// Tie handling between equal-size matching schemas
    pub ambiguity: AmbiguityPolicy,
    /// Log every schema resolution at trace level
    pub log_resolutions: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            case_fold: CaseFold::Lower,
            ambiguity: AmbiguityPolicy::DeclarationOrder,
            log_resolutions: false,
        }
    }
}

impl MapperConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub const fn with_case_fold(mut self, case_fold: CaseFold) -> Self {
        self.case_fold = case_fold;
        self
    }

    #[must_use]
    pub const fn with_ambiguity(mut self, ambiguity: AmbiguityPolicy) -> Self {
        self.ambiguity = ambiguity;
        self
    }

    #[must_use]
    pub const fn with_log_resolutions(mut self, log_resolutions: bool) -> Self {
        self.log_resolutions = log_resolutions;
        self
    }
}
