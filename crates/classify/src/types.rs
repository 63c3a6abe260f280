use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a *new* piece of text relates to an *existing* one.
///
/// Exactly one label per ordered pair; the relation is not symmetric
/// (`Contains` seen from one side is `ContainedBy` from the other).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipClassification {
    /// Near-duplicate. Also the conservative fallback when a provider
    /// answer cannot be interpreted or an input is degenerate.
    #[default]
    Similar,
    /// The new text subsumes the existing one.
    Contains,
    /// The existing text subsumes the new one.
    ContainedBy,
    /// The two statements cannot both hold.
    Contradicts,
    /// No meaningful semantic relation.
    Unrelated,
}

impl RelationshipClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Similar => "similar",
            Self::Contains => "contains",
            Self::ContainedBy => "contained-by",
            Self::Contradicts => "contradicts",
            Self::Unrelated => "unrelated",
        }
    }

    /// All canonical labels, for validation and docs.
    pub const ALL: [Self; 5] = [
        Self::Similar,
        Self::Contains,
        Self::ContainedBy,
        Self::Contradicts,
        Self::Unrelated,
    ];
}

impl fmt::Display for RelationshipClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationshipClassification {
    type Err = UnknownLabel;

    /// Strict parse of a canonical label. Underscore spelling is accepted
    /// because providers are inconsistent about `contained-by`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "similar" => Ok(Self::Similar),
            "contains" => Ok(Self::Contains),
            "contained-by" | "contained_by" => Ok(Self::ContainedBy),
            "contradicts" => Ok(Self::Contradicts),
            "unrelated" => Ok(Self::Unrelated),
            other => Err(UnknownLabel(other.to_string())),
        }
    }
}

/// A provider answered with a label outside the canonical set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel(pub String);

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown relationship label: {}", self.0)
    }
}

impl std::error::Error for UnknownLabel {}
