use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task category assigned to a description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Feature,
    Bugfix,
    Refactor,
    Documentation,
    Test,
}

impl Intent {
    pub const ALL: [Intent; 5] = [
        Intent::Feature,
        Intent::Bugfix,
        Intent::Refactor,
        Intent::Documentation,
        Intent::Test,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Feature => "feature",
            Intent::Bugfix => "bugfix",
            Intent::Refactor => "refactor",
            Intent::Documentation => "documentation",
            Intent::Test => "test",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intent::ALL
            .into_iter()
            .find(|intent| intent.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown intent: {s}"))
    }
}

/// Structured view of a free-text development task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDescription {
    pub title: String,
    pub description: String,
    pub intent: Intent,
    /// Keyword tokens in first-occurrence order, without duplicates
    pub scope: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_round_trips_through_str() {
        for intent in Intent::ALL {
            assert_eq!(intent.to_string().parse::<Intent>(), Ok(intent));
        }
        assert_eq!("BugFix".parse::<Intent>(), Ok(Intent::Bugfix));
        assert!("chore".parse::<Intent>().is_err());
    }
}
