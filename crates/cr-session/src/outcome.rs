//! Outcome vocabulary and its static display metadata.
//!
//! Outcomes are the classification of a finished job. The metadata table maps
//! every outcome to a fixed chart color and human-readable label; the report
//! builders consume it, they never invent their own.

use serde::{Deserialize, Serialize};

/// Result classification of a job run.
///
/// `None` means the job was never run (or was not applicable); such job
/// states are excluded from every results listing and every aggregate count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    Pass,
    Fail,
    Skip,
    Crash,
    NotSupported,
    Undecided,
    #[default]
    None,
}

impl Outcome {
    /// Raw outcome token as it appears in session data.
    pub fn token(&self) -> &'static str {
        match self {
            Outcome::Pass => "pass",
            Outcome::Fail => "fail",
            Outcome::Skip => "skip",
            Outcome::Crash => "crash",
            Outcome::NotSupported => "not-supported",
            Outcome::Undecided => "undecided",
            Outcome::None => "none",
        }
    }

    /// Whether this outcome participates in listings and aggregates.
    pub fn is_counted(&self) -> bool {
        !matches!(self, Outcome::None)
    }

    /// Display metadata for this outcome.
    pub fn info(&self) -> &'static OutcomeInfo {
        // Indexes follow the table's token dictionary order.
        let idx = match self {
            Outcome::Crash => 0,
            Outcome::Fail => 1,
            Outcome::None => 2,
            Outcome::NotSupported => 3,
            Outcome::Pass => 4,
            Outcome::Skip => 5,
            Outcome::Undecided => 6,
        };
        &OUTCOME_METADATA[idx]
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Fixed display metadata for one outcome kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeInfo {
    pub outcome: Outcome,
    /// Human-facing label, distinct from the raw token.
    pub label: &'static str,
    /// Chart/badge color.
    pub color: &'static str,
}

/// Static outcome metadata, kept in dictionary order of the raw token so
/// chart segment ordering falls out of a plain iteration.
pub const OUTCOME_METADATA: &[OutcomeInfo] = &[
    OutcomeInfo {
        outcome: Outcome::Crash,
        label: "crashed",
        color: "#990000",
    },
    OutcomeInfo {
        outcome: Outcome::Fail,
        label: "failed",
        color: "#dc3912",
    },
    OutcomeInfo {
        outcome: Outcome::None,
        label: "not started",
        color: "#999999",
    },
    OutcomeInfo {
        outcome: Outcome::NotSupported,
        label: "not supported",
        color: "#4a86e8",
    },
    OutcomeInfo {
        outcome: Outcome::Pass,
        label: "passed",
        color: "#6aa84f",
    },
    OutcomeInfo {
        outcome: Outcome::Skip,
        label: "skipped",
        color: "#ff9900",
    },
    OutcomeInfo {
        outcome: Outcome::Undecided,
        label: "undecided",
        color: "#9900ff",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_is_in_token_dictionary_order() {
        let tokens: Vec<&str> = OUTCOME_METADATA.iter().map(|m| m.outcome.token()).collect();
        let mut sorted = tokens.clone();
        sorted.sort_unstable();
        assert_eq!(tokens, sorted);
    }

    #[test]
    fn every_outcome_has_metadata() {
        for outcome in [
            Outcome::Pass,
            Outcome::Fail,
            Outcome::Skip,
            Outcome::Crash,
            Outcome::NotSupported,
            Outcome::Undecided,
            Outcome::None,
        ] {
            assert_eq!(outcome.info().outcome, outcome);
        }
    }

    #[test]
    fn none_is_not_counted() {
        assert!(!Outcome::None.is_counted());
        assert!(Outcome::Pass.is_counted());
    }
}
