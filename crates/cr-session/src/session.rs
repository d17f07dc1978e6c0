//! The immutable session snapshot consumed by both report builders.

use crate::job::Job;
use crate::outcome::Outcome;
use crate::resource::Resource;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome record produced by running a job.
///
/// `io_log` holds the flattened textual log for ordinary jobs and doubles as
/// the raw payload for attachment and resource jobs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobResult {
    pub outcome: Outcome,
    /// Free-text operator comments.
    pub comments: Option<String>,
    /// Flattened log text or raw attachment payload.
    pub io_log: String,
}

/// Pairing of a job definition with its result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobState {
    pub job: Job,
    pub result: JobResult,
}

impl JobState {
    pub fn new(job: Job, result: JobResult) -> Self {
        Self { job, result }
    }

    /// Whether this state participates in listings and aggregates.
    pub fn is_counted(&self) -> bool {
        self.result.outcome.is_counted()
    }
}

/// Session-level metadata supplied by the test runner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionMeta {
    /// Active test plan name, if one was selected.
    pub test_plan: Option<String>,
    /// Version of the tool that ran the session.
    pub tool_version: String,
    /// ISO-like timestamp, `<year>-...` shaped.
    pub timestamp: String,
}

impl SessionMeta {
    /// Timestamp formatted for display, falling back to the raw string when
    /// it does not parse as an ISO date-time.
    pub fn display_timestamp(&self) -> String {
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(&self.timestamp, fmt) {
                return dt.format("%Y-%m-%d %H:%M").to_string();
            }
        }
        self.timestamp.clone()
    }
}

/// Fully-populated, immutable snapshot of a finished session.
///
/// All three lookup structures are `BTreeMap`s, so iteration is lexicographic
/// by key. Job-state iteration order is exactly the mandated rendering order.
/// The builders take `&SessionSnapshot` and never mutate it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Resource-kind key to ordered resource records.
    pub resources: BTreeMap<String, Vec<Resource>>,
    /// Job id to job state.
    pub job_states: BTreeMap<String, JobState>,
    /// Category id to display name, covering every category any job uses.
    pub categories: BTreeMap<String, String>,
    /// Session metadata.
    pub meta: SessionMeta,
}

impl SessionSnapshot {
    /// Resources of one kind, empty when the kind was never collected.
    pub fn resources_of(&self, kind: &str) -> &[Resource] {
        self.resources.get(kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First resource of one kind.
    pub fn first_resource(&self, kind: &str) -> Option<&Resource> {
        self.resources_of(kind).first()
    }

    /// Job state by full job id.
    pub fn job_state(&self, id: &str) -> Option<&JobState> {
        self.job_states.get(id)
    }

    /// Category display name by id.
    pub fn category_name(&self, id: &str) -> Option<&str> {
        self.categories.get(id).map(String::as_str)
    }

    /// Job states in lexicographic id order.
    pub fn ordered_job_states(&self) -> impl Iterator<Item = &JobState> {
        self.job_states.values()
    }
}
