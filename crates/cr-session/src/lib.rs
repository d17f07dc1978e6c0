//! Certification session model shared across the report crates.
//!
//! This crate provides the immutable snapshot types the report builders
//! consume:
//! - Job definitions, results, and their pairing ([`JobState`])
//! - Structured resource records with deterministic attribute ordering
//! - The outcome vocabulary and its static display metadata
//! - The fully-populated [`SessionSnapshot`] handed to both builders

pub mod job;
pub mod outcome;
pub mod resource;
pub mod session;

pub use job::{CertificationStatus, Job, PluginKind};
pub use outcome::{Outcome, OutcomeInfo, OUTCOME_METADATA};
pub use resource::Resource;
pub use session::{JobResult, JobState, SessionMeta, SessionSnapshot};
