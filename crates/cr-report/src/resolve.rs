//! Effective category and certification-status resolution.
//!
//! Test plans may remap a job's category (e.g. to bundle jobs into a
//! meta-category for display) or narrow/widen its certification status. The
//! override tables are opaque inputs: declared value unless a per-job-id
//! entry says otherwise, nothing more is inferred.

use cr_session::{CertificationStatus, Job};
use std::collections::BTreeMap;

/// Resolved per-job values used for display and serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Effective category id.
    pub category_id: String,
    /// Effective certification status.
    pub certification_status: CertificationStatus,
}

/// Pure resolver over test-plan-supplied override tables.
///
/// Both report builders call [`StatusResolver::resolve`] independently;
/// resolution has no side effects and is idempotent, so they always agree.
#[derive(Debug, Clone, Default)]
pub struct StatusResolver {
    category_overrides: BTreeMap<String, String>,
    status_overrides: BTreeMap<String, CertificationStatus>,
}

impl StatusResolver {
    /// Build a resolver from test-plan override tables, both keyed by full
    /// job id.
    pub fn new(
        category_overrides: BTreeMap<String, String>,
        status_overrides: BTreeMap<String, CertificationStatus>,
    ) -> Self {
        Self {
            category_overrides,
            status_overrides,
        }
    }

    /// Effective (category id, certification status) for one job.
    pub fn resolve(&self, job: &Job) -> Resolution {
        let category_id = self
            .category_overrides
            .get(&job.id)
            .cloned()
            .unwrap_or_else(|| job.category_id.clone());
        let certification_status = self
            .status_overrides
            .get(&job.id)
            .copied()
            .unwrap_or(job.certification_status);
        Resolution {
            category_id,
            certification_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cr_session::PluginKind;

    fn job(id: &str, category: &str, status: CertificationStatus) -> Job {
        Job {
            id: id.to_string(),
            summary: id.to_string(),
            plugin: PluginKind::Shell,
            category_id: category.to_string(),
            certification_status: status,
        }
    }

    #[test]
    fn defaults_to_declared_values() {
        let resolver = StatusResolver::default();
        let j = job("audio/playback", "audio", CertificationStatus::Blocker);
        let r = resolver.resolve(&j);
        assert_eq!(r.category_id, "audio");
        assert_eq!(r.certification_status, CertificationStatus::Blocker);
    }

    #[test]
    fn overrides_take_precedence() {
        let mut categories = BTreeMap::new();
        categories.insert("audio/playback".to_string(), "multimedia".to_string());
        let mut statuses = BTreeMap::new();
        statuses.insert("audio/playback".to_string(), CertificationStatus::NonBlocker);
        let resolver = StatusResolver::new(categories, statuses);

        let j = job("audio/playback", "audio", CertificationStatus::Blocker);
        let r = resolver.resolve(&j);
        assert_eq!(r.category_id, "multimedia");
        assert_eq!(r.certification_status, CertificationStatus::NonBlocker);
    }

    #[test]
    fn resolution_is_idempotent() {
        let resolver = StatusResolver::default();
        let j = job("net/ping", "network", CertificationStatus::Unspecified);
        assert_eq!(resolver.resolve(&j), resolver.resolve(&j));
    }
}
