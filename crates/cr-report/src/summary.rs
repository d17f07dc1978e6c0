//! Outcome aggregation: per-category, global, and per-plugin-kind summaries.
//!
//! Also home of the shared grouping functions both builders use, so the JSON
//! and HTML documents always see the same categories in the same order with
//! the same rows.

use crate::error::{ReportError, Result};
use crate::resolve::StatusResolver;
use cr_session::{JobState, Outcome, PluginKind, SessionSnapshot, OUTCOME_METADATA};
use std::collections::BTreeMap;

/// One chart segment: an outcome kind with its count and display metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeSegment {
    pub outcome: Outcome,
    pub count: usize,
    pub label: &'static str,
    pub color: &'static str,
}

/// Aggregate outcome counts for one scope.
///
/// Segments are in dictionary order of the raw outcome token and only cover
/// outcomes that actually occurred; `none` is never counted. Recomputed on
/// demand and referentially transparent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeSummary {
    pub segments: Vec<OutcomeSegment>,
}

impl OutcomeSummary {
    /// Count outcomes over any set of job states.
    pub fn of<'a, I>(states: I) -> Self
    where
        I: IntoIterator<Item = &'a JobState>,
    {
        let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
        for state in states {
            if state.is_counted() {
                *counts.entry(state.result.outcome.token()).or_default() += 1;
            }
        }
        // OUTCOME_METADATA is already in token dictionary order.
        let segments = OUTCOME_METADATA
            .iter()
            .filter_map(|info| {
                counts.get(info.outcome.token()).map(|&count| OutcomeSegment {
                    outcome: info.outcome,
                    count,
                    label: info.label,
                    color: info.color,
                })
            })
            .collect();
        Self { segments }
    }

    /// Total counted job states in this scope.
    pub fn total(&self) -> usize {
        self.segments.iter().map(|s| s.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Global summary over every counted job state in the session.
pub fn global_summary(session: &SessionSnapshot) -> OutcomeSummary {
    OutcomeSummary::of(session.ordered_job_states())
}

/// Summary restricted to one plugin kind.
pub fn kind_summary(session: &SessionSnapshot, kind: PluginKind) -> OutcomeSummary {
    OutcomeSummary::of(kind_states(session, kind))
}

/// Counted job states of one plugin kind, in lexicographic job id order.
pub fn kind_states(session: &SessionSnapshot, kind: PluginKind) -> Vec<&JobState> {
    session
        .ordered_job_states()
        .filter(|s| s.job.plugin == kind && s.is_counted())
        .collect()
}

/// One category with its rows, as rendered by both builders.
#[derive(Debug, Clone)]
pub struct CategoryGroup<'a> {
    pub id: String,
    pub name: String,
    /// Counted, non-resource, non-attachment job states in lexicographic
    /// job id order.
    pub states: Vec<&'a JobState>,
}

impl CategoryGroup<'_> {
    pub fn summary(&self) -> OutcomeSummary {
        OutcomeSummary::of(self.states.iter().copied())
    }
}

/// Group counted test-job states by effective category.
///
/// Categories are ordered by display name (then id for identical names) for
/// stable human-facing ordering; rows within a category keep lexicographic
/// job id order. An effective category id missing from the category map is a
/// fatal upstream defect.
pub fn group_by_category<'a>(
    session: &'a SessionSnapshot,
    resolver: &StatusResolver,
) -> Result<Vec<CategoryGroup<'a>>> {
    let mut by_id: BTreeMap<String, Vec<&'a JobState>> = BTreeMap::new();
    for state in session.ordered_job_states() {
        if !state.is_counted() || state.job.plugin.is_sidelined() {
            continue;
        }
        let resolution = resolver.resolve(&state.job);
        if session.category_name(&resolution.category_id).is_none() {
            return Err(ReportError::UnresolvedCategory {
                job_id: state.job.id.clone(),
                category_id: resolution.category_id,
            });
        }
        by_id.entry(resolution.category_id).or_default().push(state);
    }

    let mut groups: Vec<CategoryGroup<'a>> = by_id
        .into_iter()
        .map(|(id, states)| {
            let name = session
                .category_name(&id)
                .unwrap_or_default()
                .to_string();
            CategoryGroup { id, name, states }
        })
        .collect();
    groups.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cr_session::{CertificationStatus, Job, JobResult};

    fn state(id: &str, category: &str, plugin: PluginKind, outcome: Outcome) -> JobState {
        JobState::new(
            Job {
                id: id.to_string(),
                summary: id.to_string(),
                plugin,
                category_id: category.to_string(),
                certification_status: CertificationStatus::Unspecified,
            },
            JobResult {
                outcome,
                comments: None,
                io_log: String::new(),
            },
        )
    }

    fn session_with(states: Vec<JobState>) -> SessionSnapshot {
        let mut session = SessionSnapshot::default();
        session
            .categories
            .insert("audio".to_string(), "Audio tests".to_string());
        session
            .categories
            .insert("net".to_string(), "Network tests".to_string());
        for s in states {
            session.job_states.insert(s.job.id.clone(), s);
        }
        session
    }

    #[test]
    fn none_outcomes_are_never_counted() {
        let session = session_with(vec![
            state("a", "audio", PluginKind::Shell, Outcome::Pass),
            state("b", "audio", PluginKind::Shell, Outcome::None),
        ]);
        let summary = global_summary(&session);
        assert_eq!(summary.total(), 1);
        assert_eq!(summary.segments[0].outcome, Outcome::Pass);
    }

    #[test]
    fn segments_follow_token_dictionary_order() {
        let session = session_with(vec![
            state("a", "audio", PluginKind::Shell, Outcome::Skip),
            state("b", "audio", PluginKind::Shell, Outcome::Fail),
            state("c", "audio", PluginKind::Shell, Outcome::Pass),
        ]);
        let tokens: Vec<&str> = global_summary(&session)
            .segments
            .iter()
            .map(|s| s.outcome.token())
            .collect();
        assert_eq!(tokens, vec!["fail", "pass", "skip"]);
    }

    #[test]
    fn categories_sort_by_display_name() {
        // "net" sorts before "audio" by id but after it by display name.
        let session = session_with(vec![
            state("n1", "net", PluginKind::Shell, Outcome::Pass),
            state("a1", "audio", PluginKind::Shell, Outcome::Pass),
        ]);
        let groups = group_by_category(&session, &StatusResolver::default()).unwrap();
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Audio tests", "Network tests"]);
    }

    #[test]
    fn sidelined_kinds_are_excluded_from_categories() {
        let session = session_with(vec![
            state("a1", "audio", PluginKind::Shell, Outcome::Pass),
            state("a2", "audio", PluginKind::Resource, Outcome::Pass),
            state("a3", "audio", PluginKind::Attachment, Outcome::Pass),
        ]);
        let groups = group_by_category(&session, &StatusResolver::default()).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].states.len(), 1);
        assert_eq!(kind_states(&session, PluginKind::Resource).len(), 1);
        assert_eq!(kind_summary(&session, PluginKind::Attachment).total(), 1);
    }

    #[test]
    fn unknown_category_is_fatal() {
        let mut session = session_with(vec![]);
        let s = state("x", "ghost", PluginKind::Shell, Outcome::Pass);
        session.job_states.insert(s.job.id.clone(), s);
        let err = group_by_category(&session, &StatusResolver::default()).unwrap_err();
        assert!(matches!(
            err,
            ReportError::UnresolvedCategory { ref category_id, .. } if category_id == "ghost"
        ));
    }

    #[test]
    fn aggregation_is_referentially_transparent() {
        let session = session_with(vec![
            state("a", "audio", PluginKind::Shell, Outcome::Pass),
            state("b", "net", PluginKind::Shell, Outcome::Fail),
        ]);
        assert_eq!(global_summary(&session), global_summary(&session));
    }
}
