//! Job definitions: identity, plugin kind, and certification-status hints.

use serde::{Deserialize, Serialize};

/// Execution category of a job, determining how it is grouped in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PluginKind {
    Shell,
    Manual,
    Resource,
    Attachment,
    UserInteract,
    UserVerify,
}

impl PluginKind {
    /// Jobs of these kinds are listed in dedicated report sections instead of
    /// the per-category results tables.
    pub fn is_sidelined(&self) -> bool {
        matches!(self, PluginKind::Resource | PluginKind::Attachment)
    }
}

/// Certification-status hint attached to a job.
///
/// `Unspecified` is a distinguished sentinel: display columns render it as an
/// empty cell while JSON always carries the literal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CertificationStatus {
    #[default]
    Unspecified,
    Blocker,
    NonBlocker,
}

impl CertificationStatus {
    /// Serialized token, also used verbatim in the JSON document.
    pub fn token(&self) -> &'static str {
        match self {
            CertificationStatus::Unspecified => "unspecified",
            CertificationStatus::Blocker => "blocker",
            CertificationStatus::NonBlocker => "non-blocker",
        }
    }

    /// Display form: blank for the unspecified sentinel.
    pub fn display(&self) -> &'static str {
        match self {
            CertificationStatus::Unspecified => "",
            other => other.token(),
        }
    }
}

/// Static job definition, owned by the test plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Fully-qualified job id, possibly carrying a `namespace::` prefix.
    pub id: String,
    /// Human-readable one-line summary.
    pub summary: String,
    /// Plugin kind.
    pub plugin: PluginKind,
    /// Declared category id.
    pub category_id: String,
    /// Declared certification-status hint.
    pub certification_status: CertificationStatus,
}

impl Job {
    /// Job id with any namespace prefix stripped.
    pub fn partial_id(&self) -> &str {
        match self.id.rsplit_once("::") {
            Some((_, partial)) => partial,
            None => &self.id,
        }
    }
}
