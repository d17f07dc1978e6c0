//! JSON submission document builder.
//!
//! Produces a single top-level object, complete-or-fail: if any traversal
//! fails the whole build fails and nothing is emitted. serde_json's default
//! map is BTree-backed, so every object in the document has sorted keys.

use crate::error::{ReportError, Result};
use crate::resolve::StatusResolver;
use cr_session::{JobState, Outcome, SessionSnapshot};
use serde_json::{json, Map, Value};
use tracing::{debug, info};

/// How a well-known attachment payload is embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PayloadKind {
    /// Payload is parsed and re-embedded as a raw JSON subtree.
    Json,
    /// Payload text becomes a JSON string value.
    Text,
    /// Only the payload's second line becomes a JSON string value.
    SecondLine,
}

/// One entry of the attachment passthrough table.
struct AttachmentSection {
    /// Well-known job id, matched against namespace-stripped ids.
    job_id: &'static str,
    /// Top-level key in the submission document.
    section: &'static str,
    payload: PayloadKind,
}

/// Well-known attachment jobs embedded verbatim into the submission,
/// consulted once per build.
const ATTACHMENT_SECTIONS: &[AttachmentSection] = &[
    AttachmentSection {
        job_id: "dkms_info_json",
        section: "dkms_info",
        payload: PayloadKind::Json,
    },
    AttachmentSection {
        job_id: "udev_json",
        section: "devices",
        payload: PayloadKind::Json,
    },
    AttachmentSection {
        job_id: "raw_devices_dmi_json",
        section: "raw-devices-dmi",
        payload: PayloadKind::Json,
    },
    AttachmentSection {
        job_id: "modprobe_json",
        section: "modprobe-info",
        payload: PayloadKind::Json,
    },
    AttachmentSection {
        job_id: "pci_subsystem_id",
        section: "pci_subsystem_id",
        payload: PayloadKind::Text,
    },
    AttachmentSection {
        job_id: "bto_info",
        section: "bto-info",
        payload: PayloadKind::Text,
    },
    AttachmentSection {
        job_id: "image_version",
        section: "image-version",
        payload: PayloadKind::Text,
    },
    AttachmentSection {
        job_id: "buildstamp",
        section: "buildstamp",
        payload: PayloadKind::SecondLine,
    },
    AttachmentSection {
        job_id: "kernel_cmdline",
        section: "kernel-cmdline",
        payload: PayloadKind::Text,
    },
];

/// Builder for the machine-readable JSON submission document.
pub struct JsonReportBuilder<'a> {
    session: &'a SessionSnapshot,
    resolver: &'a StatusResolver,
}

impl<'a> JsonReportBuilder<'a> {
    pub fn new(session: &'a SessionSnapshot, resolver: &'a StatusResolver) -> Self {
        Self { session, resolver }
    }

    /// Build the submission document. Every section is conditionally present
    /// based on data availability; a malformed well-known JSON payload or an
    /// unresolved category aborts the whole build.
    pub fn build(&self) -> Result<Value> {
        debug!("building JSON submission document");
        let mut doc = Map::new();

        self.add_packages(&mut doc);
        self.add_snap_packages(&mut doc);
        self.add_distribution(&mut doc);
        let result_count = self.add_results(&mut doc)?;
        self.add_attachments(&mut doc)?;
        self.add_scalar_facts(&mut doc);

        info!(
            results = result_count,
            sections = doc.len(),
            "JSON submission document built"
        );
        Ok(Value::Object(doc))
    }

    /// Build and serialize in one step.
    pub fn build_string(&self) -> Result<String> {
        let doc = self.build()?;
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    fn add_packages(&self, doc: &mut Map<String, Value>) {
        let packages: Vec<Value> = self
            .session
            .resources_of("package")
            .iter()
            .filter_map(|res| {
                let name = res.name()?;
                Some(json!({
                    "name": name,
                    "version": res.get("version").unwrap_or(""),
                }))
            })
            .collect();
        if !packages.is_empty() {
            doc.insert("packages".to_string(), Value::Array(packages));
        }
    }

    fn add_snap_packages(&self, doc: &mut Map<String, Value>) {
        let snaps: Vec<Value> = self
            .session
            .resources_of("snap")
            .iter()
            .filter(|res| res.name().is_some())
            .map(|res| {
                let attrs: Map<String, Value> = res
                    .attrs()
                    .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                    .collect();
                Value::Object(attrs)
            })
            .collect();
        if !snaps.is_empty() {
            doc.insert("snap-packages".to_string(), Value::Array(snaps));
        }
    }

    fn add_distribution(&self, doc: &mut Map<String, Value>) {
        if let Some(lsb) = self.session.first_resource("lsb") {
            let attrs: Map<String, Value> = lsb
                .attrs()
                .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                .collect();
            doc.insert("distribution".to_string(), Value::Object(attrs));
        }
    }

    fn add_results(&self, doc: &mut Map<String, Value>) -> Result<usize> {
        let mut results = Vec::new();
        // BTreeMap iteration keeps results in lexicographic raw-id order.
        for state in self.session.ordered_job_states() {
            if !state.is_counted() || state.job.plugin.is_sidelined() {
                continue;
            }
            results.push(self.result_record(state)?);
        }
        let count = results.len();
        if !results.is_empty() {
            doc.insert("results".to_string(), Value::Array(results));
        }
        Ok(count)
    }

    fn result_record(&self, state: &JobState) -> Result<Value> {
        let resolution = self.resolver.resolve(&state.job);
        if self.session.category_name(&resolution.category_id).is_none() {
            return Err(ReportError::UnresolvedCategory {
                job_id: state.job.id.clone(),
                category_id: resolution.category_id,
            });
        }
        Ok(json!({
            "id": state.job.partial_id(),
            "name": state.job.summary,
            "certification_status": resolution.certification_status.token(),
            "category": resolution.category_id,
            "status": state.result.outcome.info().label,
            "comments": state.result.comments.as_deref().unwrap_or(""),
            "io_log": state.result.io_log,
            "type": "test",
            "project": "certification",
        }))
    }

    fn add_attachments(&self, doc: &mut Map<String, Value>) -> Result<()> {
        for entry in ATTACHMENT_SECTIONS {
            let Some(state) = self.find_by_partial_id(entry.job_id) else {
                continue;
            };
            // Present but unsuccessful attachments are silently omitted.
            if state.result.outcome != Outcome::Pass {
                continue;
            }
            let payload = &state.result.io_log;
            let value = match entry.payload {
                PayloadKind::Json => serde_json::from_str(payload).map_err(|source| {
                    ReportError::MalformedAttachment {
                        job_id: state.job.id.clone(),
                        source,
                    }
                })?,
                PayloadKind::Text => Value::String(payload.trim_end().to_string()),
                PayloadKind::SecondLine => {
                    Value::String(payload.lines().nth(1).unwrap_or("").trim_end().to_string())
                }
            };
            doc.insert(entry.section.to_string(), value);
        }
        Ok(())
    }

    fn add_scalar_facts(&self, doc: &mut Map<String, Value>) {
        if let Some(release) = self
            .session
            .first_resource("uname")
            .and_then(|r| r.get("release"))
        {
            doc.insert("kernel".to_string(), Value::String(release.to_string()));
        }
        if let Some(arch) = self
            .session
            .first_resource("dpkg")
            .and_then(|r| r.get("architecture"))
        {
            doc.insert(
                "architecture".to_string(),
                Value::String(arch.to_string()),
            );
        }
        if let Some(meminfo) = self.session.first_resource("meminfo") {
            let mut memory = Map::new();
            for key in ["swap", "total"] {
                if let Some(raw) = meminfo.get(key) {
                    memory.insert(key.to_string(), numeric_or_string(raw));
                }
            }
            doc.insert("memory".to_string(), Value::Object(memory));
        }
        if let Some(cpuinfo) = self.session.first_resource("cpuinfo") {
            let attrs: Map<String, Value> = cpuinfo
                .attrs()
                .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                .collect();
            doc.insert("processor".to_string(), Value::Object(attrs));
        }
    }

    fn find_by_partial_id(&self, partial_id: &str) -> Option<&'a JobState> {
        self.session
            .ordered_job_states()
            .find(|s| s.job.partial_id() == partial_id)
    }
}

/// Embed resource numbers as JSON numbers, anything else as a string.
fn numeric_or_string(raw: &str) -> Value {
    match raw.parse::<u64>() {
        Ok(n) => Value::Number(n.into()),
        Err(_) => Value::String(raw.to_string()),
    }
}
