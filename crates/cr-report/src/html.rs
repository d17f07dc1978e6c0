//! Self-contained HTML report builder.
//!
//! One page, styles and scripts inline: header, outcome pie chart, one
//! collapsible section per category, a resources section, an attachments
//! section, and anchored detail sub-pages for every row with a non-empty log.
//!
//! Both the summary-table pass and the detail-page pass run over the same
//! [`SectionLayout`], so a row links to a detail sub-page exactly when that
//! sub-page exists and their anchor ids match by construction.

use crate::error::Result;
use crate::resolve::StatusResolver;
use crate::summary::{global_summary, kind_states, kind_summary, CategoryGroup, OutcomeSummary};
use cr_session::{JobState, PluginKind, SessionSnapshot};
use tracing::{debug, info};

const TOOL_NAME: &str = "cert-report";

/// Anchor of the static packages listing sub-page.
const PACKAGES_ANCHOR: &str = "packages";

/// Partial id of the package-inventory resource job, whose detail link goes
/// to the static packages sub-page instead of a generated log page.
const PACKAGE_JOB_ID: &str = "package";

/// Shared ordering of every report section.
///
/// Categories occupy section indexes `1..=N` (sorted by display name), the
/// resources section is `N + 1`, attachments `N + 2`. Anchors are
/// `<sectionIndex>-<rowIndex>-log`, rows 1-based within their section.
struct SectionLayout<'a> {
    categories: Vec<CategoryGroup<'a>>,
    resources: Vec<&'a JobState>,
    attachments: Vec<&'a JobState>,
}

impl<'a> SectionLayout<'a> {
    fn compute(session: &'a SessionSnapshot, resolver: &StatusResolver) -> Result<Self> {
        Ok(Self {
            categories: crate::summary::group_by_category(session, resolver)?,
            resources: kind_states(session, PluginKind::Resource),
            attachments: kind_states(session, PluginKind::Attachment),
        })
    }

    fn anchor(section_index: usize, row_index: usize) -> String {
        format!("{}-{}-log", section_index, row_index + 1)
    }

    fn category_anchor(&self, category_index: usize, row_index: usize) -> String {
        Self::anchor(category_index + 1, row_index)
    }

    fn resource_anchor(&self, row_index: usize) -> String {
        Self::anchor(self.categories.len() + 1, row_index)
    }

    fn attachment_anchor(&self, row_index: usize) -> String {
        Self::anchor(self.categories.len() + 2, row_index)
    }
}

/// Builder for the human-browsable HTML report.
pub struct HtmlReportBuilder<'a> {
    session: &'a SessionSnapshot,
    resolver: &'a StatusResolver,
}

impl<'a> HtmlReportBuilder<'a> {
    pub fn new(session: &'a SessionSnapshot, resolver: &'a StatusResolver) -> Self {
        Self { session, resolver }
    }

    /// Build the report page. Fails only on unresolved categories; missing
    /// optional data just omits the affected section.
    pub fn build(&self) -> Result<String> {
        debug!("building HTML report document");
        let layout = SectionLayout::compute(self.session, self.resolver)?;

        let html = format!(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>System Certification Report</title>
<meta name="generator" content="{tool} {version}">
<style>
body {{
    font-family: ui-sans-serif, system-ui, sans-serif;
    color: #111827;
    max-width: 64rem;
    margin: 0 auto;
    padding: 1rem;
    line-height: 1.5;
}}
header p {{ color: #6b7280; margin: 0.25rem 0; }}
details.category {{
    border: 1px solid #e5e7eb;
    border-radius: 0.5rem;
    padding: 0.5rem 1rem;
    margin-bottom: 0.5rem;
}}
details.category > summary {{ cursor: pointer; font-weight: 600; }}
table {{ width: 100%; border-collapse: collapse; margin: 0.5rem 0; }}
th, td {{ text-align: left; padding: 0.25rem 0.5rem; border-bottom: 1px solid #e5e7eb; }}
section.detail {{
    border-top: 1px solid #e5e7eb;
    margin-top: 1rem;
    padding-top: 0.5rem;
}}
section.detail pre {{
    background: #f9fafb;
    border: 1px solid #e5e7eb;
    border-radius: 0.25rem;
    padding: 0.5rem;
    overflow-x: auto;
    white-space: pre-wrap;
}}
footer {{
    border-top: 1px solid #e5e7eb;
    margin-top: 2rem;
    padding-top: 0.5rem;
    color: #6b7280;
    font-size: 0.875rem;
    text-align: center;
}}
</style>
</head>
<body id="top">
{header}
{chart}
{categories}
{resources}
{attachments}
{details}
<footer>
<p>{tool} {version}</p>
<p>&copy; {year}</p>
</footer>
</body>
</html>
"##,
            tool = TOOL_NAME,
            version = html_escape(&self.session.meta.tool_version),
            header = self.render_header(),
            chart = self.render_chart(),
            categories = self.render_categories(&layout),
            resources = self.render_resources(&layout),
            attachments = self.render_attachments(&layout),
            details = self.render_details(&layout),
            year = copyright_year(&self.session.meta.timestamp),
        );

        info!(bytes = html.len(), "HTML report document built");
        Ok(html)
    }

    fn render_header(&self) -> String {
        let mut lines = String::new();
        if let Some(description) = self
            .session
            .first_resource("lsb")
            .and_then(|r| r.get("description"))
        {
            lines.push_str(&format!("<p>{}</p>\n", html_escape(description)));
        }
        if let Some(plan) = self.session.meta.test_plan.as_deref() {
            lines.push_str(&format!("<p>Test plan: {}</p>\n", html_escape(plan)));
        }
        format!(
            r#"<header>
<h1>System Certification Report</h1>
{lines}<p>Session: {timestamp}</p>
</header>"#,
            lines = lines,
            timestamp = html_escape(&self.session.meta.display_timestamp()),
        )
    }

    fn render_chart(&self) -> String {
        let summary = global_summary(self.session);
        if summary.is_empty() {
            return String::new();
        }
        let series: String = summary
            .segments
            .iter()
            .map(|s| {
                format!(
                    r#"{{value: {}, color: "{}", label: "{}"}}"#,
                    s.count, s.color, s.label
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            r##"<section id="summary">
<h2>Summary</h2>
<canvas id="outcome-chart" width="280" height="280"></canvas>
<script>
const OUTCOME_SERIES = [{series}];
(function () {{
    const canvas = document.getElementById('outcome-chart');
    if (!canvas || !canvas.getContext) return;
    const ctx = canvas.getContext('2d');
    const total = OUTCOME_SERIES.reduce((acc, s) => acc + s.value, 0);
    const cx = 110, cy = 140, r = 100;
    let start = -Math.PI / 2;
    for (const segment of OUTCOME_SERIES) {{
        const sweep = 2 * Math.PI * segment.value / total;
        ctx.beginPath();
        ctx.moveTo(cx, cy);
        ctx.arc(cx, cy, r, start, start + sweep);
        ctx.closePath();
        ctx.fillStyle = segment.color;
        ctx.fill();
        start += sweep;
    }}
    let ly = 20;
    for (const segment of OUTCOME_SERIES) {{
        ctx.fillStyle = segment.color;
        ctx.fillRect(225, ly - 8, 10, 10);
        ctx.fillStyle = '#111827';
        ctx.fillText(segment.label + ' (' + segment.value + ')', 240, ly);
        ly += 16;
    }}
}})();
</script>
</section>"##,
            series = series
        )
    }

    fn render_categories(&self, layout: &SectionLayout<'a>) -> String {
        let mut out = String::new();
        for (ci, group) in layout.categories.iter().enumerate() {
            let rows: String = group
                .states
                .iter()
                .enumerate()
                .map(|(ri, state)| {
                    let resolution = self.resolver.resolve(&state.job);
                    let link = if state.result.io_log.is_empty() {
                        String::new()
                    } else {
                        let anchor = layout.category_anchor(ci, ri);
                        format!(r##"<a href="#{anchor}">log</a>"##)
                    };
                    format!(
                        r#"<tr>
<td>{id}</td>
<td style="color: {color}">{outcome}</td>
<td>{status}</td>
<td>{link}</td>
<td>{comments}</td>
</tr>"#,
                        id = html_escape(state.job.partial_id()),
                        color = state.result.outcome.info().color,
                        outcome = state.result.outcome.info().label,
                        status = resolution.certification_status.display(),
                        link = link,
                        comments = html_escape(state.result.comments.as_deref().unwrap_or("")),
                    )
                })
                .collect();
            let badges = summary_badges(&group.summary());
            out.push_str(&format!(
                r#"<details class="category" open>
<summary>{name} &mdash; {badges}</summary>
<table>
<thead><tr><th>Test</th><th>Outcome</th><th>Certification status</th><th>Log</th><th>Comments</th></tr></thead>
<tbody>
{rows}
</tbody>
</table>
</details>
"#,
                name = html_escape(&group.name),
                badges = badges,
                rows = rows,
            ));
        }
        if out.is_empty() {
            out
        } else {
            format!("<section id=\"categories\">\n<h2>Test results</h2>\n{out}</section>")
        }
    }

    fn render_resources(&self, layout: &SectionLayout<'a>) -> String {
        let has_packages = !self.session.resources_of(PACKAGE_JOB_ID).is_empty();
        let rows: String = layout
            .resources
            .iter()
            .enumerate()
            .filter_map(|(ri, state)| {
                let link = if state.job.partial_id() == PACKAGE_JOB_ID {
                    // The package inventory links to the static packages page
                    // and has no row at all when no packages were collected.
                    if !has_packages {
                        return None;
                    }
                    format!(r##"<a href="#{PACKAGES_ANCHOR}">packages</a>"##)
                } else if state.result.io_log.is_empty() {
                    String::new()
                } else {
                    let anchor = layout.resource_anchor(ri);
                    format!(r##"<a href="#{anchor}">log</a>"##)
                };
                Some(format!(
                    r#"<tr>
<td>{id}</td>
<td style="color: {color}">{outcome}</td>
<td>{link}</td>
</tr>"#,
                    id = html_escape(state.job.partial_id()),
                    color = state.result.outcome.info().color,
                    outcome = state.result.outcome.info().label,
                    link = link,
                ))
            })
            .collect();
        if rows.is_empty() {
            return String::new();
        }
        let summary = summary_badges(&kind_summary(self.session, PluginKind::Resource));
        format!(
            r#"<section id="resources">
<h2>Resources</h2>
<p>{summary}</p>
<table>
<thead><tr><th>Resource</th><th>Outcome</th><th>Log</th></tr></thead>
<tbody>
{rows}
</tbody>
</table>
</section>"#
        )
    }

    fn render_attachments(&self, layout: &SectionLayout<'a>) -> String {
        if layout.attachments.is_empty() {
            return String::new();
        }
        let rows: String = layout
            .attachments
            .iter()
            .enumerate()
            .map(|(ri, state)| {
                let link = if state.result.io_log.is_empty() {
                    String::new()
                } else {
                    let anchor = layout.attachment_anchor(ri);
                    format!(r##"<a href="#{anchor}">log</a>"##)
                };
                format!(
                    r#"<tr>
<td>{id}</td>
<td style="color: {color}">{outcome}</td>
<td>{link}</td>
</tr>"#,
                    id = html_escape(state.job.partial_id()),
                    color = state.result.outcome.info().color,
                    outcome = state.result.outcome.info().label,
                    link = link,
                )
            })
            .collect();
        let summary = summary_badges(&kind_summary(self.session, PluginKind::Attachment));
        format!(
            r#"<section id="attachments">
<h2>Attachments</h2>
<p>{summary}</p>
<table>
<thead><tr><th>Attachment</th><th>Outcome</th><th>Log</th></tr></thead>
<tbody>
{rows}
</tbody>
</table>
</section>"#
        )
    }

    /// Detail sub-pages, driven by the same layout as the summary tables so
    /// every generated page has exactly one matching row link.
    fn render_details(&self, layout: &SectionLayout<'a>) -> String {
        let mut out = String::new();
        for (ci, group) in layout.categories.iter().enumerate() {
            for (ri, state) in group.states.iter().enumerate() {
                if state.result.io_log.is_empty() {
                    continue;
                }
                out.push_str(&detail_page(&layout.category_anchor(ci, ri), state));
            }
        }
        for (ri, state) in layout.resources.iter().enumerate() {
            if state.job.partial_id() == PACKAGE_JOB_ID || state.result.io_log.is_empty() {
                continue;
            }
            out.push_str(&detail_page(&layout.resource_anchor(ri), state));
        }
        for (ri, state) in layout.attachments.iter().enumerate() {
            if state.result.io_log.is_empty() {
                continue;
            }
            out.push_str(&detail_page(&layout.attachment_anchor(ri), state));
        }
        out.push_str(&self.render_packages_page());
        out
    }

    fn render_packages_page(&self) -> String {
        let packages = self.session.resources_of(PACKAGE_JOB_ID);
        let rows: String = packages
            .iter()
            .filter_map(|res| {
                let name = res.name()?;
                Some(format!(
                    "<tr><td>{}</td><td>{}</td></tr>\n",
                    html_escape(name),
                    html_escape(res.get("version").unwrap_or("")),
                ))
            })
            .collect();
        if rows.is_empty() {
            return String::new();
        }
        format!(
            r##"<section class="detail" id="{PACKAGES_ANCHOR}">
<h3>Installed packages</h3>
<table>
<thead><tr><th>Name</th><th>Version</th></tr></thead>
<tbody>
{rows}</tbody>
</table>
<p><a href="#top">back to top</a></p>
</section>
"##
        )
    }
}

/// Colored "N label" badges for a summary, segment order preserved.
fn summary_badges(summary: &OutcomeSummary) -> String {
    summary
        .segments
        .iter()
        .map(|s| {
            format!(
                r#"<span style="color: {}">{} {}</span>"#,
                s.color, s.count, s.label
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn detail_page(anchor: &str, state: &JobState) -> String {
    format!(
        r##"<section class="detail" id="{anchor}">
<h3>{id}</h3>
<pre>{log}</pre>
<p><a href="#top">back to top</a></p>
</section>
"##,
        anchor = anchor,
        id = html_escape(state.job.partial_id()),
        log = html_escape(&state.result.io_log),
    )
}

/// Copyright year: the portion of the session timestamp before its first
/// separator.
fn copyright_year(timestamp: &str) -> &str {
    timestamp
        .split_once(|c: char| !c.is_ascii_digit())
        .map(|(year, _)| year)
        .unwrap_or(timestamp)
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copyright_year_takes_leading_digits() {
        assert_eq!(copyright_year("2024-06-01T12:00:00"), "2024");
        assert_eq!(copyright_year("2024"), "2024");
    }

    #[test]
    fn anchors_are_one_based_per_section() {
        assert_eq!(SectionLayout::anchor(1, 0), "1-1-log");
        assert_eq!(SectionLayout::anchor(3, 4), "3-5-log");
    }

    #[test]
    fn html_escape_covers_markup() {
        assert_eq!(html_escape("<pre>"), "&lt;pre&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }

    #[test]
    fn empty_session_still_renders_shell() {
        let session = SessionSnapshot::default();
        let resolver = StatusResolver::default();
        let html = HtmlReportBuilder::new(&session, &resolver).build().unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("System Certification Report"));
        assert!(!html.contains("id=\"attachments\""));
    }
}
