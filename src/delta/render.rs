//! Report rendering.
//!
//! Turns an aggregated delta report into the single text document filed
//! with the tracker. Rendering is byte-deterministic: the same report
//! always produces identical text, with no timestamps and no reordering.

use serde::Serialize;

use crate::{
    delta::types::{DeltaReport, PullRequest},
    result::Result,
};

/// Default report body template (tera syntax). Sections use the tracker's
/// wiki markup; repositories without qualifying pull requests are omitted
/// before the template runs.
pub const DEFAULT_REPORT_BODY: &str = r#"{% for section in sections %}h3. *Changes introduced for repo {{ section.repo }}*
Changes are between upstream tags {{ section.previous }}...{{ section.target }}

{% for pr in section.prs %}* {{ pr.title }}
{{ pr.url }}
{% endfor %}
{% endfor %}This issue was auto generated."#;

#[derive(Debug, Serialize)]
struct SectionContext {
    repo: String,
    previous: String,
    target: String,
    prs: Vec<PullRequest>,
}

#[derive(Debug, Serialize)]
struct ReportContext {
    sections: Vec<SectionContext>,
}

/// Render the report document. Only repositories with at least one
/// qualifying pull request get a section; the trailer line is fixed.
pub fn render_report(report: &DeltaReport, body: &str) -> Result<String> {
    let sections = report
        .repos
        .iter()
        .filter(|delta| !delta.prs.is_empty())
        .map(|delta| SectionContext {
            repo: delta.spec.full_name(),
            previous: delta.spec.previous.clone(),
            target: delta.spec.target.clone(),
            prs: delta.prs.clone(),
        })
        .collect::<Vec<SectionContext>>();

    let context = tera::Context::from_serialize(&ReportContext { sections })?;
    let rendered = tera::Tera::one_off(body, &context, false)?;

    Ok(rendered)
}
