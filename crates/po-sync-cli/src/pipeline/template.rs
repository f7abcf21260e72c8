//! Template generation with staleness detection.

use super::{SourceFileSet, TemplateStamp, modified_time};
use crate::core::{CliError, Project, TemplateStatus};
use crate::toolchain::{ExtractRequest, Toolchain};

/// Regenerate `<package>.pot` unless it is already current.
///
/// The template is current when it exists, the recorded inputs digest matches
/// the current one, and no source file is newer than the template. Extraction
/// failures are returned unchanged so the caller can exit with the tool's status.
pub fn ensure_template(
    project: &Project,
    sources: &SourceFileSet,
    toolchain: &dyn Toolchain,
    force: bool,
) -> Result<TemplateStatus, CliError> {
    let template = project.template_path();
    let inputs_hash = TemplateStamp::compute_hash(&project.root, sources);

    if !force && is_up_to_date(project, sources, &inputs_hash) {
        tracing::debug!(template = %template.display(), "template is up to date, skipping extraction");
        return Ok(TemplateStatus::UpToDate);
    }

    let manifest = project.manifest_path();
    tracing::info!(template = %template.display(), sources = sources.len(), "extracting template");
    toolchain.extract(&ExtractRequest {
        po_dir: &project.po_dir,
        manifest: &manifest,
        package: &project.package,
        output: &template,
    })?;

    TemplateStamp { inputs_hash }.save(&project.state_dir())?;
    Ok(TemplateStatus::Regenerated)
}

fn is_up_to_date(project: &Project, sources: &SourceFileSet, inputs_hash: &str) -> bool {
    let Some(template_mtime) = modified_time(&project.template_path()) else {
        return false;
    };

    let stamp_matches = TemplateStamp::load(&project.state_dir())
        .is_some_and(|stamp| stamp.inputs_hash == inputs_hash);
    if !stamp_matches {
        return false;
    }

    sources.files().iter().all(|path| {
        modified_time(&project.root.join(path)).is_some_and(|mtime| mtime <= template_mtime)
    })
}
