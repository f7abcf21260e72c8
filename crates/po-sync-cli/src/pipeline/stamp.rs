//! Build state recorded between runs for staleness detection.
//!
//! The stamp lives in `<po_dir>/.po-sync/template.json` and stores a blake3
//! digest of everything the template was extracted from.

use super::SourceFileSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Inputs digest recorded after the last successful template extraction.
#[derive(Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TemplateStamp {
    /// Blake3 hash of the manifest text plus every listed source (path and content).
    pub inputs_hash: String,
}

impl TemplateStamp {
    const STAMP_FILE: &'static str = "template.json";

    /// Load the stamp from the state directory.
    pub fn load(state_dir: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(state_dir.join(Self::STAMP_FILE)).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Save the stamp to the state directory.
    pub fn save(&self, state_dir: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(state_dir)?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(state_dir.join(Self::STAMP_FILE), content)
    }

    /// Hash the manifest text and every source file below `root`.
    ///
    /// Unreadable sources hash as their path only, so they still change the digest
    /// once they become readable.
    pub fn compute_hash(root: &Path, sources: &SourceFileSet) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(sources.to_manifest().as_bytes());

        for path in sources.files() {
            hasher.update(path.to_string_lossy().as_bytes());
            if let Ok(content) = std::fs::read(root.join(path)) {
                hasher.update(&(content.len() as u64).to_le_bytes());
                hasher.update(&content);
            }
        }

        hasher.finalize().to_hex().to_string()
    }
}
