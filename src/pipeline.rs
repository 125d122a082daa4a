use std::path::Path;

use tracing::{debug, info};

use crate::detector::detect_project_type;
use crate::extractor::InstructionExtractor;
use crate::merger::merge;
use crate::models::ProjectProfile;
use crate::readme::locate_readme;
use crate::source::SourceError;

/// Runs detection, documentation lookup, extraction and merging for one project.
pub struct Analyzer {
    extractor: Option<InstructionExtractor>,
}

impl Analyzer {
    /// `extractor` is `None` when no model is configured; profiles then carry
    /// detection results only.
    pub fn new(extractor: Option<InstructionExtractor>) -> Self {
        Self { extractor }
    }

    /// Analyze `path`. The only error is a missing directory; every failure
    /// after that degrades to empty plan fields.
    pub async fn analyze(&self, path: &Path) -> Result<ProjectProfile, SourceError> {
        if !path.is_dir() {
            return Err(SourceError::NotFound(path.to_path_buf()));
        }

        let profile = detect_project_type(path);
        info!(
            path = %path.display(),
            matches = profile.matches.len(),
            primary = profile.primary_language.as_deref().unwrap_or("none"),
            "project type detected"
        );

        let Some(extractor) = &self.extractor else {
            debug!("no extractor configured, skipping documentation");
            return Ok(profile);
        };

        let Some(doc) = locate_readme(path) else {
            info!("no documentation found, skipping extraction");
            return Ok(profile);
        };
        info!(file = %doc.path.display(), "extracting setup instructions");

        let extraction = extractor.extract_or_default(&doc.text).await;
        if extraction.is_empty() {
            info!("no setup plan extracted");
        }
        Ok(merge(profile, extraction))
    }
}
