use crate::models::{ExtractionResult, ProjectProfile};

/// Fold an extraction into a detected profile.
///
/// Plan fields are replaced wholesale, never merged by key, so merging the
/// same profile twice keeps only the second extraction. Detection fields are
/// left untouched.
pub fn merge(mut profile: ProjectProfile, extraction: ExtractionResult) -> ProjectProfile {
    profile.setup_steps = extraction.steps;
    profile.environment_variables = extraction.env_vars;
    profile.version_constraints = extraction.version_constraints;
    profile.system_dependencies = extraction.system_dependencies;
    profile
}
