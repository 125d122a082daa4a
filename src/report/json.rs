use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;

use crate::models::{ProjectProfile, ProjectTypeMatch, SetupStep};

/// Serialized shape of a profile for downstream consumers.
#[derive(Debug, Serialize)]
pub struct ProfileReport<'a> {
    pub detected_type: Option<&'a str>,
    pub detected_pm: Option<&'a str>,
    pub path: String,
    pub matches: &'a [ProjectTypeMatch],
    pub system_dependencies: &'a [String],
    pub steps: &'a [SetupStep],
    pub env_vars: &'a BTreeMap<String, String>,
    pub version_constraints: &'a BTreeMap<String, String>,
}

impl<'a> From<&'a ProjectProfile> for ProfileReport<'a> {
    fn from(profile: &'a ProjectProfile) -> Self {
        Self {
            detected_type: profile.primary_language.as_deref(),
            detected_pm: profile.primary_package_manager.as_deref(),
            path: profile.root_path.display().to_string(),
            matches: &profile.matches,
            system_dependencies: &profile.system_dependencies,
            steps: &profile.setup_steps,
            env_vars: &profile.environment_variables,
            version_constraints: &profile.version_constraints,
        }
    }
}

pub fn to_string(profile: &ProjectProfile) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ProfileReport::from(profile))?)
}

/// Print the JSON payload to stdout.
pub fn render(profile: &ProjectProfile) -> Result<()> {
    println!("{}", to_string(profile)?);
    Ok(())
}
