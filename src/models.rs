use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

/// One marker file found in the project root and the stack it implies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTypeMatch {
    pub language: String,
    pub package_manager: String,
    pub detected_marker_file: String,
}

/// A single installation step extracted from the documentation.
///
/// `order` is kept as the model returned it (numeric strings and integral
/// floats included); a missing or unusable order is never filled in, the
/// position in [`ProjectProfile::setup_steps`] is what counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupStep {
    #[serde(
        default,
        deserialize_with = "lenient_order",
        skip_serializing_if = "Option::is_none"
    )]
    pub order: Option<u32>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub action: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub command: String,
}

/// Aggregate detection-plus-extraction result for one analyzed project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectProfile {
    pub matches: Vec<ProjectTypeMatch>,
    pub root_path: PathBuf,
    pub primary_language: Option<String>,
    pub primary_package_manager: Option<String>,
    pub version_constraints: BTreeMap<String, String>,
    pub environment_variables: BTreeMap<String, String>,
    pub setup_steps: Vec<SetupStep>,
    pub system_dependencies: Vec<String>,
}

impl ProjectProfile {
    /// Build a profile from detector matches. The first match becomes primary.
    pub fn from_matches(root_path: PathBuf, matches: Vec<ProjectTypeMatch>) -> Self {
        let primary = matches.first();
        let primary_language = primary.map(|m| m.language.clone());
        let primary_package_manager = primary.map(|m| m.package_manager.clone());

        Self {
            matches,
            root_path,
            primary_language,
            primary_package_manager,
            version_constraints: BTreeMap::new(),
            environment_variables: BTreeMap::new(),
            setup_steps: Vec::new(),
            system_dependencies: Vec::new(),
        }
    }

    /// True when any plan field is populated.
    pub fn has_plan(&self) -> bool {
        !self.setup_steps.is_empty()
            || !self.environment_variables.is_empty()
            || !self.version_constraints.is_empty()
            || !self.system_dependencies.is_empty()
    }

    /// Nothing was detected and nothing was extracted.
    pub fn is_inconclusive(&self) -> bool {
        self.matches.is_empty() && !self.has_plan()
    }
}

/// Structured plan decoded from the model's JSON answer.
///
/// Every key is optional on the wire; absent keys decode to empty containers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub system_dependencies: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub steps: Vec<SetupStep>,
    #[serde(default, deserialize_with = "lenient_string_map")]
    pub env_vars: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "lenient_string_map")]
    pub version_constraints: BTreeMap<String, String>,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        self.system_dependencies.is_empty()
            && self.steps.is_empty()
            && self.env_vars.is_empty()
            && self.version_constraints.is_empty()
    }
}

/// Models sometimes answer `"PORT": 8080` or `"DEBUG": null`; keep those
/// instead of rejecting the whole plan.
fn scalar_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(scalar_to_string(value))
}

fn lenient_string_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(k, v)| (k, scalar_to_string(v)))
        .collect())
}

/// `1`, `1.0` and `"1"` all mean step one; anything else is treated as unordered.
fn lenient_order<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let order = match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64)
                    .map(|f| f as u64)
            })
            .and_then(|n| u32::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    Ok(order)
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let raw: Option<Vec<T>> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default())
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(scalar_to_string)
        .filter(|s| !s.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_from_first_match() {
        let matches = vec![
            ProjectTypeMatch {
                language: "nodejs".into(),
                package_manager: "npm".into(),
                detected_marker_file: "package.json".into(),
            },
            ProjectTypeMatch {
                language: "python".into(),
                package_manager: "pip".into(),
                detected_marker_file: "requirements.txt".into(),
            },
        ];
        let profile = ProjectProfile::from_matches(PathBuf::from("/tmp/p"), matches);
        assert_eq!(profile.primary_language.as_deref(), Some("nodejs"));
        assert_eq!(profile.primary_package_manager.as_deref(), Some("npm"));
        assert!(!profile.has_plan());
    }

    #[test]
    fn test_no_matches_is_inconclusive() {
        let profile = ProjectProfile::from_matches(PathBuf::from("/tmp/p"), Vec::new());
        assert!(profile.primary_language.is_none());
        assert!(profile.primary_package_manager.is_none());
        assert!(profile.is_inconclusive());
    }

    #[test]
    fn test_extraction_missing_keys_default_empty() {
        let parsed: ExtractionResult = serde_json::from_str(r#"{"steps": []}"#).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_extraction_scalar_values_are_stringified() {
        let parsed: ExtractionResult = serde_json::from_str(
            r#"{"env_vars": {"PORT": 8080, "DEBUG": true, "SECRET": null}}"#,
        )
        .unwrap();
        assert_eq!(parsed.env_vars["PORT"], "8080");
        assert_eq!(parsed.env_vars["DEBUG"], "true");
        assert_eq!(parsed.env_vars["SECRET"], "");
    }

    #[test]
    fn test_step_without_order_keeps_none() {
        let parsed: ExtractionResult = serde_json::from_str(
            r#"{"steps": [{"action": "build", "command": "make"}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.steps[0].order, None);
        assert_eq!(parsed.steps[0].command, "make");
    }

    #[test]
    fn test_has_plan_when_any_field_set() {
        let mut profile = ProjectProfile::from_matches(PathBuf::from("/tmp/p"), Vec::new());
        profile.system_dependencies.push("redis".into());
        assert!(profile.has_plan());
        assert!(!profile.is_inconclusive());
    }

    #[test]
    fn test_step_order_accepts_numeric_forms() {
        let parsed: ExtractionResult = serde_json::from_str(
            r#"{"steps": [
                {"order": "1", "action": "a", "command": "x"},
                {"order": 2.0, "action": "b", "command": "y"},
                {"order": "first", "action": "c", "command": "z"},
                {"order": -3, "action": "d", "command": "w"},
                {"order": 1.5, "action": "e", "command": "v"}
            ], "version_constraints": {"node": ">=18"}}"#,
        )
        .unwrap();
        let orders: Vec<Option<u32>> = parsed.steps.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![Some(1), Some(2), None, None, None]);
        assert_eq!(parsed.version_constraints["node"], ">=18");
    }

    #[test]
    fn test_system_dependencies_scalars_stringified() {
        let parsed: ExtractionResult = serde_json::from_str(
            r#"{"system_dependencies": ["redis", 5, null], "env_vars": {"A": "b"}}"#,
        )
        .unwrap();
        assert_eq!(parsed.system_dependencies, vec!["redis", "5"]);
        assert_eq!(parsed.env_vars["A"], "b");
    }

    #[test]
    fn test_null_containers_decode_empty() {
        let parsed: ExtractionResult = serde_json::from_str(
            r#"{"system_dependencies": null, "steps": null, "env_vars": {"A": "b"}, "version_constraints": null}"#,
        )
        .unwrap();
        assert!(parsed.system_dependencies.is_empty());
        assert!(parsed.steps.is_empty());
        assert!(parsed.version_constraints.is_empty());
        assert_eq!(parsed.env_vars["A"], "b");
    }
}
