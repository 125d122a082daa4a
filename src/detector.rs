use std::path::Path;

use tracing::debug;

use crate::models::{ProjectProfile, ProjectTypeMatch};

/// Marker file → (language, package manager).
///
/// Declaration order is the priority order: when several markers are present
/// the first one listed here becomes the primary type.
pub const INDICATORS: &[(&str, &str, &str)] = &[
    ("package.json", "nodejs", "npm"),
    ("requirements.txt", "python", "pip"),
    ("pyproject.toml", "python", "poetry"),
    ("composer.json", "php", "composer"),
    ("pom.xml", "java", "maven"),
    ("build.gradle", "java", "gradle"),
    ("Gemfile", "ruby", "bundler"),
    ("go.mod", "go", "go modules"),
];

/// Detect the project stack by checking the top level of `path` for marker files.
///
/// Non-recursive and side-effect free. A directory that does not exist simply
/// yields no matches; callers validate existence beforehand.
pub fn detect_project_type(path: &Path) -> ProjectProfile {
    let mut matches = Vec::new();

    for (marker, language, package_manager) in INDICATORS {
        if path.join(marker).is_file() {
            debug!(marker, language, "marker file found");
            matches.push(ProjectTypeMatch {
                language: language.to_string(),
                package_manager: package_manager.to_string(),
                detected_marker_file: marker.to_string(),
            });
        }
    }

    ProjectProfile::from_matches(path.to_path_buf(), matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project_with(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for f in files {
            std::fs::write(dir.path().join(f), "").unwrap();
        }
        dir
    }

    #[test]
    fn test_detect_nodejs() {
        let dir = project_with(&["package.json"]);
        let profile = detect_project_type(dir.path());
        assert_eq!(profile.primary_language.as_deref(), Some("nodejs"));
        assert_eq!(profile.primary_package_manager.as_deref(), Some("npm"));
        assert_eq!(profile.matches.len(), 1);
        assert_eq!(profile.matches[0].detected_marker_file, "package.json");
    }

    #[test]
    fn test_every_single_indicator() {
        for (marker, language, package_manager) in INDICATORS {
            let dir = project_with(&[*marker]);
            let profile = detect_project_type(dir.path());
            assert_eq!(profile.matches.len(), 1, "{}", marker);
            assert_eq!(profile.primary_language.as_deref(), Some(*language));
            assert_eq!(
                profile.primary_package_manager.as_deref(),
                Some(*package_manager)
            );
        }
    }

    #[test]
    fn test_detect_nothing() {
        let dir = project_with(&["main.c", "Makefile"]);
        let profile = detect_project_type(dir.path());
        assert!(profile.matches.is_empty());
        assert!(profile.primary_language.is_none());
        assert!(profile.primary_package_manager.is_none());
    }

    #[test]
    fn test_detect_multiple_uses_table_order() {
        // Created in reverse priority order on purpose
        let dir = project_with(&["go.mod", "requirements.txt", "package.json"]);
        let profile = detect_project_type(dir.path());
        assert_eq!(profile.matches.len(), 3);
        assert_eq!(profile.primary_language.as_deref(), Some("nodejs"));
        let markers: Vec<&str> = profile
            .matches
            .iter()
            .map(|m| m.detected_marker_file.as_str())
            .collect();
        assert_eq!(markers, vec!["package.json", "requirements.txt", "go.mod"]);
    }

    #[test]
    fn test_python_pip_before_poetry() {
        let dir = project_with(&["pyproject.toml", "requirements.txt"]);
        let profile = detect_project_type(dir.path());
        assert_eq!(profile.primary_package_manager.as_deref(), Some("pip"));
        assert_eq!(profile.matches[1].package_manager, "poetry");
    }

    #[test]
    fn test_marker_in_subdirectory_ignored() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("web")).unwrap();
        std::fs::write(dir.path().join("web").join("package.json"), "{}").unwrap();
        let profile = detect_project_type(dir.path());
        assert!(profile.matches.is_empty());
    }

    #[test]
    fn test_missing_directory_yields_no_matches() {
        let dir = TempDir::new().unwrap();
        let profile = detect_project_type(&dir.path().join("does-not-exist"));
        assert!(profile.matches.is_empty());
        assert!(profile.setup_steps.is_empty());
    }
}
