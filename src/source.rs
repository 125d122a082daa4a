use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::info;

/// Where the project to analyze comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectSource {
    Git { url: String },
    Local { path: PathBuf },
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{0} is required for this source")]
    MissingField(&'static str),

    #[error("path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot derive a repository name from {0:?}")]
    InvalidUrl(String),

    #[error("git {action} failed for {target}: {detail}")]
    Git {
        action: &'static str,
        target: String,
        detail: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Resolve a source to a local directory, cloning or pulling git sources
/// into `clone_dir`.
pub fn resolve(source: &ProjectSource, clone_dir: &Path) -> Result<PathBuf, SourceError> {
    match source {
        ProjectSource::Local { path } => resolve_local(path),
        ProjectSource::Git { url } => clone_or_pull(url, clone_dir),
    }
}

fn resolve_local(path: &Path) -> Result<PathBuf, SourceError> {
    if path.as_os_str().is_empty() {
        return Err(SourceError::MissingField("path"));
    }
    if !path.is_dir() {
        return Err(SourceError::NotFound(path.to_path_buf()));
    }
    Ok(path.canonicalize()?)
}

/// `https://github.com/acme/widget.git/` → `widget`
pub fn repo_name(url: &str) -> Option<&str> {
    let last = url.trim_end_matches('/').rsplit('/').next()?;
    let name = last.strip_suffix(".git").unwrap_or(last);
    // scp-style remotes without a slash: git@host:repo.git
    let name = name.rsplit(':').next().unwrap_or(name);
    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name)
    }
}

fn clone_or_pull(url: &str, clone_dir: &Path) -> Result<PathBuf, SourceError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(SourceError::MissingField("url"));
    }
    let name = repo_name(url).ok_or_else(|| SourceError::InvalidUrl(url.to_string()))?;

    std::fs::create_dir_all(clone_dir)?;
    let target = clone_dir.join(name);

    if target.exists() {
        info!(target = %target.display(), "repository already cloned, pulling");
        run_git("pull", &target, &mut pull_command(&target))?;
    } else {
        info!(url, target = %target.display(), "cloning repository");
        run_git("clone", &target, &mut clone_command(url, &target))?;
    }

    Ok(target)
}

/// `--` keeps a url starting with `-` from being read as a git option.
fn clone_command(url: &str, target: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.arg("clone").arg("--").arg(url).arg(target);
    cmd
}

fn pull_command(target: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.arg("-C").arg(target).arg("pull");
    cmd
}

fn run_git(action: &'static str, target: &Path, cmd: &mut Command) -> Result<(), SourceError> {
    let output = cmd.output().map_err(|e| SourceError::Git {
        action,
        target: target.display().to_string(),
        detail: e.to_string(),
    })?;

    if !output.status.success() {
        return Err(SourceError::Git {
            action,
            target: target.display().to_string(),
            detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_repo_name() {
        assert_eq!(repo_name("https://github.com/acme/widget.git"), Some("widget"));
        assert_eq!(repo_name("https://github.com/acme/widget/"), Some("widget"));
        assert_eq!(repo_name("git@github.com:acme/widget.git"), Some("widget"));
        assert_eq!(repo_name("git@host:widget.git"), Some("widget"));
        assert_eq!(repo_name("https://github.com/"), Some("github.com"));
        assert_eq!(repo_name("/"), None);
    }

    #[test]
    fn test_clone_url_after_separator() {
        let cmd = clone_command("--upload-pack=touch /tmp/x", Path::new("/tmp/repos/x"));
        let args: Vec<&std::ffi::OsStr> = cmd.get_args().collect();
        assert_eq!(
            args,
            vec!["clone", "--", "--upload-pack=touch /tmp/x", "/tmp/repos/x"]
        );
    }

    #[test]
    fn test_local_existing_dir() {
        let dir = TempDir::new().unwrap();
        let resolved = resolve(
            &ProjectSource::Local {
                path: dir.path().to_path_buf(),
            },
            dir.path(),
        )
        .unwrap();
        assert_eq!(resolved, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_local_missing_dir_is_not_found() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = resolve(&ProjectSource::Local { path: missing.clone() }, dir.path()).unwrap_err();
        assert!(matches!(err, SourceError::NotFound(p) if p == missing));
    }

    #[test]
    fn test_local_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("package.json");
        std::fs::write(&file, "{}").unwrap();
        let err = resolve(&ProjectSource::Local { path: file }, dir.path()).unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[test]
    fn test_git_empty_url() {
        let dir = TempDir::new().unwrap();
        let err = resolve(&ProjectSource::Git { url: "  ".into() }, dir.path()).unwrap_err();
        assert!(matches!(err, SourceError::MissingField("url")));
    }

    #[test]
    fn test_local_empty_path() {
        let dir = TempDir::new().unwrap();
        let err = resolve(
            &ProjectSource::Local {
                path: PathBuf::new(),
            },
            dir.path(),
        )
        .unwrap_err();
        assert!(matches!(err, SourceError::MissingField("path")));
    }
}
