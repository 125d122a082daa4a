//! Locate the setup documentation of a project.
//!
//! Exact, case-sensitive candidate names are tried first in priority order.
//! Only when none exists does the locator fall back to the first top-level
//! `*.md`, then `*.txt`, then `*.rst` file returned by the directory listing.
//! Listing order is whatever the filesystem yields.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Exact documentation file names, highest priority first.
pub const CANDIDATES: &[&str] = &[
    "README.md",
    "README.txt",
    "README.rst",
    "INSTALL.md",
    "INSTALL.txt",
    "SETUP.md",
    "SETUP.txt",
    "GETTING_STARTED.md",
    "steps.txt",
    "steps.md",
    "instructions.txt",
    "instructions.md",
    "readme.md",
    "readme.txt",
];

/// Extension fallback order.
pub const FALLBACK_EXTENSIONS: &[&str] = &["md", "txt", "rst"];

/// A documentation file and its decoded text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Documentation {
    pub path: PathBuf,
    pub text: String,
}

/// Find the project's documentation. `None` means no documentation is available.
pub fn locate_readme(path: &Path) -> Option<Documentation> {
    for name in CANDIDATES {
        let candidate = path.join(name);
        if !candidate.is_file() {
            continue;
        }
        if let Some(text) = read_lossy(&candidate) {
            debug!(file = %candidate.display(), "documentation found by name");
            return Some(Documentation {
                path: candidate,
                text,
            });
        }
    }

    for ext in FALLBACK_EXTENSIONS {
        let Some(candidate) = first_with_extension(path, ext) else {
            continue;
        };
        if let Some(text) = read_lossy(&candidate) {
            debug!(file = %candidate.display(), "documentation found by extension");
            return Some(Documentation {
                path: candidate,
                text,
            });
        }
    }

    debug!(dir = %path.display(), "no documentation file found");
    None
}

/// Read a file as text, replacing invalid UTF-8 instead of failing.
fn read_lossy(path: &Path) -> Option<String> {
    match std::fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            debug!(file = %path.display(), error = %e, "skipping unreadable documentation");
            None
        }
    }
}

fn first_with_extension(dir: &Path, ext: &str) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .find(|p| p.is_file() && p.extension().and_then(|e| e.to_str()) == Some(ext))
}
