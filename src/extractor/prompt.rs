/// Default cap on documentation characters sent to the model.
pub const DEFAULT_MAX_CHARS: usize = 6000;

const TEMPLATE: &str = r#"Analyze the following project setup instructions and extract:
1. Required system dependencies
2. Installation steps in order
3. Environment variables needed
4. Known version requirements

Instructions:
{readme_content}

Return ONLY valid JSON with no extra text:
{
  "system_dependencies": ["redis", "postgresql"],
  "steps": [
    {"order": 1, "action": "install_packages", "command": "npm install"}
  ],
  "env_vars": {
    "DATABASE_URL": "postgres://localhost/myapp"
  },
  "version_constraints": {
    "node": ">=18.0.0"
  }
}
"#;

/// Keep at most `max_chars` characters, never splitting a code point.
pub fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Build the extraction prompt around (already truncated) documentation.
pub fn build_prompt(documentation: &str) -> String {
    TEMPLATE.replacen("{readme_content}", documentation, 1)
}
