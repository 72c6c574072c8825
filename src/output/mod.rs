use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::format::{to_css_variables, to_sass_variables, W3CTokenDocument};

const ENABLE_LOGS: bool = true;

use crate::log_info;

pub const JSON_FILE: &str = "design-tokens.json";
pub const CSS_FILE: &str = "design-tokens.css";
pub const SASS_FILE: &str = "design-tokens.scss";

/// Write the JSON, CSS and Sass artifacts into `output_dir`, creating it if
/// needed and replacing any previous files. Returns the written paths.
pub fn write_all(doc: &W3CTokenDocument, output_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!("failed to create output directory {}", output_dir.display())
    })?;

    let json = serde_json::to_string_pretty(doc).context("failed to serialize token document")?;

    let artifacts = [
        (JSON_FILE, json),
        (CSS_FILE, to_css_variables(doc)),
        (SASS_FILE, to_sass_variables(doc)),
    ];

    let mut written = Vec::with_capacity(artifacts.len());
    for (file_name, contents) in artifacts {
        let path = output_dir.join(file_name);
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log_info!("Design tokens saved to {}", path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::to_w3c_format;
    use crate::tokens::{TokenSet, TokenValue};

    fn sample_doc() -> W3CTokenDocument {
        let mut set = TokenSet::default();
        set.colors.insert("red".into(), TokenValue::new("rgba(255, 0, 0, 1)"));
        to_w3c_format(&set)
    }

    #[test]
    fn creates_nested_directory_and_writes_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("a").join("b");

        let written = write_all(&sample_doc(), &out).unwrap();
        assert_eq!(written.len(), 3);
        for name in [JSON_FILE, CSS_FILE, SASS_FILE] {
            assert!(out.join(name).is_file(), "{name} missing");
        }

        let json = fs::read_to_string(out.join(JSON_FILE)).unwrap();
        assert!(json.starts_with("{\n  \"$schema\""));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["tokens"]["colors"]["red"]["value"], "rgba(255, 0, 0, 1)");

        let css = fs::read_to_string(out.join(CSS_FILE)).unwrap();
        assert!(css.contains("--color-red: rgba(255, 0, 0, 1);"));
    }

    #[test]
    fn overwrites_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CSS_FILE), "stale content that is much longer than the new file").unwrap();

        write_all(&to_w3c_format(&TokenSet::default()), dir.path()).unwrap();

        let css = fs::read_to_string(dir.path().join(CSS_FILE)).unwrap();
        assert_eq!(css, ":root {\n}\n");
    }
}
