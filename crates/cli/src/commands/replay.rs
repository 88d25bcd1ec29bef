//! Replay scripted interactions against the page.
//!
//! A script is a YAML list of interactions:
//!
//! ```yaml
//! - action: fill
//!   title: Dune
//!   author: Frank Herbert
//!   price: "15"
//! - action: submit
//! - action: toggle
//! - action: key
//!   key: Escape
//! - action: delete
//!   index: 0
//! ```

use std::path::{Path, PathBuf};

use bookstore_storefront::config::StorefrontConfig;
use bookstore_storefront::view::Interaction;
use thiserror::Error;

/// Errors from loading a replay script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid script: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Read and parse a script file.
pub fn load_script(path: &Path) -> Result<Vec<Interaction>, ScriptError> {
    let content = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&content)
}

/// Parse a script from YAML text. An empty document is an empty script.
pub fn parse_script(yaml: &str) -> Result<Vec<Interaction>, ScriptError> {
    if yaml.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_yaml::from_str(yaml)?)
}

/// Populate the page, apply every step of the script in order, and write
/// the resulting HTML.
pub fn run(
    config: &StorefrontConfig,
    script: &Path,
    out: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let steps = load_script(script)?;
    let mut view = super::populated_view(config)?;

    for (number, step) in steps.iter().enumerate() {
        view.apply(step)
            .map_err(|e| format!("Step {} ({step:?}) failed: {e}", number + 1))?;
    }

    let items = view.items()?.len();
    let form = view.form_state()?;
    tracing::info!(steps = steps.len(), items, ?form, "Replayed script");

    let html = view.render_html()?;
    super::write_html(&html, out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bookstore_core::BookDraft;

    use super::*;

    const SCRIPT: &str = r#"
- action: fill
  title: Dune
  author: Frank Herbert
  price: "15"
  imageUrl: http://x/y.jpg
  inventory: 3
- action: submit
- action: toggle
- action: key
  key: Escape
- action: delete
  index: 0
"#;

    #[test]
    fn test_parse_script() {
        let steps = parse_script(SCRIPT).unwrap();
        assert_eq!(steps.len(), 5);
        assert_eq!(
            steps[0],
            Interaction::Fill(BookDraft {
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                price: "15".to_string(),
                image_url: "http://x/y.jpg".to_string(),
                inventory: "3".to_string(),
            })
        );
        assert_eq!(steps[1], Interaction::Submit);
        assert_eq!(
            steps[3],
            Interaction::Key {
                key: "Escape".to_string()
            }
        );
        assert_eq!(steps[4], Interaction::Delete { index: 0 });
    }

    #[test]
    fn test_parse_empty_script() {
        assert!(parse_script("").unwrap().is_empty());
        assert!(parse_script("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_script_rejects_unknown_action() {
        assert!(matches!(
            parse_script("- action: dance"),
            Err(ScriptError::Parse(_))
        ));
    }

    #[test]
    fn test_replay_writes_resulting_page() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("store.json");
        let script = dir.path().join("session.yaml");
        let out = dir.path().join("page.html");
        std::fs::write(
            &data,
            r#"{"name": "Easley's", "inventory": [{"title": "Eloquent JavaScript", "price": 10}]}"#,
        )
        .unwrap();
        std::fs::write(&script, SCRIPT).unwrap();

        let config = StorefrontConfig {
            data_path: Some(data),
            ..StorefrontConfig::default()
        };
        run(&config, &script, Some(&out)).unwrap();

        let html = std::fs::read_to_string(&out).unwrap();
        assert!(!html.contains("Eloquent JavaScript"));
        assert!(html.contains("Dune"));
        assert!(html.contains("$15.00"));
        assert!(html.contains("New Book"));
    }

    #[test]
    fn test_replay_reports_bad_step() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("store.json");
        let script = dir.path().join("session.yaml");
        std::fs::write(&data, r#"{"name": "Easley's"}"#).unwrap();
        std::fs::write(&script, "- action: delete\n  index: 3\n").unwrap();

        let config = StorefrontConfig {
            data_path: Some(data),
            ..StorefrontConfig::default()
        };
        let err = run(&config, &script, Some(&dir.path().join("page.html"))).unwrap_err();
        assert!(err.to_string().contains("Step 1"));
    }
}
