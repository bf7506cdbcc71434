use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub repo: RepoConfig,
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub retention: RetentionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RepoConfig {
    pub root: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_include_globs() -> Vec<String> {
    vec![
        "**/*.js".to_string(),
        "**/*.html".to_string(),
        "**/*.css".to_string(),
    ]
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChunkingConfig {
    /// Maximum characters per raw chunk. Files strictly larger than this are
    /// summarized instead when `summarize` is enabled.
    pub max_chars: usize,
    #[serde(default = "default_summarize")]
    pub summarize: bool,
}

fn default_summarize() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Name of the environment variable holding the API credential.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            max_retries: default_max_retries(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}
fn default_max_retries() -> u32 {
    5
}
fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RetentionConfig {
    /// Cap on conversation entries. 0 disables the cap; the history then
    /// grows without bound for the life of the process. When positive, the
    /// oldest user/assistant entries are evicted before each send and
    /// system entries (repo context) are never evicted.
    #[serde(default)]
    pub max_entries: usize,
}

impl Config {
    /// A minimal configuration for tests and scaffolding paths.
    pub fn minimal(root: PathBuf) -> Self {
        Self {
            repo: RepoConfig {
                root,
                include_globs: default_include_globs(),
                exclude_globs: Vec::new(),
                follow_symlinks: false,
            },
            chunking: ChunkingConfig {
                max_chars: 3000,
                summarize: true,
            },
            model: ModelConfig::default(),
            retention: RetentionConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate chunking
    if config.chunking.max_chars == 0 {
        bail!("chunking.max_chars must be > 0");
    }

    // Validate repo
    if config.repo.include_globs.is_empty() {
        bail!("repo.include_globs must not be empty");
    }

    // Validate model
    if config.model.model.is_empty() {
        bail!("model.model must not be empty");
    }
    if config.model.base_url.is_empty() {
        bail!("model.base_url must not be empty");
    }
    if config.model.timeout_secs == 0 {
        bail!("model.timeout_secs must be > 0");
    }

    Ok(config)
}

/// Commented example configuration written by `rfeed init`.
const EXAMPLE_CONFIG: &str = r#"# repofeed configuration.

[repo]
# Root of the source tree to feed.
root = "./site"
# Files matched by these globs are fed; everything else is ignored.
include_globs = ["**/*.js", "**/*.html", "**/*.css"]
exclude_globs = []
follow_symlinks = false

[chunking]
# Maximum characters per raw chunk. Files strictly larger than this are
# summarized by the model instead when `summarize` is enabled.
max_chars = 3000
summarize = true

[model]
model = "gpt-4o-mini"
base_url = "https://api.openai.com/v1"
# Environment variable holding the API credential.
api_key_env = "OPENAI_API_KEY"
max_retries = 5
timeout_secs = 60

[retention]
# 0 = unbounded conversation history. A positive value caps the store;
# oldest user/assistant entries are evicted first, repo context is kept.
max_entries = 0
"#;

/// Write an example configuration file. Refuses to overwrite an existing one.
pub fn scaffold_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("Config file already exists: {}", path.display());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("repofeed.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_load_full_config() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
[repo]
root = "./site"
include_globs = ["**/*.js"]

[chunking]
max_chars = 2000
summarize = false

[model]
model = "gpt-4o"
max_retries = 2

[retention]
max_entries = 40
"#,
        );
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.chunking.max_chars, 2000);
        assert!(!cfg.chunking.summarize);
        assert_eq!(cfg.model.model, "gpt-4o");
        assert_eq!(cfg.model.max_retries, 2);
        assert_eq!(cfg.retention.max_entries, 40);
    }

    #[test]
    fn test_defaults_applied() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
[repo]
root = "./site"

[chunking]
max_chars = 3000
"#,
        );
        let cfg = load_config(&path).unwrap();
        assert_eq!(
            cfg.repo.include_globs,
            vec!["**/*.js", "**/*.html", "**/*.css"]
        );
        assert!(cfg.chunking.summarize);
        assert_eq!(cfg.model.api_key_env, "OPENAI_API_KEY");
        assert_eq!(cfg.model.base_url, "https://api.openai.com/v1");
        assert_eq!(cfg.retention.max_entries, 0);
    }

    #[test]
    fn test_zero_max_chars_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
[repo]
root = "./site"

[chunking]
max_chars = 0
"#,
        );
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("max_chars"));
    }

    #[test]
    fn test_empty_include_globs_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
[repo]
root = "./site"
include_globs = []

[chunking]
max_chars = 3000
"#,
        );
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("include_globs"));
    }

    #[test]
    fn test_scaffold_refuses_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config").join("repofeed.toml");
        scaffold_config(&path).unwrap();
        assert!(path.exists());
        // Scaffolded config must itself pass validation.
        load_config(&path).unwrap();
        let err = scaffold_config(&path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
