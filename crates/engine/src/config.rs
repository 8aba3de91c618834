use crate::error::{EngineError, Result};
use scope_workspace::{parse_concurrency, AnalyzerConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_WORKSPACE_ROOT: &str = "SCOPE_WORKSPACE_ROOT";
pub const ENV_MAX_CONCURRENCY: &str = "SCOPE_MAX_CONCURRENCY";
pub const ENV_STRICT_SYNTAX: &str = "SCOPE_STRICT_SYNTAX";

/// Engine configuration.
///
/// Layers, later wins: defaults, TOML file, `SCOPE_*` environment variables.
///
/// ```toml
/// workspace_root = "/path/to/project"
///
/// [analyzer]
/// include = ["src/**/*.ts"]
/// exclude = ["**/node_modules/**"]
/// max_concurrency = 4
/// strict_syntax = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Root analyzed when callers pass none
    pub workspace_root: Option<PathBuf>,

    pub analyzer: AnalyzerConfig,
}

impl EngineConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Self::parse(raw, "configuration")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            EngineError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::parse(&raw, &path.display().to_string())
    }

    fn parse(raw: &str, origin: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)
            .map_err(|e| EngineError::config(format!("invalid TOML in {origin}: {e}")))?;
        config
            .analyzer
            .validate()
            .map_err(|e| EngineError::config(format!("{origin}: {e}")))?;
        Ok(config)
    }

    /// Defaults or `path`, then the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.with_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply `SCOPE_*` overrides read through `lookup`
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup(ENV_WORKSPACE_ROOT) {
            let trimmed = root.trim();
            if !trimmed.is_empty() {
                self.workspace_root = Some(PathBuf::from(trimmed));
            }
        }

        if let Some(raw) = lookup(ENV_MAX_CONCURRENCY) {
            self.analyzer.max_concurrency =
                parse_concurrency(Some(&raw), self.analyzer.max_concurrency);
        }

        if let Some(raw) = lookup(ENV_STRICT_SYNTAX) {
            match parse_flag(&raw) {
                Some(strict) => self.analyzer.strict_syntax = strict,
                None => log::warn!("Ignoring {ENV_STRICT_SYNTAX}={raw:?}: expected a boolean"),
            }
        }

        self
    }

    pub fn validate(&self) -> Result<()> {
        self.analyzer.validate().map_err(EngineError::Config)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scope_workspace::{DEFAULT_EXCLUDE, MAX_ANALYZE_CONCURRENCY};
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            workspace_root = "/srv/app"

            [analyzer]
            include = ["src/**/*.ts"]
            "#,
        )
        .unwrap();

        assert_eq!(config.workspace_root, Some(PathBuf::from("/srv/app")));
        assert_eq!(config.analyzer.include, vec!["src/**/*.ts"]);
        assert_eq!(config.analyzer.exclude, vec![DEFAULT_EXCLUDE]);
        assert!(config.analyzer.strict_syntax);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        assert!(matches!(
            EngineConfig::from_toml_str("workspace = \"/x\""),
            Err(EngineError::Config(_))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("[analyzer]\nmax_concurrency = 0"),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn env_overrides_win() {
        let config = EngineConfig::default().with_env_overrides(env(&[
            (ENV_WORKSPACE_ROOT, " /work/repo "),
            (ENV_MAX_CONCURRENCY, "3"),
            (ENV_STRICT_SYNTAX, "off"),
        ]));

        assert_eq!(config.workspace_root, Some(PathBuf::from("/work/repo")));
        assert_eq!(config.analyzer.max_concurrency, 3);
        assert!(!config.analyzer.strict_syntax);
    }

    #[test]
    fn garbage_env_values_are_ignored_or_clamped() {
        let base = EngineConfig::default();
        let config = base.clone().with_env_overrides(env(&[
            (ENV_WORKSPACE_ROOT, "   "),
            (ENV_MAX_CONCURRENCY, "many"),
            (ENV_STRICT_SYNTAX, "sometimes"),
        ]));
        assert_eq!(config, base);

        let config = base.with_env_overrides(env(&[(ENV_MAX_CONCURRENCY, "4096")]));
        assert_eq!(config.analyzer.max_concurrency, MAX_ANALYZE_CONCURRENCY);
    }

    #[test]
    fn from_file_reports_the_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("scope.toml");
        std::fs::write(&path, "[analyzer]\nstrict_syntax = false\n").unwrap();
        assert!(!EngineConfig::from_file(&path).unwrap().analyzer.strict_syntax);

        let missing = temp.path().join("missing.toml");
        let err = EngineConfig::from_file(&missing).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }
}
