//! Tool configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level hygiene-audit configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HygieneConfig {
    /// Output directory for reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Output format used when none is given on the command line.
    #[serde(default = "default_format")]
    pub default_format: String,
    /// Corrected-score drop, in percentage points, that counts as a regression.
    #[serde(default = "default_regression_threshold")]
    pub regression_threshold: f64,
    /// Allowed distance of the weightage sum from 100 before validation warns.
    #[serde(default = "default_weightage_tolerance")]
    pub weightage_tolerance: f64,
    /// Award points by answer for answered items that have none recorded.
    #[serde(default)]
    pub derive_missing_points: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./hygiene-results")
}
fn default_format() -> String {
    "json".to_string()
}
fn default_regression_threshold() -> f64 {
    5.0
}
fn default_weightage_tolerance() -> f64 {
    0.01
}

impl Default for HygieneConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            default_format: default_format(),
            regression_threshold: default_regression_threshold(),
            weightage_tolerance: default_weightage_tolerance(),
            derive_missing_points: false,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when no path is given:
/// 1. `hygiene.toml` in the current directory
/// 2. `~/.config/hygiene/config.toml`
///
/// Environment variable overrides: `HYGIENE_OUTPUT_DIR`, `HYGIENE_REGRESSION_THRESHOLD`.
pub fn load_config_from(path: Option<&Path>) -> Result<HygieneConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("hygiene.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => HygieneConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    config.output_dir = PathBuf::from(resolve_env_vars(&config.output_dir.to_string_lossy()));

    Ok(config)
}

/// Apply `HYGIENE_*` overrides looked up through `var`.
fn apply_env_overrides(
    config: &mut HygieneConfig,
    var: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(dir) = var("HYGIENE_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }
    if let Some(raw) = var("HYGIENE_REGRESSION_THRESHOLD") {
        let threshold: f64 = raw
            .trim()
            .parse()
            .with_context(|| format!("invalid HYGIENE_REGRESSION_THRESHOLD: '{raw}'"))?;
        anyhow::ensure!(
            threshold >= 0.0,
            "HYGIENE_REGRESSION_THRESHOLD must not be negative"
        );
        config.regression_threshold = threshold;
    }
    Ok(())
}

/// Parse a config document.
pub fn parse_config(content: &str) -> Result<HygieneConfig> {
    let config: HygieneConfig = toml::from_str(content)?;
    anyhow::ensure!(
        config.regression_threshold >= 0.0,
        "regression_threshold must not be negative"
    );
    anyhow::ensure!(
        config.weightage_tolerance >= 0.0,
        "weightage_tolerance must not be negative"
    );
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("hygiene"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_HYGIENE_TEST_VAR", "reports");
        assert_eq!(resolve_env_vars("${_HYGIENE_TEST_VAR}"), "reports");
        assert_eq!(
            resolve_env_vars("/srv/${_HYGIENE_TEST_VAR}/out"),
            "/srv/reports/out"
        );
        std::env::remove_var("_HYGIENE_TEST_VAR");
    }

    #[test]
    fn substituted_value_is_not_expanded_again() {
        std::env::set_var("_HYGIENE_SELF_REF", "out/${_HYGIENE_SELF_REF}");
        assert_eq!(
            resolve_env_vars("${_HYGIENE_SELF_REF}/q1"),
            "out/${_HYGIENE_SELF_REF}/q1"
        );
        std::env::remove_var("_HYGIENE_SELF_REF");
    }

    #[test]
    fn unset_variable_expands_to_empty() {
        assert_eq!(
            resolve_env_vars("a/${_HYGIENE_SURELY_UNSET}/b/${_HYGIENE_SURELY_UNSET}"),
            "a//b/"
        );
    }

    #[test]
    fn unterminated_reference_is_left_alone() {
        assert_eq!(resolve_env_vars("out/${OOPS"), "out/${OOPS");
    }

    #[test]
    fn default_config() {
        let config = HygieneConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("./hygiene-results"));
        assert_eq!(config.default_format, "json");
        assert_eq!(config.regression_threshold, 5.0);
        assert!(!config.derive_missing_points);
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config(
            r#"
output_dir = "audits-out"
regression_threshold = 2.5
"#,
        )
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("audits-out"));
        assert_eq!(config.regression_threshold, 2.5);
        assert_eq!(config.weightage_tolerance, 0.01);
    }

    #[test]
    fn negative_threshold_is_rejected() {
        assert!(parse_config("regression_threshold = -1.0").is_err());
    }

    #[test]
    fn explicit_missing_path_fails() {
        let err = load_config_from(Some(Path::new("/nonexistent/hygiene.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hygiene.toml");
        std::fs::write(&path, "weightage_tolerance = 0.5\nderive_missing_points = true\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.weightage_tolerance, 0.5);
        assert!(config.derive_missing_points);
    }

    fn env_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut config = parse_config("output_dir = \"from-file\"\nregression_threshold = 2.0\n").unwrap();
        apply_env_overrides(
            &mut config,
            env_from(&[
                ("HYGIENE_OUTPUT_DIR", "/srv/reports"),
                ("HYGIENE_REGRESSION_THRESHOLD", " 7.5 "),
            ]),
        )
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/srv/reports"));
        assert_eq!(config.regression_threshold, 7.5);
    }

    #[test]
    fn absent_env_overrides_keep_file_values() {
        let mut config = parse_config("regression_threshold = 2.0\n").unwrap();
        apply_env_overrides(&mut config, env_from(&[])).unwrap();
        assert_eq!(config.regression_threshold, 2.0);
        assert_eq!(config.output_dir, PathBuf::from("./hygiene-results"));
    }

    #[test]
    fn unparseable_threshold_override_is_an_error() {
        let mut config = HygieneConfig::default();
        let err = apply_env_overrides(
            &mut config,
            env_from(&[("HYGIENE_REGRESSION_THRESHOLD", "five")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid HYGIENE_REGRESSION_THRESHOLD: 'five'"));
        assert_eq!(config.regression_threshold, 5.0);
    }

    #[test]
    fn negative_threshold_override_is_an_error() {
        let mut config = HygieneConfig::default();
        assert!(apply_env_overrides(
            &mut config,
            env_from(&[("HYGIENE_REGRESSION_THRESHOLD", "-1")]),
        )
        .is_err());
    }
}
