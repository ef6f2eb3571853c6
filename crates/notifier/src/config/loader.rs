use std::path::{Path, PathBuf};

use super::schema::NotifierConfig;

pub const ENV_WEBHOOK: &str = "FOLLOWSYNC_WEBHOOK";
pub const ENV_SECRET: &str = "FOLLOWSYNC_SECRET";

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Parse(serde_yaml::Error),
    Validation(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Parse(e) => write!(f, "parse: {e}"),
            Self::Validation(msg) => write!(f, "validation: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_yaml::Error> for LoadError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Parse(e)
    }
}

pub fn default_config_path() -> PathBuf {
    if let Some(dir) = dirs::config_dir() {
        return dir.join("followsync").join("notifier.yml");
    }
    PathBuf::from("/etc/followsync/notifier.yml")
}

pub fn load_from_file(path: &Path) -> Result<NotifierConfig, LoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}

/// Parses YAML without validating; environment overrides are applied later.
pub fn load_from_str(yaml: &str) -> Result<NotifierConfig, LoadError> {
    Ok(serde_yaml::from_str(yaml)?)
}

pub fn apply_env<F>(mut cfg: NotifierConfig, lookup: F) -> NotifierConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(webhook) = lookup(ENV_WEBHOOK) {
        cfg.webhook = webhook;
    }
    if let Some(secret) = lookup(ENV_SECRET) {
        cfg.secret = secret;
    }
    cfg
}

pub fn validate(cfg: &NotifierConfig) -> Result<(), LoadError> {
    if cfg.webhook.is_empty() {
        return Err(LoadError::Validation(format!(
            "webhook URL must not be empty (set it in the config file or {ENV_WEBHOOK})"
        )));
    }
    if !cfg.webhook.starts_with("http://") && !cfg.webhook.starts_with("https://") {
        return Err(LoadError::Validation(
            "webhook must start with http:// or https://".into(),
        ));
    }
    if cfg.timeout_seconds == 0 {
        return Err(LoadError::Validation("timeout_seconds must be > 0".into()));
    }
    Ok(())
}

/// Explicit path (must exist), else the default path if present, else
/// built-in defaults; then environment overrides and validation.
pub fn resolve_with<F>(
    config_path: Option<&Path>,
    default_path: &Path,
    lookup: F,
) -> Result<NotifierConfig, LoadError>
where
    F: Fn(&str) -> Option<String>,
{
    let base = match config_path {
        Some(path) => load_from_file(path)?,
        None if default_path.exists() => load_from_file(default_path)?,
        None => NotifierConfig::default(),
    };
    let cfg = apply_env(base, lookup);
    validate(&cfg)?;
    Ok(cfg)
}

pub fn resolve(config_path: Option<&Path>) -> Result<NotifierConfig, LoadError> {
    resolve_with(config_path, &default_config_path(), |key| {
        std::env::var(key).ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn file_values_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notifier.yml");
        std::fs::write(&path, "webhook: https://hook/send?access_token=t\nsecret: SEC1\n").unwrap();

        let cfg = resolve_with(Some(path.as_path()), Path::new("/nonexistent"), env(&[])).unwrap();
        assert_eq!(cfg.webhook, "https://hook/send?access_token=t");
        assert_eq!(cfg.secret, "SEC1");
    }

    #[test]
    fn env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notifier.yml");
        std::fs::write(&path, "webhook: https://file\nsecret: from-file\n").unwrap();

        let cfg = resolve_with(
            Some(path.as_path()),
            Path::new("/nonexistent"),
            env(&[(ENV_WEBHOOK, "https://env"), (ENV_SECRET, "from-env")]),
        )
        .unwrap();
        assert_eq!(cfg.webhook, "https://env");
        assert_eq!(cfg.secret, "from-env");
    }

    #[test]
    fn env_only_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = resolve_with(
            None,
            &dir.path().join("absent.yml"),
            env(&[(ENV_WEBHOOK, "https://env-only")]),
        )
        .unwrap();
        assert_eq!(cfg.webhook, "https://env-only");
        assert!(cfg.secret.is_empty());
        assert_eq!(cfg.timeout_seconds, 10);
    }

    #[test]
    fn default_path_used_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notifier.yml");
        std::fs::write(&path, "webhook: https://default\ntimeout_seconds: 3\n").unwrap();

        let cfg = resolve_with(None, &path, env(&[])).unwrap();
        assert_eq!(cfg.webhook, "https://default");
        assert_eq!(cfg.timeout_seconds, 3);
    }

    #[test]
    fn explicit_missing_file_is_io_error() {
        let err = resolve_with(
            Some(Path::new("/nonexistent/notifier.yml")),
            Path::new("/nonexistent"),
            env(&[(ENV_WEBHOOK, "https://env")]),
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn missing_webhook_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_with(None, &dir.path().join("absent.yml"), env(&[])).unwrap_err();
        assert!(err.to_string().contains("webhook URL"));
    }

    #[test]
    fn bad_scheme_rejected() {
        let cfg = load_from_str("webhook: ftp://hook\n").unwrap();
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let cfg = load_from_str("webhook: https://hook\ntimeout_seconds: 0\n").unwrap();
        let err = validate(&cfg).unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let err = load_from_str("webhook: [unclosed").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn default_config_path_not_empty() {
        let path = default_config_path();
        assert!(path.ends_with("notifier.yml"));
    }
}
