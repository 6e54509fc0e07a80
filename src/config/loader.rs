use std::path::Path;

use anyhow::{Context, Result};

use super::types::Config;

/// Name of the optional per-directory config file.
pub const CONFIG_FILE: &str = ".txfleet";

/// Load config from a `.txfleet` file in the given directory.
///
/// A missing file yields the defaults; a present but malformed file is an
/// error, since silently ignoring it would run the fleet with the wrong
/// images or interval.
pub fn load(dir: &Path) -> Result<Config> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: Config = serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = load(dir.path()).expect("load");
        assert_eq!(cfg.instances, 4);
        assert_eq!(cfg.runtime, "docker");
    }

    #[test]
    fn partial_file_overrides_named_fields_only() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "instances: 8\npoll_interval_secs: 5\n",
        )
        .expect("write config");

        let cfg = load(dir.path()).expect("load");
        assert_eq!(cfg.instances, 8);
        assert_eq!(cfg.poll_interval_secs, 5);
        // Untouched fields keep their defaults.
        assert_eq!(cfg.mysql_image, "txcheck-my-sql-container");
        assert_eq!(cfg.warmup_secs, 10);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(CONFIG_FILE), "instances: [not a number\n")
            .expect("write config");
        assert!(load(dir.path()).is_err());
    }
}
