use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

use super::schema::Config;
use crate::scoring::ScoringConfig;

/// Write a config file holding the default scoring settings.
///
/// Refuses to replace an existing file unless `force` is set. The write is
/// atomic, so an interrupted run never leaves a truncated config behind.
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    let config = Config {
        scoring: Some(ScoringConfig::default()),
    };
    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    // Create parent directories
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit().context("Failed to save config")?;

    tracing::debug!(path = %path.display(), "wrote default config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use std::env;

    #[test]
    fn test_written_config_loads_back() {
        let dir = env::temp_dir().join("task_rank_test_init");
        let path = dir.join("config.yaml");
        let _ = std::fs::remove_dir_all(&dir);

        write_default_config(&path, false).unwrap();
        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.effective_scoring(), ScoringConfig::default());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_refuses_overwrite_without_force() {
        let path = env::temp_dir().join("task_rank_test_init_existing.yaml");
        std::fs::write(&path, "{}\n").unwrap();

        let err = write_default_config(&path, false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        // Untouched
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}\n");

        write_default_config(&path, true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("tier_weights"));

        let _ = std::fs::remove_file(&path);
    }
}
