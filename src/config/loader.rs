use super::Config;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::Path;

impl Config {
    /// Load `~/.thoughtdesk/config.toml`, writing defaults on first run.
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let thoughtdesk_dir = home.join(".thoughtdesk");

        if !thoughtdesk_dir.exists() {
            fs::create_dir_all(&thoughtdesk_dir)
                .context("Failed to create .thoughtdesk directory")?;
        }

        Self::load_or_init_at(&thoughtdesk_dir.join("config.toml"))
    }

    pub fn load_or_init_at(config_path: &Path) -> Result<Self> {
        let mut config = if config_path.exists() {
            let contents = fs::read_to_string(config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            config.config_path = config_path.to_path_buf();
            config
        } else {
            let config = Self {
                config_path: config_path.to_path_buf(),
                ..Self::default()
            };
            config.save()?;
            tracing::info!(path = %config_path.display(), "Wrote default config");
            config
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_env::{EnvVarGuard, lock_env};
    use super::*;
    use tempfile::TempDir;

    fn clear_overrides() -> Vec<EnvVarGuard> {
        [
            "THOUGHTDESK_API_KEY",
            "THOUGHTDESK_PROVIDER",
            "THOUGHTDESK_BASE_URL",
            "THOUGHTDESK_MODEL",
            "THOUGHTDESK_TEMPERATURE",
        ]
        .into_iter()
        .map(EnvVarGuard::unset)
        .collect()
    }

    #[test]
    fn first_load_writes_defaults() {
        let _lock = lock_env();
        let _env = clear_overrides();
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");

        let config = Config::load_or_init_at(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.config_path, path);
        assert_eq!(config.provider, "minimax");
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("[extraction]"));
    }

    #[test]
    fn existing_file_is_loaded() {
        let _lock = lock_env();
        let _env = clear_overrides();
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            "provider = \"openai\"\n\n[assistant]\nmodel = \"gpt-4o-mini\"\nmax_tokens = 512\n",
        )
        .unwrap();

        let config = Config::load_or_init_at(&path).unwrap();

        assert_eq!(config.provider, "openai");
        assert_eq!(config.assistant.model, "gpt-4o-mini");
        assert_eq!(config.assistant.max_tokens, 512);
    }

    #[test]
    fn invalid_file_fails_validation() {
        let _lock = lock_env();
        let _env = clear_overrides();
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "provider = \"nope\"\n").unwrap();

        let err = Config::load_or_init_at(&path).unwrap_err();
        assert!(err.to_string().contains("unknown provider"));
    }
}
