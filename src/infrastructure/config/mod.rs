use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;

use crate::domain::contacts::{CleaningConfig, CleaningSettings};
use crate::domain::error::{AppError, Result};

/// Prefix of environment variables read as settings, e.g. `REINBOX_MODE`
pub const ENV_PREFIX: &str = "REINBOX_";

/// Layered settings: TOML file, then environment, then explicit overrides
pub struct ConfigService {
    figment: Figment,
}

impl ConfigService {
    pub fn new() -> Self {
        Self {
            figment: Figment::new(),
        }
    }

    /// Merge a TOML settings file. An explicitly named file must exist.
    pub fn with_file(self, path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(AppError::ConfigError(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        Ok(Self {
            figment: self.figment.merge(Toml::file(path)),
        })
    }

    pub fn with_env(self) -> Self {
        self.with_env_prefix(ENV_PREFIX)
    }

    pub fn with_env_prefix(self, prefix: &str) -> Self {
        Self {
            figment: self.figment.merge(Env::prefixed(prefix)),
        }
    }

    /// Merge settings given directly by the caller; unset fields leave
    /// earlier layers untouched.
    pub fn with_overrides(self, overrides: &CleaningSettings) -> Self {
        Self {
            figment: self.figment.merge(Serialized::defaults(overrides)),
        }
    }

    pub fn settings(&self) -> Result<CleaningSettings> {
        Ok(self.figment.extract()?)
    }

    pub fn load(&self) -> Result<CleaningConfig> {
        CleaningConfig::try_from(self.settings()?)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contacts::{EmailRule, Mode};
    use std::io::Write;

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_from_file() {
        let file = toml_file(
            "mode = \"owner_only\"\ndedupe_by_email = true\nfilter_invalid_emails = true\nemail_rule = \"strict\"\n",
        );

        let config = ConfigService::new()
            .with_file(file.path())
            .unwrap()
            .load()
            .unwrap();

        assert_eq!(config.mode, Mode::OwnerOnly);
        assert!(config.dedupe_by_email);
        assert_eq!(config.active_email_rule(), Some(EmailRule::Strict));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file = toml_file("mode = \"clone\"\ndedupe_by_email = true\n");
        let overrides = CleaningSettings {
            mode: Some(Mode::OwnerOnly),
            ..Default::default()
        };

        let config = ConfigService::new()
            .with_file(file.path())
            .unwrap()
            .with_overrides(&overrides)
            .load()
            .unwrap();

        assert_eq!(config.mode, Mode::OwnerOnly);
        assert!(config.dedupe_by_email);
    }

    #[test]
    fn test_missing_dedupe_choice_fails() {
        let overrides = CleaningSettings {
            mode: Some(Mode::Clone),
            ..Default::default()
        };
        let err = ConfigService::new()
            .with_overrides(&overrides)
            .load()
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_unknown_mode_is_config_error() {
        let file = toml_file("mode = \"renters\"\ndedupe_by_email = false\n");
        let err = ConfigService::new()
            .with_file(file.path())
            .unwrap()
            .load()
            .unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn test_env_layer_sits_between_file_and_overrides() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("reinbox.toml", "mode = \"clone\"\ndedupe_by_email = true\n")?;
            let path = jail.directory().join("reinbox.toml");

            // env alone
            jail.set_env("REINBOX_MODE", "owner-only");
            jail.set_env("REINBOX_DEDUPE_BY_EMAIL", "false");
            let config = ConfigService::new()
                .with_env()
                .load()
                .map_err(|e| e.to_string())?;
            assert_eq!(config.mode, Mode::OwnerOnly);
            assert!(!config.dedupe_by_email);

            // env beats the file
            let config = ConfigService::new()
                .with_file(&path)
                .map_err(|e| e.to_string())?
                .with_env()
                .load()
                .map_err(|e| e.to_string())?;
            assert_eq!(config.mode, Mode::OwnerOnly);
            assert!(!config.dedupe_by_email);

            // command-line overrides beat env
            let overrides = CleaningSettings {
                mode: Some(Mode::Clone),
                ..Default::default()
            };
            let config = ConfigService::new()
                .with_file(&path)
                .map_err(|e| e.to_string())?
                .with_env()
                .with_overrides(&overrides)
                .load()
                .map_err(|e| e.to_string())?;
            assert_eq!(config.mode, Mode::Clone);
            assert!(!config.dedupe_by_email);

            Ok(())
        });
    }

    #[test]
    fn test_missing_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConfigService::new().with_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }
}
