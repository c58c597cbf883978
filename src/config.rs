use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::game::validate_setup;

/// Defaults shown on the setup screen.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    pub rows: usize,
    pub columns: usize,
    pub player1_color: String,
    pub player2_color: String,
}

impl Default for SetupConfig {
    fn default() -> Self {
        SetupConfig {
            rows: 6,
            columns: 7,
            player1_color: "#ff0000".to_string(),
            player2_color: "#ffff00".to_string(),
        }
    }
}

/// Command-line replacements for individual setup values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetupOverrides {
    pub rows: Option<usize>,
    pub columns: Option<usize>,
    pub player1_color: Option<String>,
    pub player2_color: Option<String>,
}

impl SetupOverrides {
    pub fn apply(self, setup: &mut SetupConfig) {
        if let Some(rows) = self.rows {
            setup.rows = rows;
        }
        if let Some(columns) = self.columns {
            setup.columns = columns;
        }
        if let Some(color) = self.player1_color {
            setup.player1_color = color;
        }
        if let Some(color) = self.player2_color {
            setup.player2_color = color;
        }
    }
}

/// Where and how verbosely to write the log file.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: PathBuf,
    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            directory: PathBuf::from("logs"),
            file_name: "connect-four.log".to_string(),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub setup: SetupConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file (or defaults when it is missing), apply `overrides`,
    /// and only then validate.
    pub fn load_with_overrides(
        path: &Path,
        overrides: SetupOverrides,
    ) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Self::read(path)?
        } else {
            Self::default()
        };
        overrides.apply(&mut config.setup);
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Setup defaults must be startable as-is
        validate_setup(
            self.setup.rows,
            self.setup.columns,
            &self.setup.player1_color,
            &self.setup.player2_color,
        )?;

        if self.logging.level.parse::<tracing::Level>().is_err() {
            return Err(ConfigError::Validation(format!(
                "logging.level '{}' is not one of trace, debug, info, warn, error",
                self.logging.level
            )));
        }
        if self.logging.file_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.file_name must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SetupError;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[setup]
rows = 8
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.setup.rows, 8);
        // Other fields should be defaults
        assert_eq!(config.setup.columns, 7);
        assert_eq!(config.setup.player1_color, "#ff0000");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_validation_rejects_zero_rows() {
        let mut config = AppConfig::default();
        config.setup.rows = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Setup(SetupError::InvalidDimensions { .. }))
        ));
    }

    #[test]
    fn test_validation_rejects_same_colors() {
        let mut config = AppConfig::default();
        config.setup.player2_color = "#FF0000".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Setup(SetupError::DuplicatePlayerColors(_)))
        ));
    }

    #[test]
    fn test_validation_rejects_unknown_level() {
        let mut config = AppConfig::default();
        config.logging.level = "loud".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validation_rejects_empty_file_name() {
        let mut config = AppConfig::default();
        config.logging.file_name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AppConfig::load_with_overrides(
            Path::new("nonexistent_config.toml"),
            SetupOverrides::default(),
        )
        .unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r##"
[setup]
columns = 9
player2_color = "#00ff00"

[logging]
level = "debug"
"##
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.setup.columns, 9);
        assert_eq!(config.setup.player2_color, "#00ff00");
        assert_eq!(config.logging.level, "debug");
        // Others are defaults
        assert_eq!(config.setup.rows, 6);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[setup]\nrows = \"six\"\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_overrides_fix_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clash.toml");
        std::fs::write(
            &path,
            "[setup]\nplayer1_color = \"#0000ff\"\nplayer2_color = \"#0000ff\"\n",
        )
        .unwrap();
        assert!(AppConfig::load(&path).is_err());

        let overrides = SetupOverrides {
            player2_color: Some("#00ff00".to_string()),
            ..SetupOverrides::default()
        };
        let config = AppConfig::load_with_overrides(&path, overrides).unwrap();
        assert_eq!(config.setup.player1_color, "#0000ff");
        assert_eq!(config.setup.player2_color, "#00ff00");
    }

    #[test]
    fn test_overrides_are_validated() {
        let overrides = SetupOverrides {
            rows: Some(0),
            ..SetupOverrides::default()
        };
        assert!(matches!(
            AppConfig::load_with_overrides(Path::new("nonexistent_config.toml"), overrides),
            Err(ConfigError::Setup(SetupError::InvalidDimensions { .. }))
        ));
    }

    #[test]
    fn test_empty_overrides_keep_file_values() {
        let mut setup = SetupConfig::default();
        SetupOverrides::default().apply(&mut setup);
        assert_eq!(setup, SetupConfig::default());
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
        assert_eq!(config, AppConfig::default());
    }
}
