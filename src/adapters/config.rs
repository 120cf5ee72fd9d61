use crate::config::toml_config::TomlConfig;
use crate::core::{Result, SurchargeConfigSource, SurchargeSettings};
use crate::utils::validation::Validate;
use std::path::PathBuf;

/// Fixed settings, handy for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSurchargeConfig {
    settings: SurchargeSettings,
}

impl StaticSurchargeConfig {
    pub fn new(settings: SurchargeSettings) -> Self {
        Self { settings }
    }
}

impl SurchargeConfigSource for StaticSurchargeConfig {
    fn surcharge_settings(&self) -> Result<SurchargeSettings> {
        Ok(self.settings.clone())
    }
}

/// Re-reads the `[surcharge]` table of a TOML file on every batch,
/// so edits take effect without restarting.
#[derive(Debug, Clone)]
pub struct FileSurchargeConfig {
    path: PathBuf,
}

impl FileSurchargeConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SurchargeConfigSource for FileSurchargeConfig {
    fn surcharge_settings(&self) -> Result<SurchargeSettings> {
        let config = TomlConfig::from_file(&self.path)?;
        config.surcharge.validate()?;
        Ok(config.surcharge.to_settings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SurchargeType;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn test_file_config_picks_up_changes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("surcharge.toml");
        let source = FileSurchargeConfig::new(&path);

        std::fs::write(
            &path,
            "[surcharge]\ncategory = \"freeShipping\"\nsurcharge_type = \"absolut\"\nsurcharge_amount = 5\n",
        )
        .unwrap();
        let first = source.surcharge_settings().unwrap();
        assert_eq!(first.surcharge_type, Some(SurchargeType::Absolute));

        std::fs::write(
            &path,
            "[surcharge]\ncategory = \"freeShipping\"\nsurcharge_type = \"percent\"\nsurcharge_amount = 7.5\n",
        )
        .unwrap();
        let second = source.surcharge_settings().unwrap();
        assert_eq!(second.surcharge_type, Some(SurchargeType::Percent));
        assert_eq!(second.surcharge_amount, Some(dec!(7.5)));
    }

    #[test]
    fn test_file_config_strict_rejects_unknown() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("surcharge.toml");
        std::fs::write(
            &path,
            "[surcharge]\ncategory = \"weight\"\nsurcharge_type = \"absolut\"\nstrict = true\n",
        )
        .unwrap();

        assert!(FileSurchargeConfig::new(&path).surcharge_settings().is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let source = FileSurchargeConfig::new("/definitely/not/here.toml");
        assert!(source.surcharge_settings().is_err());
    }
}
