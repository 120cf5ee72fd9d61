use crate::core::{Context, SurchargeCategory, SurchargeConfigSource, SurchargeSettings, SurchargeType};
use crate::utils::error::{Result, SurchargeError};
use crate::utils::validation::{self, Validate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const OUTPUT_FORMATS: [&str; 2] = ["json", "csv"];
pub const DELIVERY_TIME_SOURCES: [&str; 2] = ["catalog", "api"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub surcharge: SurchargeSection,
    #[serde(default)]
    pub delivery_times: DeliveryTimesConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub context: Context,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurchargeSection {
    pub category: Option<SurchargeCategory>,
    pub surcharge_type: Option<SurchargeType>,
    pub surcharge_amount: Option<Decimal>,
    /// 開啟後，未知的 category / surcharge_type 直接視為設定錯誤
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryTimesConfig {
    pub source: String,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl Default for DeliveryTimesConfig {
    fn default() -> Self {
        Self {
            source: "catalog".to_string(),
            endpoint: None,
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub input: String,
    pub output_path: String,
    pub output_formats: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            input: "catalog.json".to_string(),
            output_path: "./output".to_string(),
            output_formats: vec!["json".to_string()],
        }
    }
}

impl SurchargeSection {
    pub fn to_settings(&self) -> SurchargeSettings {
        SurchargeSettings {
            category: self.category.clone(),
            surcharge_type: self.surcharge_type.clone(),
            surcharge_amount: self.surcharge_amount,
        }
    }
}

impl Validate for SurchargeSection {
    fn validate(&self) -> Result<()> {
        if let Some(category) = self.category.as_ref().filter(|c| !c.is_known()) {
            if self.strict {
                return Err(SurchargeError::InvalidConfigValueError {
                    field: "surcharge.category".to_string(),
                    value: category.to_string(),
                    reason: format!(
                        "Valid values: {}, {}",
                        SurchargeCategory::FREE_SHIPPING,
                        SurchargeCategory::DELIVERY_TIME
                    ),
                });
            }
            tracing::warn!(
                "⚠️ Unknown surcharge category '{}', no item will receive a surcharge",
                category
            );
        }

        if let Some(surcharge_type) = self.surcharge_type.as_ref().filter(|t| !t.is_known()) {
            if self.strict {
                return Err(SurchargeError::InvalidConfigValueError {
                    field: "surcharge.surcharge_type".to_string(),
                    value: surcharge_type.to_string(),
                    reason: format!(
                        "Valid values: {}, {}",
                        SurchargeType::ABSOLUTE,
                        SurchargeType::PERCENT
                    ),
                });
            }
            tracing::warn!(
                "⚠️ Unknown surcharge type '{}', qualifying prices stay unchanged",
                surcharge_type
            );
        }

        Ok(())
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SurchargeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SurchargeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SURCHARGE_AMOUNT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SurchargeError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        self.surcharge.validate()?;

        validation::validate_path("catalog.input", &self.catalog.input)?;
        validation::validate_file_extension("catalog.input", &self.catalog.input, &["json"])?;
        validation::validate_path("catalog.output_path", &self.catalog.output_path)?;

        if self.catalog.output_formats.is_empty() {
            return Err(SurchargeError::ConfigValidationError {
                field: "catalog.output_formats".to_string(),
                message: "At least one output format is required".to_string(),
            });
        }
        for format in &self.catalog.output_formats {
            validation::validate_one_of("catalog.output_formats", format, &OUTPUT_FORMATS)?;
        }

        validation::validate_one_of(
            "delivery_times.source",
            &self.delivery_times.source,
            &DELIVERY_TIME_SOURCES,
        )?;
        if self.uses_delivery_time_api() {
            let endpoint =
                validation::validate_required_field("delivery_times.endpoint", &self.delivery_times.endpoint)?;
            validation::validate_url("delivery_times.endpoint", endpoint)?;
        }
        if let Some(timeout) = self.delivery_times.timeout_seconds {
            validation::validate_range("delivery_times.timeout_seconds", timeout, 1, 300)?;
        }

        if let Some(language_id) = &self.context.language_id {
            validation::validate_non_empty_string("context.language_id", language_id)?;
        }

        Ok(())
    }

    pub fn uses_delivery_time_api(&self) -> bool {
        self.delivery_times.source == "api"
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.delivery_times.timeout_seconds.unwrap_or(10)
    }

    pub fn writes_format(&self, format: &str) -> bool {
        self.catalog.output_formats.iter().any(|f| f == format)
    }
}

impl SurchargeConfigSource for TomlConfig {
    fn surcharge_settings(&self) -> Result<SurchargeSettings> {
        Ok(self.surcharge.to_settings())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[surcharge]
category = "deliveryTime"
surcharge_type = "percent"
surcharge_amount = 10

[delivery_times]
source = "api"
endpoint = "https://shop.example.com/api"
timeout_seconds = 5

[catalog]
input = "products.json"
output_path = "./adjusted"
output_formats = ["json", "csv"]

[context]
language_id = "de-DE"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let settings = config.surcharge_settings().unwrap();

        assert_eq!(settings.category, Some(SurchargeCategory::DeliveryTime));
        assert_eq!(settings.surcharge_type, Some(SurchargeType::Percent));
        assert_eq!(settings.surcharge_amount, Some(dec!(10)));
        assert!(config.uses_delivery_time_api());
        assert_eq!(config.timeout_seconds(), 5);
        assert!(config.writes_format("csv"));
        assert_eq!(config.context.language_id.as_deref(), Some("de-DE"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("[surcharge]\n").unwrap();

        assert!(!config.surcharge_settings().unwrap().is_enabled());
        assert_eq!(config.catalog.input, "catalog.json");
        assert_eq!(config.delivery_times.source, "catalog");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_amount_accepts_decimal_string() {
        let config = TomlConfig::from_toml_str(
            r#"
[surcharge]
category = "freeShipping"
surcharge_type = "absolut"
surcharge_amount = "4.95"
"#,
        )
        .unwrap();

        assert_eq!(config.surcharge.surcharge_amount, Some(dec!(4.95)));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_SURCHARGE_CATEGORY", "freeShipping");

        let config = TomlConfig::from_toml_str(
            r#"
[surcharge]
category = "${TEST_SURCHARGE_CATEGORY}"
surcharge_type = "absolut"
surcharge_amount = 5
"#,
        )
        .unwrap();
        assert_eq!(config.surcharge.category, Some(SurchargeCategory::FreeShipping));

        std::env::remove_var("TEST_SURCHARGE_CATEGORY");
    }

    #[test]
    fn test_unknown_values_are_kept_when_not_strict() {
        let config = TomlConfig::from_toml_str(
            r#"
[surcharge]
category = "weight"
surcharge_type = "fixed"
surcharge_amount = 5
"#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(
            config.surcharge.surcharge_type,
            Some(SurchargeType::Unknown("fixed".to_string()))
        );
    }

    #[test]
    fn test_strict_mode_rejects_unknown_values() {
        let config = TomlConfig::from_toml_str(
            r#"
[surcharge]
category = "freeShipping"
surcharge_type = "fixed"
surcharge_amount = 5
strict = true
"#,
        )
        .unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("surcharge.surcharge_type"));
    }

    #[test]
    fn test_api_source_requires_endpoint() {
        let config = TomlConfig::from_toml_str(
            r#"
[surcharge]
category = "deliveryTime"
surcharge_type = "absolut"

[delivery_times]
source = "api"
"#,
        )
        .unwrap();

        assert!(matches!(
            config.validate(),
            Err(SurchargeError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_invalid_output_format() {
        let config = TomlConfig::from_toml_str(
            r#"
[surcharge]

[catalog]
output_formats = ["xml"]
"#,
        )
        .unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[surcharge]\ncategory = \"freeShipping\"\nsurcharge_type = \"absolut\"\nsurcharge_amount = 2\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.surcharge.surcharge_amount, Some(dec!(2)));
    }
}
