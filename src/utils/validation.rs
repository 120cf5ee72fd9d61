use crate::utils::error::{Result, SurchargeError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> SurchargeError {
    SurchargeError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed: &[&str]) -> Result<()> {
    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(ext) if allowed.contains(&ext) => Ok(()),
        Some(ext) => Err(invalid(
            field_name,
            file,
            format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                ext,
                allowed.join(", ")
            ),
        )),
        None => Err(invalid(
            field_name,
            file,
            "File has no extension or invalid filename",
        )),
    }
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(invalid(
        field_name,
        value,
        format!("Valid values: {}", allowed.join(", ")),
    ))
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| SurchargeError::MissingConfigError {
            field: field_name.to_string(),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("delivery_times.endpoint", "https://shop.example.com/api").is_ok());
        assert!(validate_url("delivery_times.endpoint", "http://localhost:8000").is_ok());
        assert!(validate_url("delivery_times.endpoint", "").is_err());
        assert!(validate_url("delivery_times.endpoint", "not a url").is_err());
        assert!(validate_url("delivery_times.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("catalog.input", "catalog.json", &["json"]).is_ok());
        assert!(validate_file_extension("catalog.input", "catalog.csv", &["json"]).is_err());
        assert!(validate_file_extension("catalog.input", "catalog", &["json"]).is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("load.output_formats", "csv", &["json", "csv"]).is_ok());
        let err = validate_one_of("load.output_formats", "xml", &["json", "csv"]).unwrap_err();
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn test_validate_range_and_required() {
        assert!(validate_range("delivery_times.timeout_seconds", 10u64, 1, 300).is_ok());
        assert!(validate_range("delivery_times.timeout_seconds", 0u64, 1, 300).is_err());

        let missing: Option<String> = None;
        assert!(matches!(
            validate_required_field("delivery_times.endpoint", &missing),
            Err(SurchargeError::MissingConfigError { .. })
        ));
    }
}
