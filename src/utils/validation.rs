use crate::utils::error::{Result, SteaError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SteaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SteaError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SteaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SteaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SteaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(SteaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SteaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_list<T>(field_name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(SteaError::ConfigValidationError {
            field: field_name.to_string(),
            message: "Can not be empty".to_string(),
        });
    }
    Ok(())
}

/// 倍數與資料點必須是有限數值，NaN 會讓 Stea 伺服器回傳 400
pub fn validate_finite_values(field_name: &str, values: &[f64]) -> Result<()> {
    if let Some(value) = values.iter().find(|v| !v.is_finite()) {
        return Err(SteaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_exclusive<A, B>(
    field_name: &str,
    first: &Option<A>,
    second: &Option<B>,
    message: &str,
) -> Result<()> {
    if first.is_some() && second.is_some() {
        return Err(SteaError::ConfigValidationError {
            field: field_name.to_string(),
            message: message.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("stea_server", "https://example.com").is_ok());
        assert!(validate_url("stea_server", "http://example.com:1700").is_ok());
        assert!(validate_url("stea_server", "").is_err());
        assert!(validate_url("stea_server", "invalid-url").is_err());
        assert!(validate_url("stea_server", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_non_empty_list() {
        assert!(validate_non_empty_list("results", &["NPV"]).is_ok());
        let empty: Vec<String> = vec![];
        assert!(validate_non_empty_list("results", &empty).is_err());
    }

    #[test]
    fn test_validate_finite_values() {
        assert!(validate_finite_values("mult", &[1.0, 2.5]).is_ok());
        assert!(validate_finite_values("mult", &[1.0, f64::NAN]).is_err());
        assert!(validate_finite_values("mult", &[f64::INFINITY]).is_err());
    }

    #[test]
    fn test_validate_exclusive() {
        assert!(validate_exclusive::<i32, i32>("x", &Some(1), &None, "m").is_ok());
        assert!(validate_exclusive("x", &Some(1), &Some(2), "m").is_err());
    }
}
