use crate::utils::error::{FinError, Result};
use chrono::NaiveDate;
use regex::Regex;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Normalizes a currency code to uppercase after checking the format.
pub fn validate_currency_code(field_name: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    let re = Regex::new(r"^[A-Za-z]{2,20}$").unwrap();

    if !re.is_match(trimmed) {
        return Err(FinError::ValidationError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "currency codes are 2-20 latin letters".to_string(),
        });
    }

    Ok(trimmed.to_uppercase())
}

pub fn validate_positive_amount(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(FinError::ValidationError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "must be a positive finite number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_date(field_name: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| FinError::ValidationError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: format!("expected a YYYY-MM-DD date: {}", e),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FinError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(FinError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(FinError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_currency_code() {
        assert_eq!(validate_currency_code("currency", "usd").unwrap(), "USD");
        assert_eq!(validate_currency_code("currency", " EUR ").unwrap(), "EUR");
        assert!(validate_currency_code("currency", "").is_err());
        assert!(validate_currency_code("currency", "U").is_err());
        assert!(validate_currency_code("currency", "US1").is_err());
        assert!(validate_currency_code("currency", "US DOLLAR").is_err());
    }

    #[test]
    fn test_validate_positive_amount() {
        assert!(validate_positive_amount("rate", 79.74).is_ok());
        assert!(validate_positive_amount("rate", 0.0).is_err());
        assert!(validate_positive_amount("rate", -5.0).is_err());
        assert!(validate_positive_amount("rate", f64::NAN).is_err());
        assert!(validate_positive_amount("rate", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_date() {
        assert_eq!(
            validate_date("date", "2025-05-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
        );
        assert!(validate_date("date", "01.05.2025").is_err());
        assert!(validate_date("date", "2025-13-01").is_err());
        assert!(validate_date("date", "not a date").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("data_dir", "./data").is_ok());
        assert!(validate_path("data_dir", "").is_err());
        assert!(validate_path("data_dir", "bad\0path").is_err());
    }
}
